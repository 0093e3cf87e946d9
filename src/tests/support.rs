//! 测试辅助：确定性字体与记录调用的绘制表面

use crate::canvas::Surface;
use crate::geometry::IntRect;
use crate::paint::TextPaint;
use crate::resources::Resources;
use crate::text::{FontMetrics, Glyph, Typeface};
use crate::{Color, Rect};
use std::sync::Arc;

/// 每个字符前进 0.5 * size；top = -size，bottom = 0.25 * size
pub struct StubTypeface;

impl Typeface for StubTypeface {
    fn advance_width(&self, _ch: char, size: f32) -> f32 {
        size * 0.5
    }

    fn line_metrics(&self, size: f32) -> FontMetrics {
        FontMetrics {
            top: -size,
            ascent: -size * 0.8,
            descent: size * 0.2,
            bottom: size * 0.25,
            leading: 0.0,
        }
    }

    fn glyph_bounds(&self, _ch: char, size: f32) -> IntRect {
        IntRect::new(0, -(size * 0.7) as i32, (size * 0.5) as i32, 0)
    }

    fn rasterize(&self, ch: char, size: f32) -> Glyph {
        let bounds = self.glyph_bounds(ch, size);
        let len = (bounds.width() * bounds.height()).max(0) as usize;
        Glyph {
            bounds,
            advance_width: self.advance_width(ch, size),
            coverage: vec![255; len],
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub fn stub_resources() -> Resources {
    Resources::new(Arc::new(StubTypeface))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill(Rect, Color),
    Bitmap(Rect, u8),
    Text { text: String, x: f32, baseline: f32, color: Color, size: f32 },
}

/// 按顺序记录绘制调用
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Text { .. })).collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.ops.push(Op::Fill(*rect, color));
    }

    fn draw_bitmap(&mut self, dst: &Rect, _rgba: &[u8], _width: u32, _height: u32, alpha: u8) {
        self.ops.push(Op::Bitmap(*dst, alpha));
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &TextPaint) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            baseline,
            color: paint.color,
            size: paint.text_size,
        });
    }
}
