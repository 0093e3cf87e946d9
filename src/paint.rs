//! 文本画笔模块

use crate::geometry::IntRect;
use crate::text::{FontMetrics, FontMetricsInt, Typeface};
use crate::Color;
use std::fmt;
use std::sync::Arc;

/// 文本画笔 - 颜色、字号与字体
#[derive(Clone)]
pub struct TextPaint {
    pub color: Color,
    pub text_size: f32,
    pub anti_alias: bool,
    typeface: Arc<dyn Typeface>,
}

impl fmt::Debug for TextPaint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextPaint")
            .field("color", &self.color)
            .field("text_size", &self.text_size)
            .field("anti_alias", &self.anti_alias)
            .field("typeface", &self.typeface.name())
            .finish()
    }
}

impl TextPaint {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        Self {
            color: Color::BLACK,
            text_size: 0.0,
            anti_alias: false,
            typeface,
        }
    }

    pub fn with_anti_alias(mut self, aa: bool) -> Self {
        self.anti_alias = aa;
        self
    }

    pub fn typeface(&self) -> &dyn Typeface {
        self.typeface.as_ref()
    }

    /// 文本前进宽度
    pub fn measure_text(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.typeface.advance_width(ch, self.text_size))
            .sum()
    }

    pub fn font_metrics(&self) -> FontMetrics {
        self.typeface.line_metrics(self.text_size)
    }

    pub fn font_metrics_int(&self) -> FontMetricsInt {
        self.font_metrics().into()
    }

    /// 文本的紧致像素边界（相对于基线起点），写入 `bounds`
    pub fn text_bounds(&self, text: &str, bounds: &mut IntRect) {
        bounds.set_empty();
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let g = self.typeface.glyph_bounds(ch, self.text_size);
            let x = pen.round() as i32;
            bounds.union(&IntRect::new(g.left + x, g.top, g.right + x, g.bottom));
            pen += self.typeface.advance_width(ch, self.text_size);
        }
    }
}
