//! Canvas 画布模块 - 核心渲染接口

use crate::error::Result;
use crate::paint::TextPaint;
use crate::{Color, Rect};
use std::path::Path;

/// 绘制表面 - 视图与 Drawable 的绘制目标
pub trait Surface {
    /// 填充矩形
    fn fill_rect(&mut self, rect: &Rect, color: Color);

    /// 将 RGBA 位图拉伸绘制到目标区域，`alpha` 为整体不透明度
    fn draw_bitmap(&mut self, dst: &Rect, rgba: &[u8], width: u32, height: u32, alpha: u8);

    /// 以 `(x, baseline)` 为起点绘制单行文本
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &TextPaint);
}

/// 画布状态
#[derive(Clone)]
struct CanvasState {
    clip_rect: Option<Rect>,
    translation: (f32, f32),
}

/// 画布 - 像素缓冲区
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    clip_rect: Option<Rect>,
    translation: (f32, f32),
    state_stack: Vec<CanvasState>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
            clip_rect: None,
            translation: (0.0, 0.0),
            state_stack: Vec::new(),
        }
    }

    /// 保存当前状态（裁剪区域和变换）
    pub fn save(&mut self) {
        self.state_stack.push(CanvasState {
            clip_rect: self.clip_rect,
            translation: self.translation,
        });
    }

    /// 恢复上一次保存的状态
    pub fn restore(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.clip_rect = state.clip_rect;
            self.translation = state.translation;
        }
    }

    /// 平移坐标系
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// 清空画布
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// 设置裁剪区域（与现有区域求交，坐标受平移影响）
    pub fn clip_rect(&mut self, rect: Rect) {
        let rect = rect.offset(self.translation.0, self.translation.1);
        self.clip_rect = Some(match self.clip_rect {
            Some(current) => current.intersect(&rect),
            None => rect,
        });
    }

    /// 获取像素
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize]
        } else {
            Color::TRANSPARENT
        }
    }

    /// 设置像素（设备坐标，带 alpha 混合）
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        if let Some(clip) = &self.clip_rect {
            if x < clip.x as i32 || x >= clip.right() as i32 ||
               y < clip.y as i32 || y >= clip.bottom() as i32 {
                return;
            }
        }

        let idx = y as usize * self.width as usize + x as usize;
        if color.a == 255 {
            self.pixels[idx] = color;
        } else if color.a > 0 {
            self.pixels[idx] = color.blend(&self.pixels[idx]);
        }
    }

    /// 转换为 RGBA8 图像
    pub fn to_image(&self) -> image::RgbaImage {
        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            raw.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// 保存为 PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let tx = self.translation.0;
        let ty = self.translation.1;

        let x0 = (rect.x + tx).max(0.0) as i32;
        let y0 = (rect.y + ty).max(0.0) as i32;
        let x1 = (rect.right() + tx).min(self.width as f32) as i32;
        let y1 = (rect.bottom() + ty).min(self.height as f32) as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// 最近邻采样拉伸
    fn draw_bitmap(&mut self, dst: &Rect, rgba: &[u8], width: u32, height: u32, alpha: u8) {
        if width == 0 || height == 0 || dst.width <= 0.0 || dst.height <= 0.0 {
            return;
        }
        if rgba.len() < width as usize * height as usize * 4 {
            return;
        }

        let x = dst.x + self.translation.0;
        let y = dst.y + self.translation.1;
        let scale_x = width as f32 / dst.width;
        let scale_y = height as f32 / dst.height;

        for dy in 0..dst.height as i32 {
            for dx in 0..dst.width as i32 {
                let sx = ((dx as f32 * scale_x) as u32).min(width - 1);
                let sy = ((dy as f32 * scale_y) as u32).min(height - 1);
                let idx = (sy as usize * width as usize + sx as usize) * 4;
                let color = Color::new(rgba[idx], rgba[idx + 1], rgba[idx + 2], rgba[idx + 3])
                    .with_alpha_scaled(alpha);
                self.set_pixel(x as i32 + dx, y as i32 + dy, color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &TextPaint) {
        let mut cursor_x = x + self.translation.0;
        let baseline = baseline + self.translation.1;
        let color = paint.color;

        for ch in text.chars() {
            let glyph = paint.typeface().rasterize(ch, paint.text_size);
            let w = glyph.bounds.width().max(0) as usize;
            let h = glyph.bounds.height().max(0) as usize;

            if w > 0 && h > 0 && glyph.coverage.len() >= w * h {
                let glyph_x = cursor_x + glyph.bounds.left as f32;
                let glyph_y = baseline + glyph.bounds.top as f32;

                for gy in 0..h {
                    for gx in 0..w {
                        let mut coverage = glyph.coverage[gy * w + gx];
                        if !paint.anti_alias {
                            coverage = if coverage >= 128 { 255 } else { 0 };
                        }
                        if coverage == 0 {
                            continue;
                        }
                        let px = (glyph_x + gx as f32).round() as i32;
                        let py = (glyph_y + gy as f32).round() as i32;
                        self.set_pixel(px, py, color.with_alpha_scaled(coverage));
                    }
                }
            }

            cursor_x += glyph.advance_width;
        }
    }
}
