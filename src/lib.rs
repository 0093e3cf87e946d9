//! Labeled Graphic - 带背景图的单行文本控件
//! 包含文本度量、像素画布、Drawable、声明式属性解析与布局驱动

mod canvas;
mod color;
mod geometry;
mod paint;
pub mod text;

pub mod config;
pub mod error;
pub mod resources;

pub use canvas::{Canvas, Surface};
pub use color::Color;
pub use error::{Error, Result};
pub use geometry::{IntRect, Padding, Point, Rect, Size};
pub use paint::TextPaint;
pub use text::{FontMetrics, FontMetricsInt, FontTypeface, Glyph, Typeface};

// UI 组件系统
pub mod ui;

// 单元测试
#[cfg(test)]
mod tests;
