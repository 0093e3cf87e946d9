//! Drawable - 可绘制对象与失效回调

use super::component::ViewId;
use crate::canvas::Surface;
use crate::error::Result;
use crate::geometry::IntRect;
use crate::{Color, Rect};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// 失效队列 - Drawable 请求重绘的视图 ID，由布局驱动器消费
#[derive(Debug, Clone, Default)]
pub struct InvalidationQueue {
    pending: Arc<Mutex<Vec<ViewId>>>,
}

impl InvalidationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, view: ViewId) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if !pending.contains(&view) {
            pending.push(view);
        }
    }

    /// 取出指定视图的失效请求，其他视图的请求保留在队列中
    pub fn take(&self, view: ViewId) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let before = pending.len();
        pending.retain(|id| *id != view);
        pending.len() != before
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).contains(&view)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

/// Drawable 到宿主视图的回引（只保存 ID，不持有视图）
#[derive(Debug, Clone)]
pub struct DrawableCallback {
    pub view: ViewId,
    queue: InvalidationQueue,
}

impl DrawableCallback {
    pub fn new(view: ViewId, queue: InvalidationQueue) -> Self {
        Self { view, queue }
    }

    pub fn invalidate_drawable(&self) {
        log::trace!("drawable requested redraw of view {}", self.view.0);
        self.queue.push(self.view);
    }
}

/// Drawable trait
pub trait Drawable: Send {
    fn bounds(&self) -> IntRect;

    fn set_bounds(&mut self, bounds: IntRect);

    /// 在当前边界内绘制
    fn draw(&self, surface: &mut dyn Surface);

    /// 固有宽度，-1 表示没有
    fn intrinsic_width(&self) -> i32 {
        -1
    }

    /// 固有高度，-1 表示没有
    fn intrinsic_height(&self) -> i32 {
        -1
    }

    fn callback(&self) -> Option<&DrawableCallback>;

    fn set_callback(&mut self, callback: Option<DrawableCallback>);

    /// 通知回调目标重绘
    fn invalidate_self(&self) {
        if let Some(callback) = self.callback() {
            callback.invalidate_drawable();
        }
    }

    fn type_name(&self) -> &'static str {
        "Drawable"
    }
}

/// 纯色 Drawable
#[derive(Debug, Clone)]
pub struct ColorDrawable {
    color: Color,
    bounds: IntRect,
    callback: Option<DrawableCallback>,
}

impl ColorDrawable {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            bounds: IntRect::default(),
            callback: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.invalidate_self();
        }
    }
}

impl Drawable for ColorDrawable {
    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.bounds.is_empty() || self.color.a == 0 {
            return;
        }
        surface.fill_rect(&Rect::from(self.bounds), self.color);
    }

    fn callback(&self) -> Option<&DrawableCallback> {
        self.callback.as_ref()
    }

    fn set_callback(&mut self, callback: Option<DrawableCallback>) {
        self.callback = callback;
    }

    fn type_name(&self) -> &'static str {
        "ColorDrawable"
    }
}

/// 位图 Drawable - 拉伸填满边界
#[derive(Debug, Clone)]
pub struct BitmapDrawable {
    rgba: Arc<Vec<u8>>,
    width: u32,
    height: u32,
    alpha: u8,
    bounds: IntRect,
    callback: Option<DrawableCallback>,
}

impl BitmapDrawable {
    /// 从 RGBA 数据创建；数据不足时补透明像素
    pub fn from_rgba(mut rgba: Vec<u8>, width: u32, height: u32) -> Self {
        rgba.resize(width as usize * height as usize * 4, 0);
        Self {
            rgba: Arc::new(rgba),
            width,
            height,
            alpha: 255,
            bounds: IntRect::default(),
            callback: None,
        }
    }

    /// 从文件加载图片
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!("loaded bitmap {} ({}x{})", path.as_ref().display(), width, height);
        Ok(Self::from_rgba(img.into_raw(), width, height))
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        if self.alpha != alpha {
            self.alpha = alpha;
            self.invalidate_self();
        }
    }
}

impl Drawable for BitmapDrawable {
    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.bounds.is_empty() {
            return;
        }
        surface.draw_bitmap(&Rect::from(self.bounds), &self.rgba, self.width, self.height, self.alpha);
    }

    fn intrinsic_width(&self) -> i32 {
        self.width as i32
    }

    fn intrinsic_height(&self) -> i32 {
        self.height as i32
    }

    fn callback(&self) -> Option<&DrawableCallback> {
        self.callback.as_ref()
    }

    fn set_callback(&mut self, callback: Option<DrawableCallback>) {
        self.callback = callback;
    }

    fn type_name(&self) -> &'static str {
        "BitmapDrawable"
    }
}
