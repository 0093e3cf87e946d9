//! 视图基础定义

use super::layout::MeasureSpec;
use crate::canvas::Surface;
use crate::error::Result;
use crate::geometry::{Padding, Size};
use crate::resources::{AttributeSet, Resources, TypedArray};
use std::sync::atomic::{AtomicU64, Ordering};

static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 视图 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

impl ViewId {
    pub fn new() -> Self {
        Self(VIEW_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

/// 视图通用属性名
pub mod attr {
    pub const ID: &str = "id";
    pub const PADDING: &str = "padding";
    pub const PADDING_LEFT: &str = "paddingLeft";
    pub const PADDING_TOP: &str = "paddingTop";
    pub const PADDING_RIGHT: &str = "paddingRight";
    pub const PADDING_BOTTOM: &str = "paddingBottom";
}

/// 视图公共状态：ID、内边距、布局尺寸与失效标记
#[derive(Debug, Clone)]
pub struct ViewBase {
    id: ViewId,
    tag: Option<String>,
    padding: Padding,
    width: i32,
    height: i32,
    measured: Size,
    dirty: bool,
    layout_requested: bool,
    configured: bool,
}

impl ViewBase {
    pub fn new() -> Self {
        Self {
            id: ViewId::new(),
            tag: None,
            padding: Padding::default(),
            width: 0,
            height: 0,
            measured: Size::default(),
            dirty: true,
            layout_requested: true,
            configured: false,
        }
    }

    pub fn id(&self) -> ViewId { self.id }
    pub fn tag(&self) -> Option<&str> { self.tag.as_deref() }
    pub fn padding(&self) -> Padding { self.padding }
    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }
    pub fn measured(&self) -> Size { self.measured }
    pub fn is_dirty(&self) -> bool { self.dirty }
    pub fn is_layout_requested(&self) -> bool { self.layout_requested }
    pub fn is_configured(&self) -> bool { self.configured }

    pub fn set_padding(&mut self, padding: Padding) {
        let padding = padding.non_negative();
        if self.padding != padding {
            self.padding = padding;
            self.request_layout();
        }
    }

    /// 标记需要重绘
    pub fn invalidate(&mut self) {
        if !self.dirty {
            log::trace!("invalidate view {}", self.id.0);
        }
        self.dirty = true;
    }

    /// 标记需要重新测量与布局
    pub fn request_layout(&mut self) {
        self.layout_requested = true;
        self.invalidate();
    }

    pub(crate) fn set_measured(&mut self, size: Size) {
        self.measured = size;
    }

    /// 设置布局后的尺寸
    pub fn set_frame(&mut self, width: i32, height: i32) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.invalidate();
        }
        self.layout_requested = false;
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn mark_configured(&mut self) {
        self.configured = true;
    }

    /// 解析通用属性：id 与内边距。单边值覆盖 `padding`
    pub fn apply_attributes(&mut self, a: &TypedArray<'_>) -> Result<()> {
        self.tag = a.get_string(attr::ID);

        let all = a.get_dimension_pixel_size(attr::PADDING, 0)?;
        self.padding = Padding::new(
            a.get_dimension_pixel_size(attr::PADDING_LEFT, all)?,
            a.get_dimension_pixel_size(attr::PADDING_TOP, all)?,
            a.get_dimension_pixel_size(attr::PADDING_RIGHT, all)?,
            a.get_dimension_pixel_size(attr::PADDING_BOTTOM, all)?,
        )
        .non_negative();
        Ok(())
    }
}

impl Default for ViewBase {
    fn default() -> Self {
        Self::new()
    }
}

/// 控件 trait - 由布局驱动器依次调用 configure / measure / layout / draw
pub trait Widget: Send {
    fn base(&self) -> &ViewBase;
    fn base_mut(&mut self) -> &mut ViewBase;

    fn id(&self) -> ViewId {
        self.base().id()
    }

    /// 解析声明式属性，只允许调用一次
    fn configure(
        &mut self,
        res: &Resources,
        attrs: Option<&AttributeSet>,
        def_style: Option<&str>,
    ) -> Result<()>;

    /// 根据父容器约束计算期望尺寸
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size;

    /// 接收最终尺寸
    fn layout(&mut self, width: i32, height: i32) {
        self.base_mut().set_frame(width, height);
    }

    fn draw(&mut self, surface: &mut dyn Surface);

    /// 视图类型名
    fn type_name(&self) -> &'static str {
        "Widget"
    }
}
