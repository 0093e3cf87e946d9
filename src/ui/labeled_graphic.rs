//! LabeledGraphicView - 单行文本 + 可选背景图

use super::component::{ViewBase, Widget};
use super::drawable::{Drawable, DrawableCallback, InvalidationQueue};
use super::layout::{MeasureOptions, MeasureSpec};
use crate::canvas::Surface;
use crate::error::{Error, Result};
use crate::geometry::{IntRect, Padding, Size};
use crate::paint::TextPaint;
use crate::resources::{AttributeSet, Resources};
use crate::text::FontMetricsInt;
use crate::Color;

/// 属性名
pub mod attr {
    pub const LABEL: &str = "label";
    pub const LABEL_COLOR: &str = "labelColor";
    pub const LABEL_SIZE: &str = "labelSize";
    pub const GRAPHIC: &str = "graphic";
}

/// 使字体完整行高在 `height` 内垂直居中的基线位置
pub fn baseline_y(height: i32, fm: &FontMetricsInt) -> i32 {
    let dy = (fm.bottom - fm.top) / 2 - fm.bottom;
    height / 2 + dy
}

pub struct LabeledGraphicView {
    base: ViewBase,
    label: Option<String>,
    label_color: Color,
    label_size: f32,
    graphic: Option<Box<dyn Drawable>>,
    text_paint: TextPaint,
    text_width: f32,
    text_height: f32,
    text_bounds: IntRect,
    options: MeasureOptions,
    invalidations: InvalidationQueue,
}

impl LabeledGraphicView {
    fn blank(res: &Resources) -> Self {
        Self {
            base: ViewBase::new(),
            label: None,
            label_color: Color::RED,
            label_size: 0.0,
            graphic: None,
            text_paint: TextPaint::new(res.typeface()),
            text_width: 0.0,
            text_height: 0.0,
            text_bounds: IntRect::default(),
            options: MeasureOptions::default(),
            invalidations: res.invalidations().clone(),
        }
    }

    /// 代码中直接创建
    pub fn new(res: &Resources) -> Result<Self> {
        let mut view = Self::blank(res);
        view.configure(res, None, None)?;
        Ok(view)
    }

    /// 从布局属性创建
    pub fn from_attributes(res: &Resources, attrs: &AttributeSet) -> Result<Self> {
        let mut view = Self::blank(res);
        view.configure(res, Some(attrs), None)?;
        Ok(view)
    }

    /// 从布局属性与命名样式创建
    pub fn with_style(res: &Resources, attrs: &AttributeSet, style: &str) -> Result<Self> {
        let mut view = Self::blank(res);
        view.configure(res, Some(attrs), Some(style))?;
        Ok(view)
    }

    pub fn with_measure_options(mut self, options: MeasureOptions) -> Self {
        self.options = options;
        self.base.request_layout();
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
        self.recompute_metrics();
        self.base.request_layout();
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    pub fn set_label_color(&mut self, color: Color) {
        self.label_color = color;
        self.recompute_metrics();
    }

    pub fn label_size(&self) -> f32 {
        self.label_size
    }

    /// 负值与 NaN 按 0 处理
    pub fn set_label_size(&mut self, size: f32) {
        self.label_size = size.max(0.0);
        self.recompute_metrics();
        self.base.request_layout();
    }

    pub fn graphic(&self) -> Option<&dyn Drawable> {
        self.graphic.as_deref()
    }

    pub fn graphic_mut(&mut self) -> Option<&mut (dyn Drawable + 'static)> {
        self.graphic.as_deref_mut()
    }

    /// 替换背景图，返回旧的 Drawable（已解除回调）
    pub fn set_graphic(&mut self, graphic: Option<Box<dyn Drawable>>) -> Option<Box<dyn Drawable>> {
        let old = self.graphic.take().map(|mut old| {
            old.set_callback(None);
            old
        });

        let callback = DrawableCallback::new(self.base.id(), self.invalidations.clone());
        self.graphic = graphic.map(|mut g| {
            g.set_callback(Some(callback));
            g
        });

        if self.options.include_graphic_size {
            self.base.request_layout();
        } else {
            self.base.invalidate();
        }
        old
    }

    pub fn take_graphic(&mut self) -> Option<Box<dyn Drawable>> {
        self.set_graphic(None)
    }

    /// 从视图树移除时释放背景图
    pub fn detach(&mut self) {
        if let Some(mut graphic) = self.graphic.take() {
            graphic.set_callback(None);
        }
    }

    pub fn padding(&self) -> Padding {
        self.base.padding()
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.base.set_padding(padding);
    }

    pub fn text_paint(&self) -> &TextPaint {
        &self.text_paint
    }

    pub fn measured_text_width(&self) -> f32 {
        self.text_width
    }

    pub fn measured_text_height(&self) -> f32 {
        self.text_height
    }

    /// 上次绘制时文本的紧致边界（相对于基线起点）
    pub fn text_bounds(&self) -> IntRect {
        self.text_bounds
    }

    fn visible_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|s| !s.is_empty())
    }

    /// 同步画笔与文本度量
    fn recompute_metrics(&mut self) {
        self.text_paint.text_size = self.label_size;
        self.text_paint.color = self.label_color;

        let (width, height) = match self.visible_label() {
            Some(label) => {
                let fm = self.text_paint.font_metrics();
                (self.text_paint.measure_text(label), fm.bottom - fm.top)
            }
            None => (0.0, 0.0),
        };
        self.text_width = width;
        self.text_height = height;

        self.base.invalidate();
    }

    fn desired_content(&self) -> (i32, i32) {
        let mut width = self.text_width.ceil() as i32;
        let mut height = self.text_height.ceil() as i32;
        if self.options.include_graphic_size {
            if let Some(g) = &self.graphic {
                width = width.max(g.intrinsic_width());
                height = height.max(g.intrinsic_height());
            }
        }
        (width, height)
    }
}

impl Widget for LabeledGraphicView {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn configure(
        &mut self,
        res: &Resources,
        attrs: Option<&AttributeSet>,
        def_style: Option<&str>,
    ) -> Result<()> {
        if self.base.is_configured() {
            return Err(Error::AlreadyConfigured(self.base.id().0));
        }

        let a = res.obtain_styled_attributes(attrs, def_style)?;
        self.base.apply_attributes(&a)?;

        self.label = a.get_string(attr::LABEL);
        self.label_color = a.get_color(attr::LABEL_COLOR, self.label_color)?;
        self.label_size = a.get_dimension(attr::LABEL_SIZE, self.label_size)?.max(0.0);

        if a.has_value(attr::GRAPHIC) {
            if let Some(mut graphic) = a.get_drawable(attr::GRAPHIC)? {
                graphic.set_callback(Some(DrawableCallback::new(self.base.id(), res.invalidations().clone())));
                self.graphic = Some(graphic);
            }
        }

        self.invalidations = res.invalidations().clone();
        self.text_paint = TextPaint::new(res.typeface()).with_anti_alias(true);
        self.text_bounds = IntRect::default();
        self.base.mark_configured();

        log::debug!(
            "configured view {} from {} attributes (style: {:?})",
            self.base.id().0,
            a.len(),
            def_style
        );

        self.recompute_metrics();
        Ok(())
    }

    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let padding = self.base.padding();
        let (content_w, content_h) = self.desired_content();

        let size = Size::new(
            width.resolve(padding.horizontal().saturating_add(content_w), &self.options),
            height.resolve(padding.vertical().saturating_add(content_h), &self.options),
        );
        self.base.set_measured(size);
        size
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        let padding = self.base.padding();
        let height = self.base.height();
        let content_width = self.base.width().saturating_sub(padding.horizontal());
        let content_height = height.saturating_sub(padding.vertical());

        if let Some(graphic) = self.graphic.as_mut() {
            graphic.set_bounds(IntRect::new(
                padding.left,
                padding.top,
                padding.left.saturating_add(content_width),
                padding.top.saturating_add(content_height),
            ));
            graphic.draw(surface);
        }

        match self.label.as_deref().filter(|s| !s.is_empty()) {
            Some(label) => {
                self.text_paint.text_bounds(label, &mut self.text_bounds);
                let fm = self.text_paint.font_metrics_int();
                let baseline = baseline_y(height, &fm);
                surface.draw_text(label, padding.left as f32, baseline as f32, &self.text_paint);
            }
            None => self.text_bounds.set_empty(),
        }

        self.base.mark_drawn();
    }

    fn type_name(&self) -> &'static str {
        "LabeledGraphicView"
    }
}

impl Drop for LabeledGraphicView {
    fn drop(&mut self) {
        self.detach();
    }
}
