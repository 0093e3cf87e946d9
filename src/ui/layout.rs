//! 布局约束与布局驱动器

use super::component::Widget;
use super::drawable::InvalidationQueue;
use crate::canvas::Surface;
use crate::geometry::Size;

/// 父容器对单个轴的测量约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// 尺寸由父容器决定
    Exactly(i32),
    /// 尺寸上限
    AtMost(i32),
    /// 无约束，数值仅作参考
    Unspecified(i32),
}

impl MeasureSpec {
    pub fn size(&self) -> i32 {
        match *self {
            MeasureSpec::Exactly(s) | MeasureSpec::AtMost(s) | MeasureSpec::Unspecified(s) => s,
        }
    }

    /// 按约束决定最终尺寸。`AtMost` 默认不截断到上限
    pub fn resolve(&self, desired: i32, options: &MeasureOptions) -> i32 {
        match *self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) if options.clamp_to_at_most => desired.min(size),
            MeasureSpec::AtMost(_) | MeasureSpec::Unspecified(_) => desired,
        }
    }
}

/// 测量策略开关，默认保持原有行为
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasureOptions {
    /// `AtMost` 时把期望尺寸截断到上限
    pub clamp_to_at_most: bool,
    /// 内容尺寸至少为背景图的固有尺寸
    pub include_graphic_size: bool,
}

/// 布局驱动器 - 持有根控件，处理失效请求并驱动 measure → layout → draw
pub struct ViewRoot<W: Widget> {
    root: W,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
    invalidations: InvalidationQueue,
    frames: u64,
}

impl<W: Widget> ViewRoot<W> {
    pub fn new(root: W, invalidations: InvalidationQueue, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Self {
        Self {
            root,
            width_spec,
            height_spec,
            invalidations,
            frames: 0,
        }
    }

    pub fn root(&self) -> &W {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// 移除根控件
    pub fn into_root(self) -> W {
        self.root
    }

    /// 已绘制的帧数
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_constraints(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) {
        if self.width_spec != width_spec || self.height_spec != height_spec {
            self.width_spec = width_spec;
            self.height_spec = height_spec;
            self.root.base_mut().request_layout();
        }
    }

    /// 执行一次遍历，返回是否进行了绘制
    pub fn perform_traversal(&mut self, surface: &mut dyn Surface) -> bool {
        let root_id = self.root.id();
        if self.invalidations.take(root_id) {
            self.root.base_mut().invalidate();
        }

        if self.root.base().is_layout_requested() {
            let size: Size = self.root.measure(self.width_spec, self.height_spec);
            self.root.layout(size.width, size.height);
            log::debug!(
                "{} {} laid out at {}x{}",
                self.root.type_name(),
                root_id.0,
                size.width,
                size.height
            );
        }

        if !self.root.base().is_dirty() {
            return false;
        }

        self.root.draw(surface);
        self.frames += 1;
        true
    }
}
