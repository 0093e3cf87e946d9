//! UI 组件系统

mod component;
pub mod drawable;
mod labeled_graphic;
mod layout;

pub use component::{attr as view_attr, ViewBase, ViewId, Widget};
pub use drawable::{BitmapDrawable, ColorDrawable, Drawable, DrawableCallback, InvalidationQueue};
pub use labeled_graphic::{attr, baseline_y, LabeledGraphicView};
pub use layout::{MeasureOptions, MeasureSpec, ViewRoot};
