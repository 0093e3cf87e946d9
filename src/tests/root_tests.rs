//! 布局驱动器单元测试
//! 覆盖 measure → layout → draw 遍历与 Drawable 失效传递

use super::support::{stub_resources, Op, RecordingSurface};
use crate::resources::AttributeSet;
use crate::ui::{attr, ColorDrawable, Drawable, LabeledGraphicView, MeasureSpec, ViewId, ViewRoot, Widget};
use crate::Color;

fn root_with_graphic() -> ViewRoot<LabeledGraphicView> {
    let res = stub_resources();
    let attrs = AttributeSet::new()
        .with(attr::LABEL, "Hi")
        .with(attr::LABEL_SIZE, "20")
        .with(attr::GRAPHIC, "#cccccc");
    let view = LabeledGraphicView::from_attributes(&res, &attrs).unwrap();
    ViewRoot::new(view, res.invalidations().clone(), MeasureSpec::AtMost(300), MeasureSpec::Exactly(60))
}

#[test]
fn test_first_traversal_measures_and_draws() {
    let mut root = root_with_graphic();
    let mut surface = RecordingSurface::default();

    assert!(root.perform_traversal(&mut surface));
    assert_eq!(root.root().base().width(), 20);
    assert_eq!(root.root().base().height(), 60);
    assert_eq!(surface.ops.len(), 2);
    assert_eq!(root.frames(), 1);

    // 无失效时不重绘
    assert!(!root.perform_traversal(&mut surface));
    assert_eq!(surface.ops.len(), 2);
}

#[test]
fn test_drawable_invalidation_reaches_view() {
    let mut root = root_with_graphic();
    let mut surface = RecordingSurface::default();
    root.perform_traversal(&mut surface);

    // 通过回调请求重绘，视图本身没有被修改
    root.root().graphic().unwrap().invalidate_self();
    assert!(!root.root().base().is_dirty());

    assert!(root.perform_traversal(&mut surface));
    assert_eq!(root.frames(), 2);
}

#[test]
fn test_replaced_drawable_reports_through_new_callback() {
    let mut root = root_with_graphic();
    let mut surface = RecordingSurface::default();
    root.perform_traversal(&mut surface);

    let old = root.root_mut().set_graphic(Some(Box::new(ColorDrawable::new(Color::BLUE)))).unwrap();
    root.perform_traversal(&mut surface);

    // 旧 Drawable 已解除回调，不再触发重绘
    old.invalidate_self();
    assert!(!root.perform_traversal(&mut surface));

    surface.ops.clear();
    root.root().graphic().unwrap().invalidate_self();
    assert!(root.perform_traversal(&mut surface));
    assert!(matches!(surface.ops[0], Op::Fill(_, Color::BLUE)));
}

#[test]
fn test_constraint_change_relayouts() {
    let mut root = root_with_graphic();
    let mut surface = RecordingSurface::default();
    root.perform_traversal(&mut surface);

    root.set_constraints(MeasureSpec::Exactly(120), MeasureSpec::Exactly(60));
    assert!(root.perform_traversal(&mut surface));
    assert_eq!(root.root().base().width(), 120);
}

#[test]
fn test_label_change_relayouts() {
    let mut root = root_with_graphic();
    let mut surface = RecordingSurface::default();
    root.perform_traversal(&mut surface);

    root.root_mut().set_label(Some("Hello".to_string()));
    assert!(root.perform_traversal(&mut surface));
    assert_eq!(root.root().base().width(), 50);
}

#[test]
fn test_foreign_invalidation_ignored() {
    let res = stub_resources();
    let view = LabeledGraphicView::new(&res).unwrap();
    let mut root = ViewRoot::new(view, res.invalidations().clone(), MeasureSpec::Exactly(10), MeasureSpec::Exactly(10));
    let mut surface = RecordingSurface::default();
    root.perform_traversal(&mut surface);

    res.invalidations().push(ViewId(u64::MAX));
    assert!(!root.perform_traversal(&mut surface));
    assert!(res.invalidations().contains(ViewId(u64::MAX)));
}

#[test]
fn test_shared_queue_routes_to_owning_root() {
    let res = stub_resources();
    let attrs = AttributeSet::new().with(attr::LABEL, "Hi").with(attr::GRAPHIC, "#cccccc");
    let make = || {
        let view = LabeledGraphicView::from_attributes(&res, &attrs).unwrap();
        ViewRoot::new(view, res.invalidations().clone(), MeasureSpec::Exactly(40), MeasureSpec::Exactly(20))
    };
    let mut a = make();
    let mut b = make();
    let mut surface = RecordingSurface::default();
    a.perform_traversal(&mut surface);
    b.perform_traversal(&mut surface);

    // a 先遍历，不能吞掉 b 的请求
    b.root().graphic().unwrap().invalidate_self();
    assert!(!a.perform_traversal(&mut surface));
    assert!(b.perform_traversal(&mut surface));
    assert!(res.invalidations().is_empty());
}
