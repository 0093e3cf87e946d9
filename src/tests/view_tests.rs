//! LabeledGraphicView 单元测试
//! 覆盖属性解析、文本度量、绘制顺序与基线

use super::support::{stub_resources, Op, RecordingSurface};
use crate::resources::{AttributeSet, DrawableDef, StyleDef};
use crate::text::FontMetricsInt;
use crate::ui::{attr, baseline_y, ColorDrawable, Drawable, LabeledGraphicView, Widget};
use crate::{Color, Error, IntRect, Padding, Rect};

fn hello_view() -> LabeledGraphicView {
    let res = stub_resources();
    let attrs = AttributeSet::new()
        .with(attr::LABEL, "Hi")
        .with(attr::LABEL_SIZE, "20")
        .with("paddingLeft", "4")
        .with("paddingRight", "4");
    LabeledGraphicView::from_attributes(&res, &attrs).unwrap()
}

#[test]
fn test_defaults_from_code() {
    let res = stub_resources();
    let view = LabeledGraphicView::new(&res).unwrap();

    assert_eq!(view.label(), None);
    assert_eq!(view.label_color(), Color::RED);
    assert_eq!(view.label_size(), 0.0);
    assert!(view.graphic().is_none());
    assert!(view.text_paint().anti_alias);
    assert_eq!(view.measured_text_width(), 0.0);
    assert_eq!(view.measured_text_height(), 0.0);
}

#[test]
fn test_attributes_resolved() {
    let res = stub_resources();
    let attrs = AttributeSet::new()
        .with(attr::LABEL, "Hello")
        .with(attr::LABEL_COLOR, "#0000ff")
        .with(attr::LABEL_SIZE, "16px")
        .with(attr::GRAPHIC, "#00ff00")
        .with("padding", "3");
    let view = LabeledGraphicView::from_attributes(&res, &attrs).unwrap();

    assert_eq!(view.label(), Some("Hello"));
    assert_eq!(view.label_color(), Color::BLUE);
    assert_eq!(view.label_size(), 16.0);
    assert_eq!(view.padding(), Padding::all(3));
    assert_eq!(view.measured_text_width(), 40.0);
    assert_eq!(view.measured_text_height(), 20.0);

    let graphic = view.graphic().unwrap();
    assert_eq!(graphic.type_name(), "ColorDrawable");
    assert_eq!(graphic.callback().map(|cb| cb.view), Some(view.id()));
}

#[test]
fn test_style_supplies_defaults() {
    let mut res = stub_resources();
    res.add_style("Caption", StyleDef {
        parent: None,
        items: AttributeSet::new()
            .with(attr::LABEL_COLOR, "#00ff00")
            .with(attr::LABEL_SIZE, "12")
            .with(attr::GRAPHIC, "@drawable/badge"),
    });
    res.add_drawable("badge", DrawableDef::Color { color: "#fafafa".to_string() });

    let attrs = AttributeSet::new().with(attr::LABEL, "x").with(attr::LABEL_SIZE, "30");
    let view = LabeledGraphicView::with_style(&res, &attrs, "Caption").unwrap();

    assert_eq!(view.label_color(), Color::GREEN);
    assert_eq!(view.label_size(), 30.0);
    assert!(view.graphic().is_some());
}

#[test]
fn test_invalid_attribute_is_error() {
    let res = stub_resources();
    let attrs = AttributeSet::new().with(attr::LABEL_COLOR, "not-a-color");
    let err = LabeledGraphicView::from_attributes(&res, &attrs).err();
    assert!(matches!(err, Some(Error::InvalidAttribute { ref name, .. }) if name == attr::LABEL_COLOR));

    let attrs = AttributeSet::new().with(attr::GRAPHIC, "@drawable/missing");
    let err = LabeledGraphicView::from_attributes(&res, &attrs).err();
    assert!(matches!(err, Some(Error::UnknownDrawable(_))));
}

#[test]
fn test_configure_runs_once() {
    let res = stub_resources();
    let mut view = LabeledGraphicView::new(&res).unwrap();
    let err = view.configure(&res, None, None).err();
    assert!(matches!(err, Some(Error::AlreadyConfigured(id)) if id == view.id().0));
}

#[test]
fn test_setters_recompute_metrics_immediately() {
    let mut view = hello_view();
    assert_eq!(view.measured_text_width(), 20.0);
    assert_eq!(view.measured_text_height(), 25.0);

    view.set_label_size(40.0);
    assert_eq!(view.text_paint().text_size, 40.0);
    assert_eq!(view.measured_text_width(), 40.0);
    assert_eq!(view.measured_text_height(), 50.0);

    view.set_label_color(Color::BLUE);
    assert_eq!(view.text_paint().color, Color::BLUE);

    view.set_label(Some("Wider".to_string()));
    assert_eq!(view.measured_text_width(), 100.0);
}

#[test]
fn test_setters_invalidate() {
    let mut view = hello_view();
    let mut surface = RecordingSurface::default();
    view.layout(100, 40);
    view.draw(&mut surface);
    assert!(!view.base().is_dirty());
    assert!(!view.base().is_layout_requested());

    view.set_label_color(Color::BLACK);
    assert!(view.base().is_dirty());
    assert!(!view.base().is_layout_requested());

    view.draw(&mut surface);
    view.set_label_size(12.0);
    assert!(view.base().is_dirty());
    assert!(view.base().is_layout_requested());
}

#[test]
fn test_negative_size_clamped() {
    let mut view = hello_view();
    view.set_label_size(-5.0);
    assert_eq!(view.label_size(), 0.0);
    assert_eq!(view.measured_text_width(), 0.0);
}

#[test]
fn test_absent_or_empty_label_has_zero_metrics() {
    let mut view = hello_view();
    view.set_label(None);
    assert_eq!(view.measured_text_width(), 0.0);
    assert_eq!(view.measured_text_height(), 0.0);

    view.set_label(Some(String::new()));
    assert_eq!(view.measured_text_width(), 0.0);
    assert_eq!(view.measured_text_height(), 0.0);
}

#[test]
fn test_absent_label_draws_only_graphic() {
    let mut view = hello_view();
    view.set_label(None);
    view.set_graphic(Some(Box::new(ColorDrawable::new(Color::GRAY))));
    view.layout(50, 30);

    let mut surface = RecordingSurface::default();
    view.draw(&mut surface);

    assert_eq!(surface.ops.len(), 1);
    assert!(surface.texts().is_empty());
    assert!(view.text_bounds().is_empty());
}

#[test]
fn test_graphic_painted_before_text() {
    let mut view = hello_view();
    view.set_graphic(Some(Box::new(ColorDrawable::new(Color::GRAY))));
    view.layout(100, 100);

    let mut surface = RecordingSurface::default();
    view.draw(&mut surface);

    assert_eq!(surface.ops.len(), 2);
    assert_eq!(surface.ops[0], Op::Fill(Rect::new(4.0, 0.0, 92.0, 100.0), Color::GRAY));
    match &surface.ops[1] {
        Op::Text { text, x, baseline, color, size } => {
            assert_eq!(text, "Hi");
            assert_eq!(*x, 4.0);
            assert_eq!(*baseline, 57.0);
            assert_eq!(*color, Color::RED);
            assert_eq!(*size, 20.0);
        }
        other => panic!("expected text, got {:?}", other),
    }

    assert_eq!(view.graphic().unwrap().bounds(), IntRect::new(4, 0, 96, 100));
}

#[test]
fn test_text_bounds_after_draw() {
    let mut view = hello_view();
    view.layout(100, 40);
    view.draw(&mut RecordingSurface::default());
    // 两个字形各宽 10，高 14
    assert_eq!(view.text_bounds(), IntRect::new(0, -14, 20, 0));
}

#[test]
fn test_baseline_formula() {
    let fm = FontMetricsInt { top: -20, bottom: 5, ..Default::default() };
    assert_eq!(baseline_y(100, &fm), 57);

    let odd = FontMetricsInt { top: -19, bottom: 6, ..Default::default() };
    assert_eq!(baseline_y(41, &odd), 20 + (12 - 6));
}

#[test]
fn test_set_graphic_moves_callback() {
    let mut view = hello_view();
    let old = view.set_graphic(Some(Box::new(ColorDrawable::new(Color::RED))));
    assert!(old.is_none());

    let old = view.set_graphic(Some(Box::new(ColorDrawable::new(Color::BLUE)))).unwrap();
    assert!(old.callback().is_none());
    assert_eq!(view.graphic().unwrap().callback().map(|cb| cb.view), Some(view.id()));

    let taken = view.take_graphic().unwrap();
    assert!(taken.callback().is_none());
    assert!(view.graphic().is_none());
}

#[test]
fn test_detach_releases_graphic() {
    let mut view = hello_view();
    view.set_graphic(Some(Box::new(ColorDrawable::new(Color::RED))));
    view.detach();
    assert!(view.graphic().is_none());
}

#[test]
fn test_id_attribute_sets_tag() {
    let res = stub_resources();
    let attrs = AttributeSet::new().with("id", "title").with(attr::LABEL, "Hi");
    let view = LabeledGraphicView::from_attributes(&res, &attrs).unwrap();
    assert_eq!(view.base().tag(), Some("title"));
    assert_eq!(LabeledGraphicView::new(&res).unwrap().base().tag(), None);
}
