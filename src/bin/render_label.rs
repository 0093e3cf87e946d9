//! 渲染单个 LabeledGraphicView 到 PNG
//!
//! 用法: render-label [layout.json] [--config config.toml] [--out label.png] [--width N] [--height N]

use labeled_graphic::config::{LayoutDescription, ToolkitConfig};
use labeled_graphic::resources::AttributeSet;
use labeled_graphic::ui::{attr, LabeledGraphicView, MeasureSpec, ViewRoot, Widget};
use labeled_graphic::{Canvas, Color, FontTypeface};
use std::env;
use std::sync::Arc;

struct Args {
    layout: Option<String>,
    config: String,
    out: String,
    width: i32,
    height: i32,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args {
        layout: None,
        config: "config.toml".to_string(),
        out: "label.png".to_string(),
        width: 375,
        height: 120,
    };

    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next().ok_or("--config needs a path")?,
            "--out" => args.out = it.next().ok_or("--out needs a path")?,
            "--width" => args.width = it.next().ok_or("--width needs a value")?.parse()?,
            "--height" => args.height = it.next().ok_or("--height needs a value")?.parse()?,
            _ => args.layout = Some(arg),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = ToolkitConfig::load(&args.config)?;
    let typeface = FontTypeface::load_first(config.fonts.as_slice())?;
    let res = config.into_resources(Arc::new(typeface));

    let layout = match &args.layout {
        Some(path) => LayoutDescription::load(path)?,
        None => LayoutDescription {
            style: None,
            attributes: AttributeSet::new()
                .with(attr::LABEL, "Hello, label")
                .with(attr::LABEL_COLOR, "#d32f2f")
                .with(attr::LABEL_SIZE, "24sp")
                .with(attr::GRAPHIC, "#fff3e0")
                .with("padding", "8dp"),
        },
    };

    let view = match &layout.style {
        Some(style) => LabeledGraphicView::with_style(&res, &layout.attributes, style)?,
        None => LabeledGraphicView::from_attributes(&res, &layout.attributes)?,
    };

    let mut root = ViewRoot::new(
        view,
        res.invalidations().clone(),
        MeasureSpec::AtMost(args.width),
        MeasureSpec::AtMost(args.height),
    );

    let mut canvas = Canvas::new(args.width.max(1) as u32, args.height.max(1) as u32);
    canvas.clear(Color::WHITE);
    root.perform_traversal(&mut canvas);

    let measured = root.root().base().measured();
    log::info!("measured {}x{}", measured.width, measured.height);

    canvas.save_png(&args.out)?;
    log::info!("rendered to {}", args.out);
    Ok(())
}
