//! 文本度量模块 - 字体抽象与 fontdue 实现

use crate::error::{Error, Result};
use crate::geometry::IntRect;
use fontdue::{Font, FontSettings};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// 字体行度量（y 轴向下，基线为 0，top/ascent 为负）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub top: f32,
    pub ascent: f32,
    pub descent: f32,
    pub bottom: f32,
    pub leading: f32,
}

/// 整数行度量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetricsInt {
    pub top: i32,
    pub ascent: i32,
    pub descent: i32,
    pub bottom: i32,
    pub leading: i32,
}

impl From<FontMetrics> for FontMetricsInt {
    /// top 向下取整、bottom 向上取整，保证整数行高不小于浮点行高
    fn from(m: FontMetrics) -> Self {
        Self {
            top: m.top.floor() as i32,
            ascent: m.ascent.round() as i32,
            descent: m.descent.round() as i32,
            bottom: m.bottom.ceil() as i32,
            leading: m.leading.round() as i32,
        }
    }
}

/// 光栅化后的字形
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    /// 相对于基线上笔位置的像素边界
    pub bounds: IntRect,
    pub advance_width: f32,
    /// 覆盖率位图，行优先，宽度为 `bounds.width()`
    pub coverage: Vec<u8>,
}

/// 字体 - 文本度量与光栅化的宿主抽象
pub trait Typeface: Send + Sync {
    /// 单个字符的前进宽度
    fn advance_width(&self, ch: char, size: f32) -> f32;

    /// 给定字号的行度量
    fn line_metrics(&self, size: f32) -> FontMetrics;

    /// 单个字符的紧致像素边界，相对于基线上的笔位置
    fn glyph_bounds(&self, ch: char, size: f32) -> IntRect;

    fn rasterize(&self, ch: char, size: f32) -> Glyph;

    fn name(&self) -> &str {
        "typeface"
    }
}

/// fontdue 字体 - 支持 Emoji 回退与字形缓存
pub struct FontTypeface {
    name: String,
    main_font: Font,
    emoji_font: Option<Font>,
    /// (char, size*10) -> 字形
    cache: Mutex<HashMap<(char, u32), Glyph>>,
}

const FONT_SCALE: f32 = 40.0;

/// 系统字体候选路径
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const EMOJI_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Apple Color Emoji.ttc",
    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
];

fn load_font(data: &[u8]) -> Result<Font> {
    let settings = FontSettings {
        scale: FONT_SCALE,
        ..Default::default()
    };
    Font::from_bytes(data, settings).map_err(|e| Error::Font(e.to_string()))
}

impl FontTypeface {
    /// 从字体数据创建
    pub fn from_bytes(name: &str, font_data: &[u8]) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            main_font: load_font(font_data)?,
            emoji_font: None,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// 从文件路径加载字体
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_bytes(&path.display().to_string(), &data)
    }

    /// 依次尝试候选路径，然后尝试系统字体；同时加载 Emoji 回退字体
    pub fn load_first<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        let paths = candidates
            .iter()
            .map(|p| p.as_ref())
            .chain(SYSTEM_FONT_PATHS.iter().map(Path::new));

        let mut typeface = None;
        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(t) => {
                    log::info!("main font: {}", path.display());
                    typeface = Some(t);
                    break;
                }
                Err(e) => log::warn!("skipping font {}: {}", path.display(), e),
            }
        }
        let mut typeface = typeface.ok_or(Error::NoSystemFont)?;

        for path in EMOJI_FONT_PATHS.iter().map(Path::new) {
            if !path.exists() {
                continue;
            }
            if let Ok(font) = std::fs::read(path).map_err(Error::from).and_then(|d| load_font(&d)) {
                log::info!("emoji font: {}", path.display());
                typeface.emoji_font = Some(font);
                break;
            }
        }

        Ok(typeface)
    }

    /// 判断字符是否为 Emoji
    fn is_emoji(ch: char) -> bool {
        matches!(ch as u32,
            0x1F300..=0x1F9FF |
            0x2600..=0x26FF |
            0x2700..=0x27BF |
            0xFE00..=0xFE0F |
            0x1F000..=0x1F02F |
            0x1F0A0..=0x1F0FF |
            0x1F100..=0x1F1FF |
            0x1F200..=0x1F2FF |
            0x1FA00..=0x1FAFF
        )
    }

    fn font_for(&self, ch: char) -> &Font {
        if Self::is_emoji(ch) {
            self.emoji_font.as_ref().unwrap_or(&self.main_font)
        } else {
            &self.main_font
        }
    }
}

/// fontdue 的 ymin 是字形底边（y 轴向上）
fn bounds_of(metrics: &fontdue::Metrics) -> IntRect {
    let bottom = -metrics.ymin;
    let top = bottom - metrics.height as i32;
    IntRect::new(metrics.xmin, top, metrics.xmin + metrics.width as i32, bottom)
}

impl Typeface for FontTypeface {
    fn advance_width(&self, ch: char, size: f32) -> f32 {
        self.font_for(ch).metrics(ch, size).advance_width
    }

    fn line_metrics(&self, size: f32) -> FontMetrics {
        match self.main_font.horizontal_line_metrics(size) {
            // fontdue 不暴露 bbox，top/bottom 取 ascent/descent
            Some(lm) => FontMetrics {
                top: -lm.ascent,
                ascent: -lm.ascent,
                descent: -lm.descent,
                bottom: -lm.descent,
                leading: lm.line_gap,
            },
            None => FontMetrics {
                top: -size * 0.95,
                ascent: -size * 0.8,
                descent: size * 0.2,
                bottom: size * 0.25,
                leading: 0.0,
            },
        }
    }

    fn glyph_bounds(&self, ch: char, size: f32) -> IntRect {
        bounds_of(&self.font_for(ch).metrics(ch, size))
    }

    fn rasterize(&self, ch: char, size: f32) -> Glyph {
        let key = (ch, (size * 10.0) as u32);
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(glyph) = cache.get(&key) {
                return glyph.clone();
            }
        }

        // 光栅化较慢，不在锁内进行
        let (metrics, coverage) = self.font_for(ch).rasterize(ch, size);
        let glyph = Glyph {
            bounds: bounds_of(&metrics),
            advance_width: metrics.advance_width,
            coverage,
        };

        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(key, glyph.clone());
        glyph
    }

    fn name(&self) -> &str {
        &self.name
    }
}
