//! 资源与声明式属性解析

use crate::error::{Error, Result};
use crate::text::Typeface;
use crate::ui::drawable::{BitmapDrawable, ColorDrawable, Drawable, InvalidationQueue};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

/// 声明式布局中写下的原始属性
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeMap<String, String>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 显示密度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayMetrics {
    /// dp → px
    pub density: f32,
    /// sp → px
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

impl DisplayMetrics {
    fn xdpi(&self) -> f32 {
        self.density * 160.0
    }

    /// 解析带单位的尺寸为像素
    pub fn parse_dimension(&self, value: &str) -> Option<f32> {
        let value = value.trim();
        let split = value
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(value.len());
        let (number, unit) = value.split_at(split);
        let number: f32 = number.trim().parse().ok()?;
        if !number.is_finite() {
            return None;
        }

        let scale = match unit {
            "" | "px" => 1.0,
            "dp" | "dip" => self.density,
            "sp" => self.scaled_density,
            "pt" => self.xdpi() / 72.0,
            "in" => self.xdpi(),
            "mm" => self.xdpi() / 25.4,
            _ => return None,
        };
        Some(number * scale)
    }
}

/// 命名样式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleDef {
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub items: AttributeSet,
}

/// 命名 Drawable 定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawableDef {
    Color { color: String },
    Bitmap { path: PathBuf },
}

/// 资源表 - 显示密度、样式、Drawable 与默认字体
pub struct Resources {
    display: DisplayMetrics,
    styles: HashMap<String, StyleDef>,
    drawables: HashMap<String, DrawableDef>,
    typeface: Arc<dyn Typeface>,
    invalidations: InvalidationQueue,
}

const DRAWABLE_PREFIX: &str = "@drawable/";
const FILE_PREFIX: &str = "file:";

impl Resources {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        Self {
            display: DisplayMetrics::default(),
            styles: HashMap::new(),
            drawables: HashMap::new(),
            typeface,
            invalidations: InvalidationQueue::new(),
        }
    }

    pub fn with_display(mut self, display: DisplayMetrics) -> Self {
        self.display = display;
        self
    }

    pub fn add_style(&mut self, name: &str, style: StyleDef) {
        self.styles.insert(name.to_string(), style);
    }

    pub fn add_drawable(&mut self, name: &str, def: DrawableDef) {
        self.drawables.insert(name.to_string(), def);
    }

    pub fn display(&self) -> &DisplayMetrics {
        &self.display
    }

    pub fn typeface(&self) -> Arc<dyn Typeface> {
        Arc::clone(&self.typeface)
    }

    /// 本资源表创建的视图共用的失效队列
    pub fn invalidations(&self) -> &InvalidationQueue {
        &self.invalidations
    }

    /// 合并属性：显式属性 > 样式链（子样式覆盖父样式）
    pub fn obtain_styled_attributes(
        &self,
        attrs: Option<&AttributeSet>,
        def_style: Option<&str>,
    ) -> Result<TypedArray<'_>> {
        let mut values = BTreeMap::new();

        if let Some(name) = def_style {
            for style in self.style_chain(name)?.into_iter().rev() {
                for (k, v) in style.items.iter() {
                    values.insert(k.to_string(), v.to_string());
                }
            }
        }

        if let Some(attrs) = attrs {
            for (k, v) in attrs.iter() {
                values.insert(k.to_string(), v.to_string());
            }
        }

        Ok(TypedArray { res: self, values })
    }

    /// 从指定样式到根样式
    fn style_chain(&self, name: &str) -> Result<Vec<&StyleDef>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(name);

        while let Some(current) = next {
            if !seen.insert(current) {
                return Err(Error::StyleCycle(current.to_string()));
            }
            let style = self
                .styles
                .get(current)
                .ok_or_else(|| Error::UnknownStyle(current.to_string()))?;
            chain.push(style);
            next = style.parent.as_deref();
        }
        Ok(chain)
    }

    /// 解析 Drawable 引用，每次返回新的实例
    pub fn load_drawable(&self, reference: &str) -> Result<Box<dyn Drawable>> {
        let reference = reference.trim();
        if let Some(name) = reference.strip_prefix(DRAWABLE_PREFIX) {
            return match self.drawables.get(name) {
                Some(DrawableDef::Color { color }) => {
                    let color = Color::parse(color)
                        .ok_or_else(|| Error::invalid_attribute(name, color))?;
                    Ok(Box::new(ColorDrawable::new(color)))
                }
                Some(DrawableDef::Bitmap { path }) => Ok(Box::new(BitmapDrawable::open(path)?)),
                None => Err(Error::UnknownDrawable(reference.to_string())),
            };
        }
        if let Some(path) = reference.strip_prefix(FILE_PREFIX) {
            return Ok(Box::new(BitmapDrawable::open(path)?));
        }
        match Color::parse(reference) {
            Some(color) => Ok(Box::new(ColorDrawable::new(color))),
            None => Err(Error::UnknownDrawable(reference.to_string())),
        }
    }
}

/// 已解析的属性表，提供带类型的读取
pub struct TypedArray<'a> {
    res: &'a Resources,
    values: BTreeMap<String, String>,
}

impl TypedArray<'_> {
    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    pub fn get_color(&self, name: &str, default: Color) -> Result<Color> {
        match self.values.get(name) {
            Some(v) => Color::parse(v).ok_or_else(|| Error::invalid_attribute(name, v)),
            None => Ok(default),
        }
    }

    pub fn get_dimension(&self, name: &str, default: f32) -> Result<f32> {
        match self.values.get(name) {
            Some(v) => self
                .res
                .display
                .parse_dimension(v)
                .ok_or_else(|| Error::invalid_attribute(name, v)),
            None => Ok(default),
        }
    }

    /// 四舍五入为整数像素；非零值至少为 1 像素
    pub fn get_dimension_pixel_size(&self, name: &str, default: i32) -> Result<i32> {
        if !self.has_value(name) {
            return Ok(default);
        }
        let px = self.get_dimension(name, 0.0)?;
        let rounded = (px + 0.5 * px.signum()) as i32;
        Ok(match rounded {
            0 if px > 0.0 => 1,
            0 if px < 0.0 => -1,
            r => r,
        })
    }

    pub fn get_drawable(&self, name: &str) -> Result<Option<Box<dyn Drawable>>> {
        match self.values.get(name) {
            Some(v) => self.res.load_drawable(v).map(Some),
            None => Ok(None),
        }
    }
}
