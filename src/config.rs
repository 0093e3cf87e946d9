//! 工具包配置与布局描述

use crate::error::Result;
use crate::resources::{AttributeSet, DisplayMetrics, DrawableDef, Resources, StyleDef};
use crate::text::Typeface;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// TOML 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub display: DisplayMetrics,
    /// 优先尝试的字体文件，找不到时回退到系统字体
    pub fonts: Vec<PathBuf>,
    pub styles: HashMap<String, StyleDef>,
    pub drawables: HashMap<String, DrawableDef>,
}

impl ToolkitConfig {
    /// 读取配置文件；文件不存在时使用默认值
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("loading config from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 构建资源表
    pub fn into_resources(self, typeface: Arc<dyn Typeface>) -> Resources {
        let mut res = Resources::new(typeface).with_display(self.display);
        for (name, style) in self.styles {
            res.add_style(&name, style);
        }
        for (name, def) in self.drawables {
            res.add_drawable(&name, def);
        }
        res
    }
}

/// JSON 布局描述中的单个视图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDescription {
    pub style: Option<String>,
    pub attributes: AttributeSet,
}

impl LayoutDescription {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
