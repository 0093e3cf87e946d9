//! 错误类型

use thiserror::Error;

/// 控件库错误
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load font: {0}")]
    Font(String),

    #[error("no usable system font found")]
    NoSystemFont,

    #[error("image decode failed")]
    Image(#[from] image::ImageError),

    #[error("error reading file")]
    Io(#[from] std::io::Error),

    #[error("invalid value {value:?} for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },

    #[error("unknown style `{0}`")]
    UnknownStyle(String),

    #[error("style `{0}` inherits from itself")]
    StyleCycle(String),

    #[error("unknown drawable `{0}`")]
    UnknownDrawable(String),

    #[error("config parse failed")]
    Config(#[from] toml::de::Error),

    #[error("layout description parse failed")]
    Layout(#[from] serde_json::Error),

    #[error("view {0} is already configured")]
    AlreadyConfigured(u64),
}

impl Error {
    pub(crate) fn invalid_attribute(name: &str, value: &str) -> Self {
        Error::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
