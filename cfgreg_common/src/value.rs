//! Configuration values and typed conversions from stored text.
//!
//! Providers store everything as strings. [`ConfigValue`] is what callers
//! hand in (defaults, `set_value`); [`FromConfigStr`] is how stored text is
//! turned back into a typed value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::BOOL_STRINGS;
use crate::error::ConfigError;

/// A primitive value a configuration item can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Storage form: the text a provider persists for this value.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConfigValue {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Types that can be read back from stored configuration text.
pub trait FromConfigStr: Sized {
    /// Type label used in [`ConfigError::CouldNotParse`].
    const TYPE_NAME: &'static str;

    /// Parse `raw`; `None` if the text is not a valid value.
    fn from_config_str(raw: &str) -> Option<Self>;
}

impl FromConfigStr for String {
    const TYPE_NAME: &'static str = "string";

    fn from_config_str(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Base-10, optional leading sign.
impl FromConfigStr for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_config_str(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

/// Full double precision.
impl FromConfigStr for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_config_str(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromConfigStr for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_config_str(raw: &str) -> Option<Self> {
        let lowered = raw.to_ascii_lowercase();
        BOOL_STRINGS
            .iter()
            .find(|(spelling, _)| *spelling == lowered)
            .map(|(_, value)| *value)
    }
}

/// Convert stored text for `(section, option)` into `T`.
///
/// `section` and `option` only label the error.
pub fn convert<T: FromConfigStr>(
    raw: &str,
    section: &str,
    option: &str,
) -> Result<T, ConfigError> {
    T::from_config_str(raw).ok_or_else(|| ConfigError::CouldNotParse {
        value_type: T::TYPE_NAME,
        value: raw.to_string(),
        section: section.to_string(),
        option: option.to_string(),
    })
}
