//! 界面语言
//!
//! 只支持英语与西班牙语，其他语言一律回退到西班牙语。

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    En,
    #[default]
    Es,
}

impl Locale {
    /// 从 BCP 47 标签（如 `en-US`、`es`）解析，只看主语言子标签
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Locale::En,
            _ => Locale::Es,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}
