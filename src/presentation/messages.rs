// User-facing strings
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn fetching(&self) -> &'static str {
        match self {
            Locale::En => "Fetching translation...",
            Locale::Zh => "正在获取翻译...",
        }
    }

    pub fn no_info_found(&self) -> &'static str {
        match self {
            Locale::En => "No translation found.",
            Locale::Zh => "没有找到翻译。",
        }
    }

    pub fn fetch_error(&self) -> &'static str {
        match self {
            Locale::En => "Failed to fetch translation.",
            Locale::Zh => "获取翻译失败。",
        }
    }
}
