//! Page Contract
//!
//! Selectors, attribute and class names shared with the server-rendered
//! page. Defaults match the digest template; a page may override any field
//! with an embedded `<script id="digest-filter-config" type="application/json">`.

use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::error::{AppError, AppResult};

/// Element id of the optional JSON override
pub const CONFIG_SCRIPT_ID: &str = "digest-filter-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContract {
    pub chip_selector: String,
    pub item_selector: String,
    pub section_selector: String,
    /// Attribute carrying the chip's dimension ("subreddit", "tool")
    pub filter_attr: String,
    pub value_attr: String,
    pub subreddit_attr: String,
    /// Comma-separated tool list
    pub tools_attr: String,
    pub active_class: String,
    pub hidden_class: String,
    /// Script element holding a JSON digest payload, if the page ships one
    pub digest_data_id: String,
}

impl Default for PageContract {
    fn default() -> Self {
        Self {
            chip_selector: ".chip[data-filter]".to_string(),
            item_selector: ".newsletter-item".to_string(),
            section_selector: ".newsletter-section".to_string(),
            filter_attr: "data-filter".to_string(),
            value_attr: "data-value".to_string(),
            subreddit_attr: "data-subreddit".to_string(),
            tools_attr: "data-tools".to_string(),
            active_class: "active".to_string(),
            hidden_class: "hidden".to_string(),
            digest_data_id: "digest-data".to_string(),
        }
    }
}

impl PageContract {
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(AppError::Config)
    }

    /// Defaults, overridden by the page's embedded config if present
    pub fn load(document: &Document) -> AppResult<Self> {
        match document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|el| el.text_content())
        {
            Some(text) if !text.trim().is_empty() => {
                log::debug!("[BOOT] Using embedded page contract");
                Self::from_json(&text)
            }
            _ => Ok(Self::default()),
        }
    }
}
