//! Frontend Models
//!
//! Digest payload shipped by the server as embedded JSON.

use serde::{Deserialize, Serialize};

/// One newsletter entry (matches the server's newsletter item + post fields)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestItem {
    pub id: u32,
    /// Section key, e.g. "top_stories"
    pub section: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub headline: String,
    /// Markdown blurb
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub tool_tags: Vec<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

/// Configured section, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMeta {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub intro: String,
}

/// Whole digest as embedded in the page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigestPayload {
    #[serde(default)]
    pub edition_title: String,
    #[serde(default)]
    pub items: Vec<DigestItem>,
    #[serde(default)]
    pub sections: Vec<SectionMeta>,
}
