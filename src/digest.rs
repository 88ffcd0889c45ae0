//! Digest Grouping
//!
//! Turns a flat payload into ordered sections and the chip values offered
//! by the filter bar.

use std::collections::{BTreeSet, HashMap};

use facet_filter::{Chip, FilterEngine, FilterItem, Section};

use crate::models::{DigestItem, DigestPayload};

/// A section ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct DigestSection {
    pub key: String,
    pub title: String,
    pub intro: String,
    pub items: Vec<DigestItem>,
}

/// Renderable digest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Digest {
    pub edition_title: String,
    pub sections: Vec<DigestSection>,
    /// Sorted, unique
    pub subreddits: Vec<String>,
    /// Sorted, unique
    pub tools: Vec<String>,
}

impl Digest {
    /// Group items into configured sections.
    ///
    /// Sections follow the payload's configured order; items whose section
    /// is not configured are dropped. Items keep `display_order` order.
    /// Chip values are taken from every item, dropped ones included.
    pub fn from_payload(payload: DigestPayload) -> Self {
        // Chip values cover every item, including those in unconfigured sections
        let mut subreddits = BTreeSet::new();
        let mut tools = BTreeSet::new();
        for item in &payload.items {
            if let Some(sub) = &item.subreddit {
                subreddits.insert(sub.clone());
            }
            tools.extend(item.tool_tags.iter().filter(|t| !t.is_empty()).cloned());
        }

        let mut by_section: HashMap<String, Vec<DigestItem>> = HashMap::new();
        for item in payload.items {
            by_section.entry(item.section.clone()).or_default().push(item);
        }

        let mut sections = Vec::new();
        for meta in payload.sections {
            let Some(mut items) = by_section.remove(&meta.key) else {
                continue;
            };
            items.sort_by_key(|i| i.display_order);
            sections.push(DigestSection {
                title: meta.title.unwrap_or_else(|| meta.key.clone()),
                key: meta.key,
                intro: meta.intro,
                items,
            });
        }

        if !by_section.is_empty() {
            let dropped: Vec<_> = by_section.keys().collect();
            log::debug!("[DIGEST] Dropped unconfigured sections: {:?}", dropped);
        }

        Self {
            edition_title: payload.edition_title,
            sections,
            subreddits: subreddits.into_iter().collect(),
            tools: tools.into_iter().collect(),
        }
    }

    /// Items in display order, across all sections
    pub fn items(&self) -> impl Iterator<Item = &DigestItem> {
        self.sections.iter().flat_map(|s| &s.items)
    }

    /// All chips, subreddits first, all inactive
    pub fn chips(&self) -> Vec<Chip> {
        self.subreddits
            .iter()
            .map(Chip::subreddit)
            .chain(self.tools.iter().map(Chip::tool))
            .collect()
    }

    /// Engine whose item indices follow `items()` and section indices follow `sections`
    pub fn engine(&self) -> FilterEngine {
        let items = self
            .items()
            .map(|i| FilterItem {
                subreddit: i.subreddit.clone(),
                tools: i.tool_tags.iter().filter(|t| !t.is_empty()).cloned().collect(),
            })
            .collect();

        let mut next = 0;
        let sections = self
            .sections
            .iter()
            .map(|s| {
                let range = next..next + s.items.len();
                next = range.end;
                Section::new(range.collect())
            })
            .collect();

        FilterEngine::new(self.chips(), items, sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionMeta;

    fn make_item(id: u32, section: &str, order: i32, sub: &str, tools: &[&str]) -> DigestItem {
        DigestItem {
            id,
            section: section.to_string(),
            display_order: order,
            headline: format!("Item {}", id),
            blurb: String::new(),
            subreddit: Some(sub.to_string()),
            tool_tags: tools.iter().map(|t| t.to_string()).collect(),
            permalink: None,
        }
    }

    fn meta(key: &str, title: Option<&str>) -> SectionMeta {
        SectionMeta {
            key: key.to_string(),
            title: title.map(str::to_string),
            intro: String::new(),
        }
    }

    fn payload() -> DigestPayload {
        DigestPayload {
            edition_title: "Daily".to_string(),
            items: vec![
                make_item(1, "tips", 1, "ClaudeAI", &["claude-code"]),
                make_item(2, "news", 0, "cursor", &["cursor", "claude-code"]),
                make_item(3, "tips", 0, "ChatGPTCoding", &[]),
                make_item(4, "misc", 0, "ignored", &["ignored-tool"]),
            ],
            sections: vec![meta("news", Some("Top News")), meta("tips", None)],
        }
    }

    #[test]
    fn test_sections_follow_config_order() {
        let digest = Digest::from_payload(payload());
        let keys: Vec<_> = digest.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["news", "tips"]);
        assert_eq!(digest.sections[0].title, "Top News");
        assert_eq!(digest.sections[1].title, "tips");
    }

    #[test]
    fn test_items_sorted_by_display_order() {
        let digest = Digest::from_payload(payload());
        let ids: Vec<_> = digest.sections[1].items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_chip_values_sorted_unique_and_include_dropped_sections() {
        let digest = Digest::from_payload(payload());
        assert_eq!(
            digest.subreddits,
            vec!["ChatGPTCoding", "ClaudeAI", "cursor", "ignored"]
        );
        assert_eq!(digest.tools, vec!["claude-code", "cursor", "ignored-tool"]);
        assert_eq!(digest.chips().len(), 7);
        assert!(digest.items().all(|i| i.section != "misc"));
    }

    #[test]
    fn test_chip_values_from_unconfigured_section() {
        let payload = DigestPayload {
            edition_title: String::new(),
            items: vec![
                make_item(1, "news", 0, "r1", &["x"]),
                make_item(2, "misc", 0, "r2", &["y"]),
            ],
            sections: vec![meta("news", None)],
        };
        let digest = Digest::from_payload(payload);
        assert_eq!(digest.subreddits, vec!["r1", "r2"]);
        assert_eq!(digest.tools, vec!["x", "y"]);
        assert_eq!(digest.items().count(), 1);
    }

    #[test]
    fn test_engine_indices_follow_display_order() {
        let digest = Digest::from_payload(payload());
        let mut engine = digest.engine();
        assert_eq!(engine.sections()[0].items, vec![0]);
        assert_eq!(engine.sections()[1].items, vec![1, 2]);

        // chips 0..4 are subreddits, chip 4 = tool "claude-code"
        assert_eq!(engine.chips()[4], Chip::tool("claude-code"));
        let vis = engine.toggle(4).unwrap();
        let ids: Vec<_> = digest
            .items()
            .enumerate()
            .filter(|(i, _)| vis.is_item_visible(*i))
            .map(|(_, item)| item.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(vis.is_section_visible(0));
        assert!(vis.is_section_visible(1));
    }

    #[test]
    fn test_empty_payload() {
        let digest = Digest::from_payload(DigestPayload::default());
        assert!(digest.sections.is_empty());
        assert!(digest.engine().apply_filters().items.is_empty());
    }
}
