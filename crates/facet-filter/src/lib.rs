//! Facet Filter
//!
//! Resolves which digest items and sections are visible from the set of
//! active filter chips.
//!
//! Values within one dimension are OR-ed, dimensions are AND-ed, and a
//! dimension with no active chip places no constraint at all.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("no chip at index {0}")]
    UnknownChip(usize),
}

// ========================
// Model
// ========================

/// Filter dimension a chip belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterKind {
    Subreddit,
    Tool,
    /// Dimension not known to the engine; its chips toggle but never filter
    Other(String),
}

impl FilterKind {
    pub fn as_str(&self) -> &str {
        match self {
            FilterKind::Subreddit => "subreddit",
            FilterKind::Tool => "tool",
            FilterKind::Other(name) => name,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "subreddit" => FilterKind::Subreddit,
            "tool" => FilterKind::Tool,
            other => FilterKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FilterKind {
    fn from(s: String) -> Self {
        FilterKind::parse(&s)
    }
}

impl From<FilterKind> for String {
    fn from(kind: FilterKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One clickable facet value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub kind: FilterKind,
    pub value: String,
    #[serde(default)]
    pub active: bool,
}

impl Chip {
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            active: false,
        }
    }

    pub fn subreddit(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Subreddit, value)
    }

    pub fn tool(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Tool, value)
    }
}

/// Facet data of one digest entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItem {
    pub subreddit: Option<String>,
    #[serde(default)]
    pub tools: BTreeSet<String>,
}

impl FilterItem {
    pub fn new<I, S>(subreddit: impl Into<String>, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subreddit: Some(subreddit.into()),
            tools: tools.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from raw attribute values as they appear in page markup.
    pub fn from_attrs(subreddit: Option<String>, tools: Option<&str>) -> Self {
        Self {
            subreddit,
            tools: parse_tools(tools.unwrap_or_default()),
        }
    }
}

/// Split a comma-separated tool list, discarding empty entries
pub fn parse_tools(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Group of items, by index into the engine's item list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub items: Vec<usize>,
}

impl Section {
    pub fn new(items: Vec<usize>) -> Self {
        Self { items }
    }
}

// ========================
// Resolution
// ========================

/// Active values per dimension, snapshot of one pass
#[derive(Debug, Clone, Default)]
pub struct ActiveFilters<'a> {
    pub subreddits: HashSet<&'a str>,
    pub tools: HashSet<&'a str>,
}

impl ActiveFilters<'_> {
    pub fn is_empty(&self) -> bool {
        self.subreddits.is_empty() && self.tools.is_empty()
    }

    pub fn matches(&self, item: &FilterItem) -> bool {
        let show_by_sub = self.subreddits.is_empty()
            || item
                .subreddit
                .as_deref()
                .is_some_and(|s| self.subreddits.contains(s));
        let show_by_tool = self.tools.is_empty()
            || item.tools.iter().any(|t| self.tools.contains(t.as_str()));
        show_by_sub && show_by_tool
    }
}

/// Result of a filter pass, parallel to the engine's items and sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pub items: Vec<bool>,
    pub sections: Vec<bool>,
}

impl Visibility {
    pub fn is_item_visible(&self, index: usize) -> bool {
        self.items.get(index).copied().unwrap_or(false)
    }

    pub fn is_section_visible(&self, index: usize) -> bool {
        self.sections.get(index).copied().unwrap_or(false)
    }

    pub fn visible_items(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|v| **v).count()
    }
}

/// Owns the chips, items and sections of one page
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    chips: Vec<Chip>,
    items: Vec<FilterItem>,
    sections: Vec<Section>,
}

impl FilterEngine {
    pub fn new(chips: Vec<Chip>, items: Vec<FilterItem>, sections: Vec<Section>) -> Self {
        Self {
            chips,
            items,
            sections,
        }
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_active(&self, chip: usize) -> bool {
        self.chips.get(chip).is_some_and(|c| c.active)
    }

    /// Values of every active chip of the given dimension
    pub fn active_values(&self, kind: &FilterKind) -> HashSet<&str> {
        self.chips
            .iter()
            .filter(|c| c.active && &c.kind == kind)
            .map(|c| c.value.as_str())
            .collect()
    }

    pub fn active_filters(&self) -> ActiveFilters<'_> {
        ActiveFilters {
            subreddits: self.active_values(&FilterKind::Subreddit),
            tools: self.active_values(&FilterKind::Tool),
        }
    }

    /// Full recompute of item and section visibility
    pub fn apply_filters(&self) -> Visibility {
        let active = self.active_filters();
        let items: Vec<bool> = self.items.iter().map(|item| active.matches(item)).collect();

        // A section index pointing past the item list counts as hidden
        let sections = self
            .sections
            .iter()
            .map(|s| s.items.iter().any(|&i| items.get(i).copied().unwrap_or(false)))
            .collect();

        let visibility = Visibility { items, sections };
        log::debug!(
            "[FILTER] subs={} tools={} -> {}/{} items visible",
            active.subreddits.len(),
            active.tools.len(),
            visibility.visible_count(),
            self.items.len()
        );
        visibility
    }

    /// Flip one chip and recompute
    pub fn toggle(&mut self, chip: usize) -> Result<Visibility, FilterError> {
        let target = self
            .chips
            .get_mut(chip)
            .ok_or(FilterError::UnknownChip(chip))?;
        target.active = !target.active;
        Ok(self.apply_filters())
    }

    /// Deactivate every chip and recompute
    pub fn clear(&mut self) -> Visibility {
        for chip in &mut self.chips {
            chip.active = false;
        }
        self.apply_filters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // chips: 0=sub r1, 1=sub r2, 2=tool x, 3=tool y
    fn scenario_engine() -> FilterEngine {
        let chips = vec![
            Chip::subreddit("r1"),
            Chip::subreddit("r2"),
            Chip::tool("x"),
            Chip::tool("y"),
        ];
        let items = vec![
            FilterItem::new("r1", ["x", "y"]),
            FilterItem::new("r2", ["y"]),
            FilterItem::new("r1", Vec::<String>::new()),
        ];
        let sections = vec![Section::new(vec![0, 2]), Section::new(vec![1])];
        FilterEngine::new(chips, items, sections)
    }

    #[test]
    fn test_parse_tools_discards_empty_entries() {
        let tools = parse_tools("x,,y,");
        assert_eq!(tools.len(), 2);
        assert!(tools.contains("x"));
        assert!(tools.contains("y"));
        assert!(parse_tools("").is_empty());
        assert!(parse_tools(",").is_empty());
    }

    #[test]
    fn test_filter_kind_round_trip() {
        assert_eq!(FilterKind::parse("subreddit"), FilterKind::Subreddit);
        assert_eq!(FilterKind::parse("tool"), FilterKind::Tool);
        assert_eq!(FilterKind::parse("flair"), FilterKind::Other("flair".to_string()));
        assert_eq!(FilterKind::Tool.as_str(), "tool");
        assert_eq!(FilterKind::Other("flair".into()).to_string(), "flair");
    }

    #[test]
    fn test_chip_deserializes_kind_from_string() {
        let chip: Chip = serde_json::from_str(r#"{"kind":"tool","value":"cursor"}"#).unwrap();
        assert_eq!(chip.kind, FilterKind::Tool);
        assert!(!chip.active);
    }

    #[test]
    fn test_active_values_collects_matching_active_chips() {
        let mut engine = scenario_engine();
        assert!(engine.active_values(&FilterKind::Subreddit).is_empty());

        engine.toggle(0).unwrap();
        engine.toggle(3).unwrap();
        let subs = engine.active_values(&FilterKind::Subreddit);
        assert_eq!(subs.len(), 1);
        assert!(subs.contains("r1"));
        let tools = engine.active_values(&FilterKind::Tool);
        assert_eq!(tools.len(), 1);
        assert!(tools.contains("y"));
        assert!(engine.active_values(&FilterKind::Other("flair".into())).is_empty());
    }

    #[test]
    fn test_active_values_collapses_duplicates() {
        let mut chips = vec![Chip::tool("x"), Chip::tool("x")];
        chips.iter_mut().for_each(|c| c.active = true);
        let engine = FilterEngine::new(chips, vec![], vec![]);
        assert_eq!(engine.active_values(&FilterKind::Tool).len(), 1);
    }

    #[test]
    fn test_truth_table() {
        let item = FilterItem::new("r1", ["x"]);
        let cases: [(&[&str], &[&str], bool); 6] = [
            // no filters
            (&[], &[], true),
            // sub only
            (&["r1"], &[], true),
            (&["r2"], &[], false),
            // tool only
            (&[], &["x"], true),
            // both
            (&["r1"], &["x"], true),
            // conflicting: sub matches, tool does not
            (&["r1"], &["y"], false),
        ];
        for (subs, tools, expected) in cases {
            let active = ActiveFilters {
                subreddits: subs.iter().copied().collect(),
                tools: tools.iter().copied().collect(),
            };
            assert_eq!(active.matches(&item), expected, "subs={subs:?} tools={tools:?}");
        }
    }

    #[test]
    fn test_scenario_progressive_filters() {
        let mut engine = scenario_engine();
        assert_eq!(engine.apply_filters().visible_items(), vec![0, 1, 2]);

        let vis = engine.toggle(0).unwrap();
        assert_eq!(vis.visible_items(), vec![0, 2]);

        let vis = engine.toggle(3).unwrap();
        assert_eq!(vis.visible_items(), vec![0]);
    }

    #[test]
    fn test_section_hidden_when_sole_item_filtered() {
        let mut engine = scenario_engine();
        engine.toggle(0).unwrap();
        let vis = engine.toggle(3).unwrap();
        assert!(vis.is_section_visible(0));
        assert!(!vis.is_section_visible(1));
    }

    #[test]
    fn test_section_visible_iff_any_item_visible() {
        let mut engine = scenario_engine();
        for chip in 0..engine.chips().len() {
            let vis = engine.toggle(chip).unwrap();
            for (s, section) in engine.sections().iter().enumerate() {
                let any = section.items.iter().any(|&i| vis.is_item_visible(i));
                assert_eq!(vis.is_section_visible(s), any);
            }
        }
    }

    #[test]
    fn test_empty_section_is_hidden() {
        let engine = FilterEngine::new(
            vec![],
            vec![FilterItem::new("r1", ["x"])],
            vec![Section::default()],
        );
        let vis = engine.apply_filters();
        assert!(vis.is_item_visible(0));
        assert!(!vis.is_section_visible(0));
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let mut engine = scenario_engine();
        engine.toggle(1).unwrap();
        let before = engine.apply_filters();
        engine.toggle(2).unwrap();
        let after = engine.toggle(2).unwrap();
        assert_eq!(before, after);
        assert!(!engine.is_active(2));
        assert!(engine.is_active(1));
    }

    #[test]
    fn test_same_dimension_is_union() {
        let mut engine = scenario_engine();
        engine.toggle(0).unwrap();
        let vis = engine.toggle(1).unwrap();
        assert_eq!(vis.visible_items(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cross_dimension_is_intersection() {
        let mut engine = scenario_engine();
        engine.toggle(0).unwrap();
        let vis = engine.toggle(2).unwrap();
        assert_eq!(vis.visible_items(), vec![0]);
    }

    #[test]
    fn test_empty_tools_attribute_never_matches_tool_filter() {
        let empty_attr = FilterItem::from_attrs(Some("r1".into()), Some(""));
        let missing_attr = FilterItem::from_attrs(Some("r1".into()), None);
        assert_eq!(empty_attr, missing_attr);

        let mut engine = FilterEngine::new(vec![Chip::tool("x")], vec![empty_attr], vec![]);
        assert!(engine.apply_filters().is_item_visible(0));
        assert!(!engine.toggle(0).unwrap().is_item_visible(0));
    }

    #[test]
    fn test_missing_subreddit_only_excluded_when_filtering() {
        let item = FilterItem::from_attrs(None, Some("x"));
        let mut engine = FilterEngine::new(vec![Chip::subreddit("r1")], vec![item], vec![]);
        assert!(engine.apply_filters().is_item_visible(0));
        assert!(!engine.toggle(0).unwrap().is_item_visible(0));
    }

    #[test]
    fn test_unknown_dimension_does_not_filter() {
        let mut engine = FilterEngine::new(
            vec![Chip::new(FilterKind::Other("flair".into()), "news")],
            vec![FilterItem::new("r1", ["x"])],
            vec![],
        );
        let vis = engine.toggle(0).unwrap();
        assert!(engine.is_active(0));
        assert!(vis.is_item_visible(0));
    }

    #[test]
    fn test_toggle_unknown_chip() {
        let mut engine = scenario_engine();
        assert_eq!(engine.toggle(9), Err(FilterError::UnknownChip(9)));
        assert!(engine.chips().iter().all(|c| !c.active));
    }

    #[test]
    fn test_clear_deactivates_all_chips() {
        let mut engine = scenario_engine();
        engine.toggle(1).unwrap();
        engine.toggle(2).unwrap();
        let vis = engine.clear();
        assert!(engine.chips().iter().all(|c| !c.active));
        assert_eq!(vis.visible_count(), 3);
    }
}
