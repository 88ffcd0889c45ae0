//! Filter Context
//!
//! Shared filter state provided via Leptos Context API.

use facet_filter::{FilterKind, Visibility};
use leptos::prelude::*;

use crate::config::PageContract;
use crate::store::{store_clear_chips, store_toggle_chip, DigestStateStoreFields, DigestStore};

/// Filter handles provided via context
#[derive(Clone, Copy)]
pub struct FilterContext {
    store: DigestStore,
    /// Recomputed whenever any chip changes
    pub visibility: Memo<Visibility>,
    contract: StoredValue<PageContract>,
}

impl FilterContext {
    pub fn new(store: DigestStore, contract: PageContract) -> Self {
        let visibility = Memo::new(move |_| store.engine().read().apply_filters());
        Self {
            store,
            visibility,
            contract: StoredValue::new(contract),
        }
    }

    /// Chip click: flip one chip, visibility follows
    pub fn toggle(&self, index: usize) {
        store_toggle_chip(&self.store, index);
    }

    pub fn clear(&self) {
        store_clear_chips(&self.store);
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.store.engine().read().is_active(index)
    }

    pub fn has_active(&self) -> bool {
        self.store.engine().read().chips().iter().any(|c| c.active)
    }

    /// (index, value) of every chip of one dimension
    pub fn chips_of(&self, kind: &FilterKind) -> Vec<(usize, String)> {
        self.store
            .engine()
            .read_untracked()
            .chips()
            .iter()
            .enumerate()
            .filter(|(_, c)| &c.kind == kind)
            .map(|(i, c)| (i, c.value.clone()))
            .collect()
    }

    pub fn is_item_visible(&self, index: usize) -> bool {
        self.visibility.with(|v| v.is_item_visible(index))
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.with(|v| v.visible_count())
    }

    pub fn is_section_visible(&self, index: usize) -> bool {
        self.visibility.with(|v| v.is_section_visible(index))
    }

    pub fn active_class(&self) -> String {
        self.contract.with_value(|c| c.active_class.clone())
    }

    pub fn hidden_class(&self) -> String {
        self.contract.with_value(|c| c.hidden_class.clone())
    }
}
