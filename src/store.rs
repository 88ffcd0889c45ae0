//! Digest State Store
//!
//! Uses Leptos reactive_stores for field-level reactivity.

use facet_filter::FilterEngine;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::digest::{Digest, DigestSection};

/// State of a rendered digest
#[derive(Clone, Debug, Default, Store)]
pub struct DigestState {
    pub edition_title: String,
    /// Sections in display order
    pub sections: Vec<DigestSection>,
    /// Chip state plus facet data; indices follow `sections` flattened
    pub engine: FilterEngine,
}

impl DigestState {
    pub fn new(digest: Digest) -> Self {
        let engine = digest.engine();
        Self {
            edition_title: digest.edition_title,
            sections: digest.sections,
            engine,
        }
    }
}

pub type DigestStore = Store<DigestState>;

// ========================
// Store Helper Functions
// ========================

/// Flip a chip by index
pub fn store_toggle_chip(store: &DigestStore, index: usize) {
    if let Err(e) = store.engine().write().toggle(index) {
        log::warn!("[APP] {}", e);
    }
}

/// Deactivate every chip
pub fn store_clear_chips(store: &DigestStore) {
    store.engine().write().clear();
}
