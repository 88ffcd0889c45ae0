//! Digest App
//!
//! Renders a digest payload with chip filtering. Used when the page ships
//! the digest as JSON instead of markup.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{ChipBar, DigestSectionView};
use crate::config::PageContract;
use crate::context::FilterContext;
use crate::digest::Digest;
use crate::store::{DigestState, DigestStateStoreFields};

#[component]
pub fn App(digest: Digest, contract: PageContract) -> impl IntoView {
    let store = Store::new(DigestState::new(digest));
    let ctx = FilterContext::new(store, contract);
    provide_context(ctx);

    let total = store.engine().read_untracked().items().len();
    log::info!("[APP] Rendering digest with {} items", total);

    // Engine indices run across sections in display order
    let sections = store.sections().get_untracked();
    let mut first_item = 0;
    let section_views = sections
        .into_iter()
        .enumerate()
        .map(|(section_index, section)| {
            let start = first_item;
            first_item += section.items.len();
            view! {
                <DigestSectionView section=section section_index=section_index first_item=start />
            }
        })
        .collect_view();

    view! {
        <div class="digest-layout">
            <h1 class="edition-title">{move || store.edition_title().get()}</h1>

            <ChipBar />

            <p class="item-count">
                {move || format!("{} of {} items", ctx.visible_count(), total)}
            </p>

            <main class="digest-sections">
                {section_views}
            </main>
        </div>
    }
}
