//! Digest Section Component
//!
//! Section heading, intro and its item cards. Hidden while none of its
//! items pass the filters.

use leptos::prelude::*;

use crate::components::ItemCard;
use crate::context::FilterContext;
use crate::digest::DigestSection;

#[component]
pub fn DigestSectionView(
    section: DigestSection,
    /// Position in the digest's section list
    section_index: usize,
    /// Engine index of the section's first item
    first_item: usize,
) -> impl IntoView {
    let ctx = use_context::<FilterContext>().expect("FilterContext should be provided");

    let section_style = move || {
        if ctx.is_section_visible(section_index) { "" } else { "display: none;" }
    };

    view! {
        <section class="newsletter-section" data-section=section.key.clone() style=section_style>
            <h2>{section.title.clone()}</h2>
            {(!section.intro.is_empty()).then(|| {
                view! { <p class="section-intro">{section.intro.clone()}</p> }
            })}
            {section.items
                .into_iter()
                .enumerate()
                .map(|(offset, item)| view! { <ItemCard item=item index=first_item + offset /> })
                .collect_view()}
        </section>
    }
}
