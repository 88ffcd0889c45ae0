//! Chip Bar Component
//!
//! Filter chips grouped by dimension, plus a clear control.

use facet_filter::FilterKind;
use leptos::prelude::*;

use crate::context::FilterContext;

/// One chip button
#[component]
fn ChipButton(index: usize, kind: FilterKind, value: String) -> impl IntoView {
    let ctx = use_context::<FilterContext>().expect("FilterContext should be provided");
    let active_class = ctx.active_class();

    let chip_class = move || {
        if ctx.is_active(index) {
            format!("chip {}", active_class)
        } else {
            "chip".to_string()
        }
    };

    view! {
        <button
            class=chip_class
            data-filter=kind.as_str().to_string()
            data-value=value.clone()
            on:click=move |_| ctx.toggle(index)
        >
            {value.clone()}
        </button>
    }
}

/// Labelled row of chips for one dimension; renders nothing when empty
#[component]
fn ChipGroup(label: &'static str, kind: FilterKind) -> impl IntoView {
    let ctx = use_context::<FilterContext>().expect("FilterContext should be provided");
    let chips = ctx.chips_of(&kind);

    if chips.is_empty() {
        return view! { <div></div> }.into_any();
    }

    view! {
        <div class="chip-group">
            <span class="chip-group-label">{label}</span>
            {chips
                .into_iter()
                .map(|(index, value)| {
                    view! { <ChipButton index=index kind=kind.clone() value=value /> }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// Filter bar above the digest
#[component]
pub fn ChipBar() -> impl IntoView {
    let ctx = use_context::<FilterContext>().expect("FilterContext should be provided");

    view! {
        <div class="filter-bar">
            <ChipGroup label="Subreddits" kind=FilterKind::Subreddit />
            <ChipGroup label="Tools" kind=FilterKind::Tool />

            {move || if ctx.has_active() {
                view! {
                    <button class="chip-clear" on:click=move |_| ctx.clear()>
                        "Clear filters"
                    </button>
                }.into_any()
            } else {
                view! { <span></span> }.into_any()
            }}
        </div>
    }
}
