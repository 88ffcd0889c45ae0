//! Item Card Component
//!
//! One newsletter entry. Carries the same data attributes as the
//! server-rendered markup.

use leptos::prelude::*;

use crate::context::FilterContext;
use crate::markdown::parse_markdown_inline;
use crate::models::DigestItem;

#[component]
pub fn ItemCard(item: DigestItem, index: usize) -> impl IntoView {
    let ctx = use_context::<FilterContext>().expect("FilterContext should be provided");
    let hidden_class = ctx.hidden_class();

    let item_class = move || {
        if ctx.is_item_visible(index) {
            "newsletter-item".to_string()
        } else {
            format!("newsletter-item {}", hidden_class)
        }
    };

    let blurb_html = parse_markdown_inline(&item.blurb);
    let subreddit = item.subreddit.clone().unwrap_or_default();
    let tools = item.tool_tags.join(",");
    let headline = match item.permalink.clone() {
        Some(href) => view! {
            <a class="item-headline" href=href target="_blank" rel="noopener">
                {item.headline.clone()}
            </a>
        }.into_any(),
        None => view! { <span class="item-headline">{item.headline.clone()}</span> }.into_any(),
    };

    view! {
        <article class=item_class data-subreddit=subreddit.clone() data-tools=tools>
            <h3>{headline}</h3>
            <p class="item-blurb" inner_html=blurb_html></p>
            <div class="item-meta">
                {(!subreddit.is_empty()).then(|| {
                    view! { <span class="item-subreddit">{format!("r/{}", subreddit)}</span> }
                })}
                {item.tool_tags
                    .into_iter()
                    .map(|tag| view! { <span class="item-tool">{tag}</span> })
                    .collect_view()}
            </div>
        </article>
    }
}
