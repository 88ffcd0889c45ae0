//! Blurb Markdown
//!
//! Renders item blurbs with pulldown-cmark. Blurbs come from generated text,
//! so raw HTML is escaped and images are dropped.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

/// Parse markdown to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Parse markdown for inline use (strips outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
}

enum State {
    Normal,
    /// Skipping an image's alt text; depth of nested tags seen so far
    InImage { dropped_depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::Image { .. }) => {
                    state = State::InImage { dropped_depth: 0 };
                }
                // Unsafe scheme: keep the link text, neutralize the target
                Event::Start(Tag::Link { link_type, dest_url, title, id })
                    if !is_safe_url(&dest_url) =>
                {
                    let dest_url = CowStr::from("#");
                    events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                }
                // Text events are escaped by push_html
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    events.push(Event::Text(CowStr::from(raw.to_string())));
                }
                other => events.push(other),
            },

            State::InImage { ref mut dropped_depth } => match event {
                Event::Start(_) => *dropped_depth += 1,
                Event::End(_) => {
                    if *dropped_depth == 0 {
                        state = State::Normal;
                    } else {
                        *dropped_depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

/// Relative URLs and http(s)/mailto only
fn is_safe_url(url: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let scheme_end = cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(pos) if cleaned[pos..].starts_with(':') => {
            matches!(&cleaned[..pos], "http" | "https" | "mailto")
        }
        _ => true,
    }
}
