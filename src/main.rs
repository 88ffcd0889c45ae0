//! Digest Filter Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod digest;
mod error;
mod markdown;
mod models;
mod page;
mod store;

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use app::App;
use config::PageContract;
use digest::Digest;
use error::{AppError, AppResult};
use models::DigestPayload;
use page::PageFilter;

/// Element the rendered digest mounts into; falls back to <body>
const MOUNT_ID: &str = "digest-root";

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(level));

    if let Err(e) = start() {
        log::error!("[BOOT] {}", e);
    }
}

/// Run `boot` once the document is parsed
fn start() -> AppResult<()> {
    let document = web_sys::window()
        .ok_or(AppError::NoWindow)?
        .document()
        .ok_or(AppError::NoDocument)?;

    if document.ready_state() != "loading" {
        return boot(&document);
    }

    let doc = document.clone();
    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = boot(&doc) {
            log::error!("[BOOT] {}", e);
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

/// Mount the rendered digest if the page ships one, otherwise bind the markup
fn boot(document: &Document) -> AppResult<()> {
    let contract = PageContract::load(document)?;

    let payload = document
        .get_element_by_id(&contract.digest_data_id)
        .and_then(|el| el.text_content());

    match payload {
        Some(json) => {
            let payload: DigestPayload = serde_json::from_str(&json).map_err(AppError::Payload)?;
            let digest = Digest::from_payload(payload);
            let root = match document.get_element_by_id(MOUNT_ID) {
                Some(el) => el
                    .dyn_into::<HtmlElement>()
                    .map_err(|_| AppError::Dom(format!("#{} is not an HTML element", MOUNT_ID)))?,
                None => document.body().ok_or(AppError::NoDocument)?,
            };
            log::info!("[BOOT] Mounting digest app");
            leptos::mount::mount_to(root, move || {
                view! { <App digest=digest.clone() contract=contract.clone() /> }
            })
            .forget();
        }
        None => {
            log::info!("[BOOT] Binding server-rendered digest");
            PageFilter::scan(document, contract)?.attach()?;
        }
    }
    Ok(())
}
