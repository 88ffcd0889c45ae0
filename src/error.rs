//! Application Errors
//!
//! Boot-time failures. Filtering itself never fails.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no window available")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("dom error: {0}")]
    Dom(String),

    #[error("config error: {0}")]
    Config(#[source] serde_json::Error),

    #[error("digest payload error: {0}")]
    Payload(#[source] serde_json::Error),

    #[error(transparent)]
    Filter(#[from] facet_filter::FilterError),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e = AppError::Config(err);
        assert!(e.to_string().starts_with("config error"));
    }

    #[test]
    fn test_filter_error_converts() {
        let e: AppError = facet_filter::FilterError::UnknownChip(3).into();
        assert_eq!(e.to_string(), "no chip at index 3");
    }

    #[test]
    fn test_dom_error_display() {
        let e = AppError::Dom("bad selector".into());
        assert!(e.to_string().contains("bad selector"));
    }
}
