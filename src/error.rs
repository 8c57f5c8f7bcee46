//! Setup errors. Per-tick work never fails; it skips missing elements instead.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnhanceError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("invalid page config: {0}")]
    Config(String),
    #[error("dom call failed: {0}")]
    Js(String),
}

impl EnhanceError {
    /// Wraps a thrown JS value, keeping its string form when it has one.
    pub fn from_js(value: JsValue) -> Self {
        EnhanceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EnhanceError> for JsValue {
    fn from(err: EnhanceError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EnhanceError>;
