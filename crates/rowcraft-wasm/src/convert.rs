//! Helpers for moving tables and errors across the JavaScript boundary.
//!
//! Tables cross as the `*Def` shapes from `rowcraft::serde`, so the core
//! types never need serde derives of their own.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

/// Converts any debug-printable error into a `JsValue` with a
/// human-readable message, keeping error handling on the JavaScript side
/// to a single string inspection.
pub fn error_to_js<T>(e: T) -> JsValue
where
    T: std::fmt::Debug,
{
    JsValue::from_str(&format!("{e:?}"))
}

/// Deserializes a JavaScript value into a definition shape.
pub fn from_js<T>(value: JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned,
{
    serde_wasm_bindgen::from_value(value).map_err(error_to_js)
}

/// Serializes a definition shape into a JavaScript value.
pub fn to_js<T>(value: &T) -> Result<JsValue, JsValue>
where
    T: Serialize,
{
    serde_wasm_bindgen::to_value(value).map_err(error_to_js)
}
