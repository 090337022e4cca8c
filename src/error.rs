//! Setup failures for page features.
//!
//! None of these are fatal: the app logs them and skips the affected feature.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a page feature could not be wired up.
#[derive(Debug, Error)]
pub enum SetupError {
	/// A DOM element the feature depends on is absent from this page.
	#[error("missing element: {0}")]
	MissingElement(&'static str),

	/// No `window`/`document` (not running in a browser main thread).
	#[error("browser environment unavailable")]
	NoBrowser,

	/// The page-supplied configuration could not be parsed.
	#[error("invalid configuration JSON: {0}")]
	Config(#[from] serde_json::Error),

	/// The configuration parsed but holds unusable values.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// A browser API call threw.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SetupError {
	fn from(value: JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				js_sys::Reflect::get(&value, &JsValue::from_str("message"))
					.ok()
					.and_then(|m| m.as_string())
			})
			.unwrap_or_else(|| format!("{value:?}"));
		SetupError::Js(message)
	}
}
