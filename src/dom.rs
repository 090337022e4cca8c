//! Small helpers over `web_sys` for finding elements and holding listeners.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::SetupError;

/// The browser window.
pub fn window() -> Result<Window, SetupError> {
	web_sys::window().ok_or(SetupError::NoBrowser)
}

/// The window's document.
pub fn document() -> Result<Document, SetupError> {
	window()?.document().ok_or(SetupError::NoBrowser)
}

/// Element with the given id, cast to `T`.
///
/// An element that exists but has the wrong type counts as missing.
pub fn by_id<T: JsCast>(document: &Document, id: &'static str) -> Result<T, SetupError> {
	document
		.get_element_by_id(id)
		.and_then(|el| el.dyn_into::<T>().ok())
		.ok_or(SetupError::MissingElement(id))
}

/// First match for `selector` under `root`, if any.
pub fn query<T: JsCast>(root: &Document, selector: &str) -> Option<T> {
	root.query_selector(selector)
		.ok()
		.flatten()
		.and_then(|el| el.dyn_into::<T>().ok())
}

/// All matches for `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
	let Ok(list) = document.query_selector_all(selector) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.get(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

/// Set one inline style property, ignoring failures.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
	let _ = element.style().set_property(property, value);
}

/// An event listener that is removed when dropped.
///
/// Page-lifetime listeners call [`Listener::forget`] instead.
pub struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	/// Add `handler` for `event` on `target`.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, SetupError> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	/// Keep the listener for the rest of the page's life.
	pub fn forget(self) {
		std::mem::forget(self);
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
