//! One-off page touches: footer year, the load-in animation and cursor
//! fixups for decorative cards.

use std::time::Duration;

use leptos::prelude::set_timeout;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::components::scroll_effects::HEADER_SELECTOR;
use crate::dom::{self, Listener};
use crate::error::SetupError;

/// DOM id of the footer year.
pub const YEAR_ID: &str = "year";
const INTERACTIVE_SELECTOR: &str = ".card, .chip, .tag";
const HEADER_DELAY: Duration = Duration::from_millis(100);

/// Elements that look clickable but hold nothing to click keep the default cursor.
pub fn needs_default_cursor(has_link: bool, has_button: bool) -> bool {
	!has_link && !has_button
}

/// Fill `#year` with the current calendar year.
pub fn set_footer_year(document: &Document) -> Result<u32, SetupError> {
	let el: Element = dom::by_id(document, YEAR_ID)?;
	let year = js_sys::Date::new_0().get_full_year();
	el.set_text_content(Some(&year.to_string()));
	Ok(year)
}

/// `true` once the window `load` event has already fired.
pub fn already_loaded(ready_state: &str) -> bool {
	ready_state == "complete"
}

/// Mark the body loaded and slide the header in, on window `load` or right
/// away when the page finished loading before this ran.
pub fn attach_load_animation(document: &Document) -> Result<(), SetupError> {
	if already_loaded(&document.ready_state()) {
		play_load_animation(document);
		return Ok(());
	}
	let window = dom::window()?;
	let document = document.clone();
	Listener::new(&window, "load", move |_| play_load_animation(&document))?.forget();
	Ok(())
}

fn play_load_animation(document: &Document) {
	if let Some(body) = document.body() {
		let _ = body.class_list().add_1("loaded");
	}
	let Some(header) = dom::query::<HtmlElement>(document, HEADER_SELECTOR) else {
		return;
	};
	dom::set_style(&header, "opacity", "0");
	dom::set_style(&header, "transform", "translateY(-20px)");
	dom::set_style(&header, "transition", "opacity 0.6s ease, transform 0.6s ease");
	set_timeout(
		move || {
			dom::set_style(&header, "opacity", "1");
			dom::set_style(&header, "transform", "translateY(0)");
		},
		HEADER_DELAY,
	);
}

/// Give link-less cards, chips and tags the default cursor.
pub fn fix_cursors(document: &Document) -> usize {
	let mut fixed = 0;
	for el in dom::query_all(document, INTERACTIVE_SELECTOR) {
		let has = |selector: &str| el.query_selector(selector).ok().flatten().is_some();
		if !needs_default_cursor(has("a"), has("button")) {
			continue;
		}
		if let Some(html) = el.dyn_ref::<HtmlElement>() {
			dom::set_style(html, "cursor", "default");
			fixed += 1;
		}
	}
	debug!("site-fx: default cursor on {} elements", fixed);
	fixed
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn load_animation_runs_now_once_page_is_complete() {
		assert!(already_loaded("complete"));
		assert!(!already_loaded("interactive"));
		assert!(!already_loaded("loading"));
	}

	#[test]
	fn only_inert_elements_lose_pointer() {
		assert!(needs_default_cursor(false, false));
		assert!(!needs_default_cursor(true, false));
		assert!(!needs_default_cursor(false, true));
	}
}
