//! Scroll-triggered reveal animations.
//!
//! Sections and cards start hidden via the `scroll-reveal` class and get
//! `revealed` the first time they scroll into view. The CSS transition does
//! the rest; each element gets a staggered `transition-delay`.

use js_sys::Array;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;
use crate::error::SetupError;

/// Elements revealed one after another, in document order.
pub const SECTION_SELECTOR: &str = ".section";
/// Elements revealed in staggered rows.
pub const CARD_SELECTOR: &str = ".card";

const HIDDEN_CLASS: &str = "scroll-reveal";
const REVEALED_CLASS: &str = "revealed";
const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Sections stagger by 100ms each, in document order.
pub fn section_delay_ms(index: usize) -> usize {
	index * 100
}

/// Cards stagger in rows of four.
pub fn card_delay_ms(index: usize) -> usize {
	(index % 4) * 100
}

/// Prepare every section and card and start observing them.
///
/// Without `IntersectionObserver` everything is revealed straight away so no
/// content stays hidden.
pub fn attach() -> Result<usize, SetupError> {
	let document = dom::document()?;
	let sections = dom::query_all(&document, SECTION_SELECTOR);
	let cards = dom::query_all(&document, CARD_SELECTOR);

	let targets: Vec<(Element, usize)> = sections
		.into_iter()
		.enumerate()
		.map(|(i, el)| (el, section_delay_ms(i)))
		.chain(
			cards
				.into_iter()
				.enumerate()
				.map(|(i, el)| (el, card_delay_ms(i))),
		)
		.collect();

	let observer = match observer() {
		Ok(observer) => observer,
		Err(e) => {
			warn!("site-fx: reveal observer unavailable ({}), showing all", e);
			for (el, _) in &targets {
				let _ = el.class_list().add_1(REVEALED_CLASS);
			}
			return Err(e);
		}
	};

	for (el, delay) in &targets {
		if let Some(html) = el.dyn_ref::<HtmlElement>() {
			dom::set_style(html, "transition-delay", &format!("{delay}ms"));
		}
		let _ = el.class_list().add_1(HIDDEN_CLASS);
		observer.observe(el);
	}

	Ok(targets.len())
}

fn observer() -> Result<IntersectionObserver, SetupError> {
	let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
		|entries: Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let entry: IntersectionObserverEntry = entry.unchecked_into();
				if entry.is_intersecting() {
					let target = entry.target();
					let _ = target.class_list().add_1(REVEALED_CLASS);
					observer.unobserve(&target);
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(THRESHOLD));
	options.set_root_margin(ROOT_MARGIN);

	let observer =
		IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
	callback.forget();
	Ok(observer)
}
