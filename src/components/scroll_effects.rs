//! Scroll-driven page effects: smooth anchor scrolling, the header's
//! `scrolled` state and the hero parallax.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::request_animation_frame;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{self, Listener};
use crate::error::SetupError;

/// The sticky site header.
pub const HEADER_SELECTOR: &str = ".site-header";
/// Hero content moved by the parallax.
pub const HERO_CONTENT_SELECTOR: &str = ".hero-landing .hero-content";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Gap left between the sticky header and a scrolled-to section.
pub const ANCHOR_GAP: f64 = 20.0;
/// Scroll offset past which the header is styled as scrolled.
pub const HEADER_THRESHOLD: f64 = 50.0;
const PARALLAX_SPEED: f64 = 0.3;
const PARALLAX_FADE: f64 = 0.6;

/// Document scroll position that puts an element just below the header.
pub fn scroll_target(offset_top: f64, header_height: f64) -> f64 {
	offset_top - header_height - ANCHOR_GAP
}

/// In-page anchors worth intercepting; a bare `#` is left alone.
pub fn is_section_link(href: &str) -> bool {
	href.starts_with('#') && href.len() > 1
}

/// Whether the header should carry the `scrolled` class.
pub fn header_scrolled(scroll_y: f64) -> bool {
	scroll_y > HEADER_THRESHOLD
}

/// Hero content transform for one scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
	/// Downward offset in pixels.
	pub translate_y: f64,
	/// Multiplier on the element's opacity.
	pub opacity: f64,
}

impl Parallax {
	/// `None` once the hero has scrolled fully out of the viewport.
	pub fn at(scroll_y: f64, viewport_height: f64) -> Option<Self> {
		if scroll_y >= viewport_height || viewport_height <= 0.0 {
			return None;
		}
		Some(Self {
			translate_y: scroll_y * PARALLAX_SPEED,
			opacity: 1.0 - (scroll_y / viewport_height) * PARALLAX_FADE,
		})
	}
}

/// Wire smooth scrolling for anchors and the scroll listeners.
pub fn attach() -> Result<(), SetupError> {
	let window = dom::window()?;
	let document = dom::document()?;
	attach_smooth_scroll(&window, &document)?;
	attach_scroll_state(&window, &document)
}

fn attach_smooth_scroll(window: &Window, document: &Document) -> Result<(), SetupError> {
	for anchor in dom::query_all(document, ANCHOR_SELECTOR) {
		let (window, document, link) = (window.clone(), document.clone(), anchor.clone());
		Listener::new(&anchor, "click", move |ev| {
			let Some(href) = link.get_attribute("href") else {
				return;
			};
			if !is_section_link(&href) {
				return;
			}
			ev.prevent_default();

			let Some(target) = dom::query::<HtmlElement>(&document, &href) else {
				return;
			};
			let header_height = dom::query::<HtmlElement>(&document, HEADER_SELECTOR)
				.map(|h| h.offset_height() as f64)
				.unwrap_or(0.0);

			let options = ScrollToOptions::new();
			options.set_top(scroll_target(target.offset_top() as f64, header_height));
			options.set_behavior(ScrollBehavior::Smooth);
			window.scroll_to_with_scroll_to_options(&options);
		})?
		.forget();
	}
	Ok(())
}

fn attach_scroll_state(window: &Window, document: &Document) -> Result<(), SetupError> {
	let header = dom::query::<HtmlElement>(document, HEADER_SELECTOR);
	let hero = dom::query::<HtmlElement>(document, HERO_CONTENT_SELECTOR);
	if header.is_none() && hero.is_none() {
		return Err(SetupError::MissingElement(".site-header / .hero-content"));
	}

	let ticking = Rc::new(Cell::new(false));
	let win = window.clone();
	Listener::new(window, "scroll", move |_| {
		let scroll_y = win.page_y_offset().unwrap_or(0.0);

		if let Some(header) = &header {
			let _ = header
				.class_list()
				.toggle_with_force("scrolled", header_scrolled(scroll_y));
		}

		let Some(hero) = hero.clone() else {
			return;
		};
		if ticking.replace(true) {
			return;
		}
		let (win, ticking) = (win.clone(), ticking.clone());
		request_animation_frame(move || {
			let scroll_y = win.page_y_offset().unwrap_or(0.0);
			let viewport_height = win
				.inner_height()
				.ok()
				.and_then(|h| h.as_f64())
				.unwrap_or(0.0);
			if let Some(p) = Parallax::at(scroll_y, viewport_height) {
				dom::set_style(&hero, "transform", &format!("translateY({}px)", p.translate_y));
				dom::set_style(&hero, "opacity", &p.opacity.to_string());
			}
			ticking.set(false);
		});
	})?
	.forget();

	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn anchor_lands_below_header() {
		assert_eq!(scroll_target(1200.0, 80.0), 1100.0);
		assert_eq!(scroll_target(1200.0, 0.0), 1180.0);
	}

	#[test]
	fn bare_hash_is_not_intercepted() {
		assert!(!is_section_link("#"));
		assert!(is_section_link("#projects"));
		assert!(!is_section_link("/about"));
	}

	#[test]
	fn header_threshold_is_exclusive() {
		assert!(!header_scrolled(0.0));
		assert!(!header_scrolled(50.0));
		assert!(header_scrolled(50.5));
	}

	#[test]
	fn parallax_moves_and_fades() {
		assert_eq!(
			Parallax::at(0.0, 800.0),
			Some(Parallax {
				translate_y: 0.0,
				opacity: 1.0
			})
		);
		let half = Parallax::at(400.0, 800.0).unwrap();
		assert!((half.translate_y - 120.0).abs() < 1e-9);
		assert!((half.opacity - 0.7).abs() < 1e-9);
	}

	#[test]
	fn parallax_stops_past_viewport() {
		assert_eq!(Parallax::at(800.0, 800.0), None);
		assert_eq!(Parallax::at(1200.0, 800.0), None);
	}
}
