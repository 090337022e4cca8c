//! Mobile navigation menu.
//!
//! The menu button opens and closes the nav panel. Following a link inside the
//! panel or pressing Escape closes it again.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom::{self, Listener};
use crate::error::SetupError;

/// DOM id of the menu button.
pub const BUTTON_ID: &str = "menuToggle";
/// DOM id of the nav panel.
pub const NAV_ID: &str = "siteNav";

/// Something that happened to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
	/// The hamburger button was pressed.
	ButtonClicked,
	/// A link inside the nav was clicked.
	LinkFollowed,
	/// Escape was pressed anywhere on the page.
	EscapePressed,
}

/// Open/closed state of the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
	/// Whether the nav is showing.
	pub open: bool,
}

impl MenuState {
	/// Apply an event. Returns the new state.
	pub fn on(self, event: MenuEvent) -> Self {
		let open = match event {
			MenuEvent::ButtonClicked => !self.open,
			MenuEvent::LinkFollowed | MenuEvent::EscapePressed => false,
		};
		Self { open }
	}

	/// Value for the button's `aria-expanded`.
	pub fn aria_expanded(self) -> &'static str {
		if self.open { "true" } else { "false" }
	}
}

struct MenuDom {
	button: HtmlElement,
	nav: Element,
	body: Option<HtmlElement>,
}

impl MenuDom {
	fn render(&self, state: MenuState) {
		let _ = self.nav.class_list().toggle_with_force("open", state.open);
		if let Some(body) = &self.body {
			let _ = body.class_list().toggle_with_force("menu-open", state.open);
		}
		let _ = self.button.set_attribute("aria-expanded", state.aria_expanded());
	}
}

/// Wire the menu button and nav panel. Both must be present.
pub fn attach() -> Result<(), SetupError> {
	let document = dom::document()?;
	let button: HtmlElement = dom::by_id(&document, BUTTON_ID)?;
	let nav: Element = dom::by_id(&document, NAV_ID)?;

	let menu = Rc::new(MenuDom {
		button: button.clone(),
		nav: nav.clone(),
		body: document.body(),
	});
	let state = Rc::new(Cell::new(MenuState::default()));
	menu.render(state.get());

	let dispatch = move |event: MenuEvent| {
		let next = state.get().on(event);
		if next != state.get() {
			state.set(next);
			menu.render(next);
		}
	};

	let on_button = dispatch.clone();
	Listener::new(&button, "click", move |_| on_button(MenuEvent::ButtonClicked))?.forget();

	let on_link = dispatch.clone();
	Listener::new(&nav, "click", move |ev| {
		let is_link = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.closest("a").ok().flatten())
			.is_some();
		if is_link {
			on_link(MenuEvent::LinkFollowed);
		}
	})?
	.forget();

	Listener::new(&document, "keydown", move |ev| {
		let escape = ev
			.dyn_ref::<KeyboardEvent>()
			.is_some_and(|k| k.key() == "Escape");
		if escape {
			dispatch(MenuEvent::EscapePressed);
		}
	})?
	.forget();

	Ok(())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn button_toggles() {
		let state = MenuState::default();
		assert!(!state.open);
		let state = state.on(MenuEvent::ButtonClicked);
		assert!(state.open);
		assert_eq!(state.aria_expanded(), "true");
		let state = state.on(MenuEvent::ButtonClicked);
		assert!(!state.open);
		assert_eq!(state.aria_expanded(), "false");
	}

	#[test]
	fn link_and_escape_only_close() {
		let open = MenuState { open: true };
		assert_eq!(open.on(MenuEvent::LinkFollowed), MenuState::default());
		assert_eq!(open.on(MenuEvent::EscapePressed), MenuState::default());
		assert_eq!(
			MenuState::default().on(MenuEvent::EscapePressed),
			MenuState::default()
		);
	}
}
