//! Theme toggle button.
//!
//! Each click moves the preference one step along system, dark, light and
//! persists it. The app root binds `<html data-theme>` to the resolved theme,
//! always `dark` or `light`, so this module only handles the button itself.

mod store;

use log::debug;
use web_sys::HtmlElement;

use crate::dom::{self, Listener};
use crate::error::SetupError;

pub use store::{
	BrowserThemeStore, MemoryThemeStore, ResolvedTheme, STORAGE_KEY, ThemePreference, ThemeStore,
};

/// DOM id of the toggle button.
pub const TOGGLE_ID: &str = "themeToggle";

/// Wire the toggle button to `store`.
pub fn attach(store: BrowserThemeStore) -> Result<(), SetupError> {
	let document = dom::document()?;
	let button: HtmlElement = dom::by_id(&document, TOGGLE_ID)?;
	button.set_attribute("aria-label", &store.current().label())?;

	let (mut store_click, button_click) = (store, button.clone());
	Listener::new(&button, "click", move |_| {
		let next = store_click.cycle();
		let _ = button_click.set_attribute("aria-label", &next.label());
		debug!("site-fx: theme set to {}", next);
	})?
	.forget();

	Ok(())
}
