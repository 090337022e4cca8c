//! site-fx: page behaviors for a static portfolio site.
//!
//! This crate attaches to server-rendered markup and adds theme switching,
//! a mobile menu, scroll reveals, smooth scrolling, header and hero scroll
//! effects, and an animated particle background. Every feature checks for its
//! markup first and is skipped when the page does not have it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod dom;
pub mod error;

use components::particle_field::{FieldConfig, ParticleFieldHost};
use components::theme_toggle::BrowserThemeStore;
use components::{nav_menu, page_intro, reveal, scroll_effects, theme_toggle};
use error::SetupError;

/// DOM id of the optional JSON script holding particle field overrides.
pub const CONFIG_ID: &str = "particles-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("site-fx: logging initialized");
}

/// Load particle field overrides from a script element with id="particles-config".
/// Absent or invalid configuration falls back to the defaults.
fn load_field_config() -> FieldConfig {
	let Ok(document) = dom::document() else {
		return FieldConfig::default();
	};
	let Some(script) = document
		.get_element_by_id(CONFIG_ID)
		.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
	else {
		return FieldConfig::default();
	};
	let json_text = script.text().unwrap_or_default();

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("site-fx: loaded particle config from #{}", CONFIG_ID);
			config
		}
		Err(e) => {
			warn!("site-fx: ignoring particle config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Log the outcome of wiring one feature. Missing markup is expected.
fn report<T>(feature: &str, result: Result<T, SetupError>) {
	match result {
		Ok(_) => debug!("site-fx: {} ready", feature),
		Err(SetupError::MissingElement(what)) => {
			info!("site-fx: {} skipped, no {} on this page", feature, what)
		}
		Err(e) => warn!("site-fx: {} failed: {}", feature, e),
	}
}

/// Wire every page feature. Failures are isolated per feature.
fn wire_page(theme: BrowserThemeStore) {
	report("theme toggle", theme_toggle::attach(theme.clone()));
	report("system color scheme", theme.watch_system());
	report("navigation menu", nav_menu::attach());
	report("scroll reveal", reveal::attach());
	report("scroll effects", scroll_effects::attach());

	match dom::document() {
		Ok(document) => {
			report("footer year", page_intro::set_footer_year(&document));
			report("load animation", page_intro::attach_load_animation(&document));
			page_intro::fix_cursors(&document);
		}
		Err(e) => report::<()>("page intro", Err(e)),
	}

	report(
		"particle field",
		ParticleFieldHost::attach(load_field_config(), theme).map(ParticleFieldHost::keep_alive),
	);
}

/// Root component.
/// Owns the theme signal, reflects the resolved theme into `<html data-theme>` and wires the page once mounted.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let theme = BrowserThemeStore::load();
	let shown = theme.resolved();

	Effect::new(move |_| {
		wire_page(theme.clone());
	});

	view! {
		<Html attr:data-theme=move || shown.get().as_str() />
	}
}
