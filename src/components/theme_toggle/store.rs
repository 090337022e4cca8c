//! Theme preference and where it is kept.
//!
//! The preference is one of three values and is persisted as a plain string
//! under [`STORAGE_KEY`]. `system` defers to the OS color-scheme media query.

use std::fmt;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{MediaQueryList, Storage};

use crate::dom::Listener;
use crate::error::SetupError;

/// Local storage key holding the preference.
pub const STORAGE_KEY: &str = "theme";

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// The user's chosen theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
	/// Follow the operating system.
	#[default]
	System,
	/// Always dark.
	Dark,
	/// Always light.
	Light,
}

impl ThemePreference {
	/// Stored string form.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemePreference::System => "system",
			ThemePreference::Dark => "dark",
			ThemePreference::Light => "light",
		}
	}

	/// Parse a stored value. Anything unrecognised is `None`.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"system" => Some(ThemePreference::System),
			"dark" => Some(ThemePreference::Dark),
			"light" => Some(ThemePreference::Light),
			_ => None,
		}
	}

	/// Toggle order: system, dark, light, then back to system.
	pub fn next(self) -> Self {
		match self {
			ThemePreference::System => ThemePreference::Dark,
			ThemePreference::Dark => ThemePreference::Light,
			ThemePreference::Light => ThemePreference::System,
		}
	}

	/// Decide `system` using the environment's preference.
	pub fn resolve(self, prefers_dark: bool) -> ResolvedTheme {
		match self {
			ThemePreference::Dark => ResolvedTheme::Dark,
			ThemePreference::Light => ResolvedTheme::Light,
			ThemePreference::System if prefers_dark => ResolvedTheme::Dark,
			ThemePreference::System => ResolvedTheme::Light,
		}
	}

	/// Accessible label for the toggle button, e.g. `"Theme: Dark"`.
	pub fn label(self) -> String {
		let name = self.as_str();
		let mut chars = name.chars();
		match chars.next() {
			Some(first) => format!("Theme: {}{}", first.to_ascii_uppercase(), chars.as_str()),
			None => String::from("Theme"),
		}
	}
}

impl fmt::Display for ThemePreference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A preference with `system` already decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTheme {
	/// Dark scheme.
	Dark,
	/// Light scheme.
	Light,
}

impl ResolvedTheme {
	/// Value written to `<html data-theme>`.
	pub fn as_str(self) -> &'static str {
		match self {
			ResolvedTheme::Dark => "dark",
			ResolvedTheme::Light => "light",
		}
	}

	/// `true` for the dark scheme.
	pub fn is_dark(self) -> bool {
		self == ResolvedTheme::Dark
	}
}

/// Read/write access to the theme preference.
pub trait ThemeStore {
	/// The stored preference, or the default when nothing usable is stored.
	fn current(&self) -> ThemePreference;

	/// Store a new preference.
	fn set(&mut self, preference: ThemePreference);

	/// Whether the environment asks for a dark scheme when following `system`.
	fn prefers_dark(&self) -> bool {
		false
	}

	/// Whether the resolved theme is dark.
	fn is_dark(&self) -> bool {
		self.current().resolve(self.prefers_dark()).is_dark()
	}

	/// Advance to the next preference, store it and return it.
	fn cycle(&mut self) -> ThemePreference {
		let next = self.current().next();
		self.set(next);
		next
	}
}

/// In-memory store, for tests and environments without storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryThemeStore {
	/// What has been persisted, if anything.
	pub stored: Option<ThemePreference>,
	/// Stand-in for the OS color-scheme query.
	pub prefers_dark: bool,
}

impl ThemeStore for MemoryThemeStore {
	fn current(&self) -> ThemePreference {
		self.stored.unwrap_or_default()
	}

	fn set(&mut self, preference: ThemePreference) {
		self.stored = Some(preference);
	}

	fn prefers_dark(&self) -> bool {
		self.prefers_dark
	}
}

/// Browser store: a reactive signal backed by `localStorage`.
///
/// Cloning is cheap and every clone sees the same preference, so the toggle
/// button and the particle background can each hold one.
#[derive(Clone)]
pub struct BrowserThemeStore {
	signal: RwSignal<ThemePreference>,
	system_dark: RwSignal<bool>,
	storage: Option<Storage>,
	media: Option<MediaQueryList>,
}

impl BrowserThemeStore {
	/// Loads the persisted preference. Missing storage degrades to an
	/// in-memory preference for this page view.
	pub fn load() -> Self {
		let window = web_sys::window();
		let storage = window
			.as_ref()
			.and_then(|w| w.local_storage().ok().flatten());
		if storage.is_none() {
			warn!("site-fx: localStorage unavailable, theme will not persist");
		}
		let media = window
			.as_ref()
			.and_then(|w| w.match_media(DARK_QUERY).ok().flatten());

		let stored = storage
			.as_ref()
			.and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
			.and_then(|v| ThemePreference::parse(&v))
			.unwrap_or_default();

		Self {
			signal: RwSignal::new(stored),
			system_dark: RwSignal::new(media.as_ref().is_some_and(|m| m.matches())),
			storage,
			media,
		}
	}

	/// The theme actually shown, for attribute bindings. Follows both the
	/// preference and OS scheme changes.
	pub fn resolved(&self) -> Signal<ResolvedTheme> {
		let (preference, system_dark) = (self.signal, self.system_dark);
		Signal::derive(move || preference.get().resolve(system_dark.get()))
	}

	/// Follow OS color-scheme changes while the preference is `system`.
	pub fn watch_system(&self) -> Result<(), SetupError> {
		let Some(media) = self.media.clone() else {
			return Err(SetupError::MissingElement("prefers-color-scheme media query"));
		};
		let (system_dark, query) = (self.system_dark, media.clone());
		Listener::new(&media, "change", move |_| {
			let dark = query.matches();
			debug!("site-fx: system color scheme is now {}", if dark { "dark" } else { "light" });
			system_dark.set(dark);
		})?
		.forget();
		Ok(())
	}

}

impl ThemeStore for BrowserThemeStore {
	fn current(&self) -> ThemePreference {
		self.signal.get_untracked()
	}

	fn set(&mut self, preference: ThemePreference) {
		self.signal.set(preference);
		if let Some(storage) = &self.storage {
			if let Err(e) = storage.set_item(STORAGE_KEY, preference.as_str()) {
				warn!("site-fx: failed to persist theme: {:?}", e);
			}
		}
	}

	fn prefers_dark(&self) -> bool {
		self.system_dark.get_untracked()
	}
}
