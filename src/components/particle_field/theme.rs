//! Colors for the particle field.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Always the functional `rgba(...)` form; canvas styles take it as-is.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Base particle colors for the two resolved themes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPalette {
	/// Used when the resolved theme is dark.
	pub dark: Color,
	/// Used when the resolved theme is light.
	pub light: Color,
}

impl FieldPalette {
	/// The site accent blues.
	pub const fn accent() -> Self {
		Self {
			dark: Color::rgb(59, 130, 246),
			light: Color::rgb(37, 99, 235),
		}
	}

	/// Color for the resolved theme.
	pub fn base(&self, is_dark: bool) -> Color {
		if is_dark { self.dark } else { self.light }
	}
}

impl Default for FieldPalette {
	fn default() -> Self {
		Self::accent()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn palette_picks_by_theme() {
		let palette = FieldPalette::default();
		assert_eq!(palette.base(true), Color::rgb(59, 130, 246));
		assert_eq!(palette.base(false), Color::rgb(37, 99, 235));
	}

	#[test]
	fn css_uses_rgba_form() {
		assert_eq!(
			Color::rgb(59, 130, 246).with_alpha(0.5).to_css(),
			"rgba(59, 130, 246, 0.5)"
		);
	}
}
