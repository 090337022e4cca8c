//! Tunable constants for the particle field.
//!
//! Everything the animator needs to know about density, spawning and
//! connection styling lives here, with defaults matching the site design.
//! Pages can override any subset through a JSON script element; see
//! [`FieldConfig::from_json`].

use serde::Deserialize;

use crate::error::SetupError;

/// Coarse viewport classification used to pick a density tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
	/// Narrow viewports: sparser field, lower cap.
	Mobile,
	/// Everything at or above the breakpoint.
	Desktop,
}

/// Particle density for one viewport class.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DensityTier {
	/// Surface area (px²) allotted to each particle.
	pub area_per_particle: f64,
	/// Hard upper bound on the particle count.
	pub max_particles: usize,
}

impl DensityTier {
	/// Number of particles for a surface of the given area.
	///
	/// `min(floor(area / area_per_particle), max_particles)`, never negative.
	pub fn count_for_area(&self, area: f64) -> usize {
		if area.is_nan() || area <= 0.0 {
			return 0;
		}
		let raw = (area / self.area_per_particle).floor();
		(raw as usize).min(self.max_particles)
	}
}

impl Default for DensityTier {
	fn default() -> Self {
		Self {
			area_per_particle: 15000.0,
			max_particles: 80,
		}
	}
}

/// Randomization ranges for freshly spawned particles.
///
/// Each value is drawn as `min + r * span` with `r` uniform in `[0, 1)`.
/// Velocity components are `(r - 0.5) * velocity_spread`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleSpawn {
	/// Smallest particle radius.
	pub radius_min: f64,
	/// Radius range above the minimum.
	pub radius_span: f64,
	/// Faintest particle opacity.
	pub opacity_min: f64,
	/// Opacity range above the minimum.
	pub opacity_span: f64,
	/// Width of the per-axis velocity range, centred on zero.
	pub velocity_spread: f64,
}

impl Default for ParticleSpawn {
	fn default() -> Self {
		Self {
			radius_min: 1.0,
			radius_span: 3.0,
			opacity_min: 0.2,
			opacity_span: 0.5,
			velocity_spread: 0.5,
		}
	}
}

/// How proximity lines between particles are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
	/// Pairs closer than this (surface px) get a line.
	pub max_distance: f64,
	/// Alpha of a line between two coincident particles.
	pub max_alpha: f64,
	/// Stroke width of connection lines.
	pub line_width: f64,
}

impl ConnectionStyle {
	/// Line alpha for a pair at `distance`, or `None` when out of range.
	///
	/// Fades linearly from `max_alpha` at zero distance to nothing at
	/// `max_distance`.
	pub fn alpha_at(&self, distance: f64) -> Option<f64> {
		if distance < self.max_distance {
			Some((1.0 - distance / self.max_distance) * self.max_alpha)
		} else {
			None
		}
	}
}

impl Default for ConnectionStyle {
	fn default() -> Self {
		Self {
			max_distance: 150.0,
			max_alpha: 0.15,
			line_width: 1.0,
		}
	}
}

/// Complete particle field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Viewports narrower than this (logical px) count as mobile.
	pub mobile_breakpoint: f64,
	/// Density below the breakpoint.
	pub mobile: DensityTier,
	/// Density at or above the breakpoint.
	pub desktop: DensityTier,
	/// Ranges for freshly spawned particles.
	pub spawn: ParticleSpawn,
	/// How nearby particles are linked.
	pub connection: ConnectionStyle,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			mobile_breakpoint: 900.0,
			mobile: DensityTier {
				area_per_particle: 20000.0,
				max_particles: 40,
			},
			desktop: DensityTier::default(),
			spawn: ParticleSpawn::default(),
			connection: ConnectionStyle::default(),
		}
	}
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override and validate it.
	pub fn from_json(json: &str) -> Result<Self, SetupError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Reject values that would make the count or alpha math meaningless.
	pub fn validate(&self) -> Result<(), SetupError> {
		for (name, tier) in [("mobile", &self.mobile), ("desktop", &self.desktop)] {
			if !(tier.area_per_particle.is_finite() && tier.area_per_particle > 0.0) {
				return Err(SetupError::InvalidConfig(format!(
					"{name}.area_per_particle must be positive, got {}",
					tier.area_per_particle
				)));
			}
		}
		let max_distance = self.connection.max_distance;
		if !(max_distance.is_finite() && max_distance > 0.0) {
			return Err(SetupError::InvalidConfig(format!(
				"connection.max_distance must be positive, got {max_distance}"
			)));
		}
		Ok(())
	}

	/// Classify a viewport width against the mobile breakpoint.
	pub fn classify(&self, viewport_width: f64) -> ViewportClass {
		if viewport_width < self.mobile_breakpoint {
			ViewportClass::Mobile
		} else {
			ViewportClass::Desktop
		}
	}

	/// Density settings for a viewport class.
	pub fn tier(&self, class: ViewportClass) -> &DensityTier {
		match class {
			ViewportClass::Mobile => &self.mobile,
			ViewportClass::Desktop => &self.desktop,
		}
	}

	/// Particle count for a surface and viewport class.
	pub fn particle_count(&self, width: f64, height: f64, class: ViewportClass) -> usize {
		self.tier(class).count_for_area(width * height)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn desktop_count_for_800_by_600() {
		let config = FieldConfig::default();
		assert_eq!(config.particle_count(800.0, 600.0, ViewportClass::Desktop), 32);
	}

	#[test]
	fn mobile_count_for_300_by_400() {
		let config = FieldConfig::default();
		assert_eq!(config.particle_count(300.0, 400.0, ViewportClass::Mobile), 6);
	}

	#[test]
	fn count_is_capped_per_tier() {
		let config = FieldConfig::default();
		assert_eq!(config.particle_count(4000.0, 4000.0, ViewportClass::Desktop), 80);
		assert_eq!(config.particle_count(4000.0, 4000.0, ViewportClass::Mobile), 40);
	}

	#[test]
	fn count_matches_formula_across_sizes() {
		let config = FieldConfig::default();
		for (w, h) in [(0.0, 0.0), (120.0, 90.0), (1024.0, 768.0), (1920.0, 1080.0)] {
			for class in [ViewportClass::Mobile, ViewportClass::Desktop] {
				let tier = config.tier(class);
				let expected =
					((w * h / tier.area_per_particle).floor() as usize).min(tier.max_particles);
				let count = config.particle_count(w, h, class);
				assert_eq!(count, expected);
				assert!(count <= tier.max_particles);
			}
		}
	}

	#[test]
	fn zero_area_yields_no_particles() {
		let config = FieldConfig::default();
		assert_eq!(config.particle_count(0.0, 600.0, ViewportClass::Desktop), 0);
	}

	#[test]
	fn breakpoint_is_exclusive_for_mobile() {
		let config = FieldConfig::default();
		assert_eq!(config.classify(899.0), ViewportClass::Mobile);
		assert_eq!(config.classify(900.0), ViewportClass::Desktop);
	}

	#[test]
	fn connection_alpha_fades_to_cutoff() {
		let style = ConnectionStyle::default();
		assert_eq!(style.alpha_at(0.0), Some(0.15));
		let half = style.alpha_at(75.0).unwrap();
		assert!((half - 0.075).abs() < 1e-12);
		assert_eq!(style.alpha_at(150.0), None);
		assert_eq!(style.alpha_at(200.0), None);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			FieldConfig::from_json(r#"{"desktop": {"max_particles": 120}}"#).unwrap();
		assert_eq!(config.desktop.max_particles, 120);
		assert_eq!(config.desktop.area_per_particle, 15000.0);
		assert_eq!(config.mobile, FieldConfig::default().mobile);
		assert_eq!(config.mobile_breakpoint, 900.0);
	}

	#[test]
	fn rejects_non_positive_density() {
		let err = FieldConfig::from_json(r#"{"mobile": {"area_per_particle": 0}}"#).unwrap_err();
		assert!(matches!(err, SetupError::InvalidConfig(_)));
	}

	#[test]
	fn rejects_malformed_json() {
		let err = FieldConfig::from_json("{not json").unwrap_err();
		assert!(matches!(err, SetupError::Config(_)));
	}
}
