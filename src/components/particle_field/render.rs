//! Drawing the particle field.
//!
//! One frame is three passes, in this order:
//! 1. Clear the whole surface
//! 2. Particles as filled circles, in collection order
//! 3. Connection lines between nearby pairs, on top of the particles

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::ConnectionStyle;
use super::particles::ParticleSystem;
use super::theme::Color;

/// A 2D drawing target.
///
/// The browser implementation is the canvas 2D context; tests record calls.
pub trait Surface {
	/// Erase a `width` x `height` region from the origin.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill a disc centred on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Draws the current particle state without advancing it.
pub fn draw(
	system: &ParticleSystem,
	surface: &mut impl Surface,
	base: Color,
	connection: &ConnectionStyle,
) {
	draw_particles(system, surface, base);
	draw_connections(system, surface, base, connection);
}

/// Clears the surface, advances every particle one step and draws the result.
///
/// All positions are updated before any connection is measured.
pub fn frame(
	system: &mut ParticleSystem,
	surface: &mut impl Surface,
	base: Color,
	connection: &ConnectionStyle,
) {
	surface.clear(system.width(), system.height());
	system.update();
	draw(system, surface, base, connection);
}

fn draw_particles(system: &ParticleSystem, surface: &mut impl Surface, base: Color) {
	for p in &system.particles {
		surface.fill_circle(p.x, p.y, p.radius, base.with_alpha(p.opacity));
	}
}

fn draw_connections(
	system: &ParticleSystem,
	surface: &mut impl Surface,
	base: Color,
	style: &ConnectionStyle,
) {
	for c in system.connections(style) {
		let (a, b) = (&system.particles[c.a], &system.particles[c.b]);
		surface.stroke_line((a.x, a.y), (b.x, b.y), style.line_width, base.with_alpha(c.alpha));
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;

	/// One recorded drawing call.
	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear { width: f64, height: f64 },
		Circle { x: f64, y: f64, radius: f64, color: Color },
		Line { from: (f64, f64), to: (f64, f64), width: f64, color: Color },
	}

	/// Surface that remembers every call in order.
	#[derive(Default)]
	pub struct RecordingSurface {
		pub ops: Vec<Op>,
	}

	impl Surface for RecordingSurface {
		fn clear(&mut self, width: f64, height: f64) {
			self.ops.push(Op::Clear { width, height });
		}

		fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
			self.ops.push(Op::Circle {
				x,
				y,
				radius,
				color,
			});
		}

		fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
			self.ops.push(Op::Line {
				from,
				to,
				width,
				color,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::testing::{Op, RecordingSurface};
	use super::*;
	use crate::components::particle_field::config::ParticleSpawn;
	use crate::components::particle_field::particles::Particle;
	use crate::components::particle_field::theme::FieldPalette;

	fn still(x: f64, y: f64, opacity: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			opacity,
		}
	}

	fn system_of(particles: Vec<Particle>) -> ParticleSystem {
		let mut system = ParticleSystem::default();
		system.particles = particles;
		system
	}

	#[test]
	fn draws_particles_then_connections() {
		let system = system_of(vec![
			still(10.0, 10.0, 0.3),
			still(10.0, 110.0, 0.6),
			still(700.0, 500.0, 0.4),
		]);
		let base = FieldPalette::default().base(true);
		let mut surface = RecordingSurface::default();

		draw(&system, &mut surface, base, &ConnectionStyle::default());

		let alpha = (1.0 - 100.0 / 150.0) * 0.15;
		assert_eq!(
			surface.ops,
			vec![
				Op::Circle {
					x: 10.0,
					y: 10.0,
					radius: 2.0,
					color: base.with_alpha(0.3)
				},
				Op::Circle {
					x: 10.0,
					y: 110.0,
					radius: 2.0,
					color: base.with_alpha(0.6)
				},
				Op::Circle {
					x: 700.0,
					y: 500.0,
					radius: 2.0,
					color: base.with_alpha(0.4)
				},
				Op::Line {
					from: (10.0, 10.0),
					to: (10.0, 110.0),
					width: 1.0,
					color: base.with_alpha(alpha)
				},
			]
		);
	}

	#[test]
	fn frame_clears_first_and_advances() {
		let mut rng = SmallRng::seed_from_u64(0);
		let mut system = ParticleSystem::new(&ParticleSpawn::default(), 0, 640.0, 480.0, &mut rng);
		system.particles.push(Particle {
			vx: 1.0,
			..still(100.0, 100.0, 0.5)
		});
		let base = FieldPalette::default().base(false);
		let mut surface = RecordingSurface::default();

		frame(&mut system, &mut surface, base, &ConnectionStyle::default());

		assert_eq!(
			surface.ops,
			vec![
				Op::Clear {
					width: 640.0,
					height: 480.0
				},
				Op::Circle {
					x: 101.0,
					y: 100.0,
					radius: 2.0,
					color: base.with_alpha(0.5)
				},
			]
		);
	}

	#[test]
	fn light_theme_uses_light_base() {
		let system = system_of(vec![still(5.0, 5.0, 0.2)]);
		let palette = FieldPalette::default();
		let mut surface = RecordingSurface::default();

		draw(&system, &mut surface, palette.base(false), &ConnectionStyle::default());

		match &surface.ops[0] {
			Op::Circle { color, .. } => assert_eq!((color.r, color.g, color.b), (37, 99, 235)),
			other => panic!("unexpected op {other:?}"),
		}
	}
}
