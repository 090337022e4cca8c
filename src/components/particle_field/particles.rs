//! Drifting background particles and their proximity connections.

use rand::Rng;

use super::config::{ConnectionStyle, ParticleSpawn};

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Draw radius.
	pub radius: f64,
	/// Fill opacity before the theme color is applied.
	pub opacity: f64,
}

impl Particle {
	/// Random particle somewhere on a `width` x `height` surface.
	pub fn spawn(spawn: &ParticleSpawn, width: f64, height: f64, rng: &mut impl Rng) -> Self {
		let mut unit = || rng.gen_range(0.0_f64..1.0);
		Self {
			x: unit() * width,
			y: unit() * height,
			radius: spawn.radius_min + unit() * spawn.radius_span,
			vx: (unit() - 0.5) * spawn.velocity_spread,
			vy: (unit() - 0.5) * spawn.velocity_spread,
			opacity: spawn.opacity_min + unit() * spawn.opacity_span,
		}
	}

	/// Move one step, then reflect any axis that ended up out of bounds.
	///
	/// Reflection flips the velocity only; the position is never clamped, so
	/// a particle may sit up to one step outside the surface for a frame.
	pub fn step(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}

	/// Euclidean distance between centres.
	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A line to draw between two nearby particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	/// Index of the earlier particle.
	pub a: usize,
	/// Index of the later particle (`a < b`).
	pub b: usize,
	/// Distance between the two particles.
	pub distance: f64,
	/// Line alpha, fading to zero at the threshold.
	pub alpha: f64,
}

/// The particle collection for one surface size.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
	/// Live particles, in spawn order.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleSystem {
	/// Spawn `count` particles on a `width` x `height` surface.
	pub fn new(
		spawn: &ParticleSpawn,
		count: usize,
		width: f64,
		height: f64,
		rng: &mut impl Rng,
	) -> Self {
		let particles = (0..count)
			.map(|_| Particle::spawn(spawn, width, height, &mut *rng))
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Surface width the particles bounce within.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height the particles bounce within.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// `true` when the surface holds no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Advance every particle one step.
	pub fn update(&mut self) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			p.step(width, height);
		}
	}

	/// Every unordered index pair `(i, j)` with `i < j`, each exactly once.
	pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
		let n = self.particles.len();
		(0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
	}

	/// Pairs close enough to be connected under `style`.
	pub fn connections<'a>(
		&'a self,
		style: &'a ConnectionStyle,
	) -> impl Iterator<Item = Connection> + 'a {
		self.pairs().filter_map(move |(a, b)| {
			let distance = self.particles[a].distance_to(&self.particles[b]);
			style.alpha_at(distance).map(|alpha| Connection {
				a,
				b,
				distance,
				alpha,
			})
		})
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			radius: 2.0,
			opacity: 0.5,
		}
	}

	fn seeded_system(count: usize, width: f64, height: f64, seed: u64) -> ParticleSystem {
		let mut rng = SmallRng::seed_from_u64(seed);
		ParticleSystem::new(&ParticleSpawn::default(), count, width, height, &mut rng)
	}

	#[test]
	fn spawned_particles_respect_ranges() {
		let system = seeded_system(500, 800.0, 600.0, 7);
		assert_eq!(system.len(), 500);
		for p in &system.particles {
			assert!((0.0..800.0).contains(&p.x), "x out of range: {}", p.x);
			assert!((0.0..600.0).contains(&p.y), "y out of range: {}", p.y);
			assert!((1.0..4.0).contains(&p.radius), "radius: {}", p.radius);
			assert!((0.2..0.7).contains(&p.opacity), "opacity: {}", p.opacity);
			assert!((-0.25..0.25).contains(&p.vx), "vx: {}", p.vx);
			assert!((-0.25..0.25).contains(&p.vy), "vy: {}", p.vy);
		}
	}

	#[test]
	fn right_edge_flips_horizontal_velocity() {
		let mut p = particle(799.9, 300.0, 0.2, 0.0);
		p.step(800.0, 600.0);
		assert!(p.x > 800.0);
		assert_eq!(p.vx, -0.2);
		assert_eq!(p.vy, 0.0);

		p.step(800.0, 600.0);
		assert!(p.x < 800.0);
		assert_eq!(p.vx, -0.2);
	}

	#[test]
	fn axes_reflect_independently() {
		let mut p = particle(400.0, 0.1, 0.1, -0.2);
		p.step(800.0, 600.0);
		assert_eq!(p.vx, 0.1);
		assert_eq!(p.vy, 0.2);
	}

	#[test]
	fn particles_stay_within_one_step_of_bounds() {
		let (w, h) = (320.0, 240.0);
		let mut system = seeded_system(80, w, h, 42);
		for _ in 0..5000 {
			system.update();
			for p in &system.particles {
				let (sx, sy) = (p.vx.abs() + 1e-9, p.vy.abs() + 1e-9);
				assert!(p.x >= -sx && p.x <= w + sx, "x drifted: {}", p.x);
				assert!(p.y >= -sy && p.y <= h + sy, "y drifted: {}", p.y);
			}
		}
	}

	#[test]
	fn pairs_cover_each_unordered_pair_once() {
		let system = seeded_system(80, 800.0, 600.0, 1);
		let pairs: Vec<_> = system.pairs().collect();
		assert_eq!(pairs.len(), 80 * 79 / 2);

		let unique: HashSet<_> = pairs.iter().copied().collect();
		assert_eq!(unique.len(), pairs.len());
		assert!(pairs.iter().all(|&(i, j)| i < j));
	}

	#[test]
	fn tiny_systems_have_no_pairs() {
		assert_eq!(seeded_system(0, 100.0, 100.0, 3).pairs().count(), 0);
		assert_eq!(seeded_system(1, 100.0, 100.0, 3).pairs().count(), 0);
	}

	#[test]
	fn connections_only_for_close_pairs() {
		let system = ParticleSystem {
			particles: vec![
				particle(0.0, 0.0, 0.0, 0.0),
				particle(30.0, 40.0, 0.0, 0.0),
				particle(500.0, 500.0, 0.0, 0.0),
			],
			width: 800.0,
			height: 600.0,
		};
		let style = ConnectionStyle::default();
		let connections: Vec<_> = system.connections(&style).collect();

		assert_eq!(connections.len(), 1);
		let c = connections[0];
		assert_eq!((c.a, c.b), (0, 1));
		assert_eq!(c.distance, 50.0);
		assert!((c.alpha - (1.0 - 50.0 / 150.0) * 0.15).abs() < 1e-12);
	}
}
