//! Particle field lifecycle and frame scheduling.
//!
//! [`ParticleField`] owns the particles and the pending frame request. It never
//! touches the browser directly: frames are requested through a
//! [`FrameScheduler`], sizes come from a [`SizeSource`] and visibility from a
//! [`VisibilitySource`], so the whole state machine runs under test with fakes.

use log::{debug, warn};
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleSystem;
use super::render::{self, Surface};
use super::theme::FieldPalette;
use crate::components::theme_toggle::ThemeStore;

/// Identifies one outstanding frame request.
pub type FrameHandle = i32;

/// Something that can run the field's frame callback before the next repaint.
pub trait FrameScheduler {
	/// Queue one frame. `None` if the host refused.
	fn request(&mut self) -> Option<FrameHandle>;
	/// Drop a queued frame before it runs.
	fn cancel(&mut self, handle: FrameHandle);
}

/// Whether the page is currently hidden.
pub trait VisibilitySource {
	/// `true` while the document is hidden.
	fn is_hidden(&self) -> bool;
}

/// Drawing surface and viewport dimensions.
pub trait SizeSource {
	/// Pixel size of the drawing surface.
	fn surface_size(&self) -> (f64, f64);
	/// Logical width of the viewport, used for the density tier.
	fn viewport_width(&self) -> f64;
}

/// Where the frame loop is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
	/// Not started yet, or torn down.
	#[default]
	Stopped,
	/// A frame is pending or being drawn.
	Running,
	/// Page hidden; no frame pending.
	Paused,
}

/// The animated background: particles plus scheduling state.
pub struct ParticleField {
	config: FieldConfig,
	palette: FieldPalette,
	system: ParticleSystem,
	lifecycle: Lifecycle,
	pending: Option<FrameHandle>,
	rng: SmallRng,
}

impl ParticleField {
	/// An empty, stopped field. Call [`init`](Self::init) before starting.
	pub fn new(config: FieldConfig, palette: FieldPalette, rng: SmallRng) -> Self {
		Self {
			config,
			palette,
			system: ParticleSystem::default(),
			lifecycle: Lifecycle::Stopped,
			pending: None,
			rng,
		}
	}

	/// Current loop state.
	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	/// The live particles.
	pub fn particles(&self) -> &ParticleSystem {
		&self.system
	}

	/// Handle of the queued frame, if one is outstanding.
	pub fn pending_frame(&self) -> Option<FrameHandle> {
		self.pending
	}

	/// Replace all particles with a fresh batch sized for the current surface.
	pub fn init(&mut self, sizes: &impl SizeSource) {
		let (width, height) = sizes.surface_size();
		let class = self.config.classify(sizes.viewport_width());
		let count = self.config.particle_count(width, height, class);
		self.system = ParticleSystem::new(&self.config.spawn, count, width, height, &mut self.rng);
		debug!(
			"site-fx: seeded {} particles on {}x{} ({:?})",
			count, width, height, class
		);
	}

	/// Begin the frame loop. Only valid from `Stopped`.
	pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
		if self.lifecycle != Lifecycle::Stopped {
			return;
		}
		self.lifecycle = Lifecycle::Running;
		self.schedule(scheduler);
	}

	/// One tick of the loop: draw a frame and queue the next.
	///
	/// Does nothing unless running, so a late callback after a pause is inert.
	pub fn frame(
		&mut self,
		surface: &mut impl Surface,
		theme: &impl ThemeStore,
		scheduler: &mut impl FrameScheduler,
	) {
		self.pending = None;
		if self.lifecycle != Lifecycle::Running {
			return;
		}
		let base = self.palette.base(theme.is_dark());
		render::frame(&mut self.system, surface, base, &self.config.connection);
		self.schedule(scheduler);
	}

	/// Stop drawing until [`resume`](Self::resume). Cancels the pending frame.
	pub fn pause(&mut self, scheduler: &mut impl FrameScheduler) {
		if self.lifecycle != Lifecycle::Running {
			return;
		}
		self.cancel_pending(scheduler);
		self.lifecycle = Lifecycle::Paused;
	}

	/// Restart the loop from the current particle state.
	pub fn resume(&mut self, scheduler: &mut impl FrameScheduler) {
		if self.lifecycle != Lifecycle::Paused {
			return;
		}
		self.lifecycle = Lifecycle::Running;
		self.schedule(scheduler);
	}

	/// Tear down: cancel anything pending and return to `Stopped`.
	pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
		self.cancel_pending(scheduler);
		self.lifecycle = Lifecycle::Stopped;
	}

	/// Pause while hidden, resume from the current particles once visible.
	pub fn on_visibility_change(
		&mut self,
		visibility: &impl VisibilitySource,
		scheduler: &mut impl FrameScheduler,
	) {
		if visibility.is_hidden() {
			self.pause(scheduler);
		} else {
			self.resume(scheduler);
		}
	}

	/// The page is being hidden for navigation.
	///
	/// A page kept in the back/forward cache may come back, so it is only
	/// paused; otherwise the loop is torn down.
	pub fn on_page_hide(&mut self, persisted: bool, scheduler: &mut impl FrameScheduler) {
		if persisted {
			self.pause(scheduler);
		} else {
			self.stop(scheduler);
		}
	}

	/// The page was shown again, possibly restored from the back/forward cache.
	pub fn on_page_show(
		&mut self,
		persisted: bool,
		visibility: &impl VisibilitySource,
		scheduler: &mut impl FrameScheduler,
	) {
		if persisted {
			self.on_visibility_change(visibility, scheduler);
		}
	}

	/// Reseed for the new surface size. The lifecycle is left as it was.
	pub fn on_resize(&mut self, sizes: &impl SizeSource) {
		self.init(sizes);
	}

	/// Queue the next frame; a refused request leaves the loop `Stopped`.
	fn schedule(&mut self, scheduler: &mut impl FrameScheduler) {
		self.pending = scheduler.request();
		if self.pending.is_none() {
			warn!("site-fx: frame request refused, particle field stopped");
			self.lifecycle = Lifecycle::Stopped;
		}
	}

	fn cancel_pending(&mut self, scheduler: &mut impl FrameScheduler) {
		if let Some(handle) = self.pending.take() {
			scheduler.cancel(handle);
		}
	}
}
