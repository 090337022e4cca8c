//! Browser wiring for the particle background.
//!
//! Attaches to an existing canvas, sizes it to its CSS box, and drives
//! [`ParticleField`] from `requestAnimationFrame`. Window `resize` reseeds,
//! document `visibilitychange` pauses and resumes. `pagehide` pauses a page
//! entering the back/forward cache and stops one that is unloading;
//! `pageshow` picks a restored page back up.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, PageTransitionEvent, Window,
};

use super::config::FieldConfig;
use super::state::{FrameHandle, FrameScheduler, ParticleField, SizeSource, VisibilitySource};
use super::theme::FieldPalette;
use crate::components::theme_toggle::BrowserThemeStore;
use crate::dom::{self, Listener};
use crate::error::SetupError;

/// DOM id of the background canvas.
pub const CANVAS_ID: &str = "particles-canvas";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` scheduling for a single shared callback.
#[derive(Clone)]
struct RafScheduler {
	window: Window,
	callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
	fn request(&mut self) -> Option<FrameHandle> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => Some(handle),
			Err(e) => {
				warn!("site-fx: requestAnimationFrame failed: {:?}", e);
				None
			}
		}
	}

	fn cancel(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

/// Canvas backing store sized from its rendered box.
#[derive(Clone)]
struct CanvasSize {
	window: Window,
	canvas: HtmlCanvasElement,
}

impl CanvasSize {
	/// Match the pixel buffer to the element's layout size.
	fn fit(&self) {
		self.canvas.set_width(self.canvas.offset_width().max(0) as u32);
		self.canvas.set_height(self.canvas.offset_height().max(0) as u32);
	}
}

impl SizeSource for CanvasSize {
	fn surface_size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn viewport_width(&self) -> f64 {
		self.window
			.inner_width()
			.ok()
			.and_then(|w| w.as_f64())
			.unwrap_or(0.0)
	}
}

struct DocumentVisibility(Document);

impl VisibilitySource for DocumentVisibility {
	fn is_hidden(&self) -> bool {
		self.0.hidden()
	}
}

/// Whether a page transition involves the back/forward cache.
fn persisted(ev: &Event) -> bool {
	ev.dyn_ref::<PageTransitionEvent>()
		.is_some_and(PageTransitionEvent::persisted)
}

/// Empty `slot` when setup failed, breaking any cycle through its contents.
fn release_on_error<C, T>(
	slot: &RefCell<Option<C>>,
	result: Result<T, SetupError>,
) -> Result<T, SetupError> {
	if result.is_err() {
		slot.borrow_mut().take();
	}
	result
}

/// A running particle background bound to the page.
///
/// Dropping the host stops the loop and removes its listeners; call
/// [`keep_alive`](Self::keep_alive) to leave it running for the page's life.
pub struct ParticleFieldHost {
	field: Rc<RefCell<ParticleField>>,
	scheduler: RafScheduler,
	_listeners: Vec<Listener>,
}

impl ParticleFieldHost {
	/// Attach to `#particles-canvas` and start animating.
	///
	/// Fails without side effects when the canvas or its 2D context is absent.
	pub fn attach(config: FieldConfig, theme: BrowserThemeStore) -> Result<Self, SetupError> {
		let window = dom::window()?;
		let document = dom::document()?;
		let canvas: HtmlCanvasElement = dom::by_id(&document, CANVAS_ID)?;
		let mut ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(SetupError::MissingElement("2d canvas context"))?
			.dyn_into()
			.map_err(|_| SetupError::MissingElement("2d canvas context"))?;

		let sizes = CanvasSize {
			window: window.clone(),
			canvas,
		};
		sizes.fit();

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let field = Rc::new(RefCell::new(ParticleField::new(
			config,
			FieldPalette::default(),
			SmallRng::seed_from_u64(seed),
		)));
		let scheduler = RafScheduler {
			window: window.clone(),
			callback: Rc::new(RefCell::new(None)),
		};

		let (field_anim, mut scheduler_anim) = (field.clone(), scheduler.clone());
		*scheduler.callback.borrow_mut() = Some(Closure::new(move || {
			field_anim
				.borrow_mut()
				.frame(&mut ctx, &theme, &mut scheduler_anim);
		}));

		// The frame closure holds a scheduler clone that points back at it.
		let listeners = release_on_error(
			&*scheduler.callback,
			Self::listen(&window, &document, &field, &scheduler, &sizes),
		)?;

		{
			let mut f = field.borrow_mut();
			f.init(&sizes);
			f.start(&mut scheduler.clone());
			info!(
				"site-fx: particle field running with {} particles",
				f.particles().len()
			);
		}

		Ok(Self {
			field,
			scheduler,
			_listeners: listeners,
		})
	}

	fn listen(
		window: &Window,
		document: &Document,
		field: &Rc<RefCell<ParticleField>>,
		scheduler: &RafScheduler,
		sizes: &CanvasSize,
	) -> Result<Vec<Listener>, SetupError> {
		let mut listeners = Vec::with_capacity(4);

		let (field_resize, sizes_resize) = (field.clone(), sizes.clone());
		listeners.push(Listener::new(window, "resize", move |_| {
			sizes_resize.fit();
			field_resize.borrow_mut().on_resize(&sizes_resize);
		})?);

		let (field_vis, mut scheduler_vis) = (field.clone(), scheduler.clone());
		let visibility = DocumentVisibility(document.clone());
		listeners.push(Listener::new(document, "visibilitychange", move |_| {
			field_vis
				.borrow_mut()
				.on_visibility_change(&visibility, &mut scheduler_vis);
		})?);

		let (field_hide, mut scheduler_hide) = (field.clone(), scheduler.clone());
		listeners.push(Listener::new(window, "pagehide", move |ev| {
			field_hide
				.borrow_mut()
				.on_page_hide(persisted(&ev), &mut scheduler_hide);
		})?);

		let (field_show, mut scheduler_show) = (field.clone(), scheduler.clone());
		let visibility = DocumentVisibility(document.clone());
		listeners.push(Listener::new(window, "pageshow", move |ev| {
			field_show
				.borrow_mut()
				.on_page_show(persisted(&ev), &visibility, &mut scheduler_show);
		})?);

		Ok(listeners)
	}

	/// Leave the field running until the page goes away.
	pub fn keep_alive(self) {
		std::mem::forget(self);
	}
}

impl Drop for ParticleFieldHost {
	fn drop(&mut self) {
		self.field.borrow_mut().stop(&mut self.scheduler);
		self.scheduler.callback.borrow_mut().take();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failed_setup_releases_frame_callback() {
		let captured = Rc::new(());
		let slot = RefCell::new(Some(captured.clone()));

		let kept = release_on_error(&slot, Ok(3));
		assert!(matches!(kept, Ok(3)));
		assert_eq!(Rc::strong_count(&captured), 2);

		let failed = release_on_error::<_, ()>(&slot, Err(SetupError::NoBrowser));
		assert!(matches!(failed, Err(SetupError::NoBrowser)));
		assert!(slot.borrow().is_none());
		assert_eq!(Rc::strong_count(&captured), 1);
	}
}
