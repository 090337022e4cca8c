//! Animated particle-and-connection background.
//!
//! A bounded set of slowly drifting points is drawn on a canvas each frame,
//! with faint lines between any two points closer than a threshold:
//! - Particle count scales with surface area, capped per viewport class
//! - Particles bounce off the surface edges by reflecting their velocity
//! - Colors follow the resolved site theme
//! - The loop pauses while the page is hidden and reseeds on resize
//!
//! # Example
//!
//! ```ignore
//! use site_fx::components::particle_field::{FieldConfig, ParticleFieldHost};
//! use site_fx::components::theme_toggle::BrowserThemeStore;
//!
//! let host = ParticleFieldHost::attach(FieldConfig::default(), BrowserThemeStore::load())?;
//! host.keep_alive();
//! ```

mod component;
pub mod config;
mod particles;
mod render;
mod state;
pub mod theme;

pub use component::{CANVAS_ID, ParticleFieldHost};
pub use config::{FieldConfig, ViewportClass};
pub use particles::{Connection, Particle, ParticleSystem};
pub use render::Surface;
pub use state::{FrameHandle, FrameScheduler, Lifecycle, ParticleField, SizeSource, VisibilitySource};
pub use theme::{Color, FieldPalette};
