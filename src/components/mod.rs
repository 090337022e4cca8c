//! Page features. Each one wires itself to existing markup and is skipped
//! when that markup is absent.

pub mod nav_menu;
pub mod page_intro;
pub mod particle_field;
pub mod reveal;
pub mod scroll_effects;
pub mod theme_toggle;
