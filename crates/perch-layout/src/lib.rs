#![forbid(unsafe_code)]

//! Placement solvers for floating panels.
//!
//! Two pure resolvers cover every floating panel an editor shows:
//!
//! - [`resolve`] places a root panel (selection bubble, context menu,
//!   toolbar dropdown) above or below its anchor, flipping when the
//!   preferred side is too tight and clamping into the viewport.
//! - [`resolve_submenu`] places a nested panel beside its parent panel,
//!   flipping left when the right side runs out.
//!
//! Neither touches the host; callers pass the anchor, the measured panel
//! size, and a freshly-read viewport.

pub mod cascade;
pub mod placement;

pub use cascade::resolve_submenu;
pub use placement::{DEFAULT_MARGIN, PlacementRequest, PlacementResult, Side, resolve};
