#![forbid(unsafe_code)]

//! Perch public facade crate.
//!
//! Viewport-aware placement for floating overlays: bubble toolbars, context
//! menus, and the submenus that cascade out of them. This crate re-exports
//! the stable surface of the internal crates and offers a small prelude.
//!
//! - `perch-core`: geometry primitives and host events
//! - `perch-layout`: the pure placement and submenu cascade resolvers
//! - `perch-runtime`: the live tracking controller and anchor adapters
//!
//! # Example
//!
//! ```
//! use perch::prelude::*;
//!
//! let request = PlacementRequest::new(Rect::new(500.0, 580.0, 100.0, 20.0), Size::new(200.0, 300.0));
//! let placed = perch::resolve(&request, Size::new(1024.0, 600.0));
//! assert_eq!(placed.side, Side::Above);
//! assert_eq!((placed.x, placed.y), (450.0, 270.0));
//! ```

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use perch_core::event::{
    Event, HitTarget, KeyCode, KeyEvent, KeyEventKind, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use perch_core::event_coalescer::EventCoalescer;
pub use perch_core::geometry::{Rect, Size, clamp};

// --- Layout re-exports -----------------------------------------------------

pub use perch_layout::{
    DEFAULT_MARGIN, PlacementRequest, PlacementResult, Side, resolve, resolve_submenu,
};

// --- Runtime re-exports ----------------------------------------------------

pub use perch_runtime::{
    ConfigError, EventOutcome, Host, Layout, ListenerHandle, ListenerKind, ListenerSet,
    OverlayConfig, OverlayController, OverlayState, PanelId, PanelPlacement, Phase, Reposition,
    SubmenuId, TrackingError, point_anchor, selection_anchor, trigger_anchor,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Error, Fallback, Result};

// --- Config loading -------------------------------------------------------

/// Load an [`OverlayConfig`] from a file, choosing the format by extension.
///
/// `.json` files are read as JSON; anything else is read as TOML.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<OverlayConfig> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        OverlayConfig::from_json_file(path)?
    } else {
        OverlayConfig::from_toml_file(path)?
    };
    Ok(config)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Event, Fallback, Host, Layout, OverlayConfig, OverlayController, PanelId,
        PlacementRequest, PlacementResult, Rect, Result, Side, Size, SubmenuId,
    };

    pub use crate::{core, layout, runtime};
}

pub use perch_core as core;
pub use perch_layout as layout;
pub use perch_runtime as runtime;
