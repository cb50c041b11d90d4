#![forbid(unsafe_code)]

//! Live tracking for floating overlays.
//!
//! [`OverlayController`] owns the open/closed state of one overlay (a root
//! panel plus at most one submenu), computes placements through
//! `perch-layout`, and manages the document-level listeners that dismiss
//! it. Everything environment-specific goes through the [`Host`] trait.
//!
//! # Modules
//!
//! - [`controller`]: lifecycle operations and the reposition pass
//! - [`state`]: phase, anchors and the current [`Layout`]
//! - [`listener`]: listener kinds and reconciliation against the host
//! - [`host`]: the [`Host`] trait and panel identifiers
//! - [`anchor`]: building anchors from pointer positions, selections, triggers
//! - [`config`]: [`OverlayConfig`] and its loaders

pub mod anchor;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod listener;
pub mod state;

pub use anchor::{point_anchor, selection_anchor, trigger_anchor};
pub use config::{ConfigError, OverlayConfig};
pub use controller::{EventOutcome, OverlayController, Reposition};
pub use error::TrackingError;
pub use host::{Host, PanelId, SubmenuId};
pub use listener::{ListenerHandle, ListenerKind, ListenerSet};
pub use state::{Layout, OverlayState, PanelPlacement, Phase};
