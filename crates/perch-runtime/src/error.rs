#![forbid(unsafe_code)]

//! Errors reported by the tracking controller.

use std::fmt;

use crate::host::{PanelId, SubmenuId};

/// A lifecycle call that could not be honoured.
///
/// None of these are fatal: the overlay keeps its previous layout and the
/// caller decides whether to retry on the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingError {
    /// A submenu was requested while the root panel is closed.
    RootClosed {
        /// The submenu that was requested.
        submenu: SubmenuId,
    },
    /// The host had no rendered size for a panel during a reposition pass.
    MeasurementUnavailable(PanelId),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootClosed { submenu } => {
                write!(f, "cannot open submenu '{submenu}': root panel is closed")
            }
            Self::MeasurementUnavailable(panel) => {
                write!(f, "no measurement available for panel {panel}")
            }
        }
    }
}

impl std::error::Error for TrackingError {}
