#![forbid(unsafe_code)]

//! Unified error type and fallback policy.
//!
//! Each subsystem keeps its own typed error. [`Error`] wraps them so an
//! embedding application can propagate a single type, and [`Error::fallback`]
//! names what the overlay should do instead of failing: keep the last
//! placement, ignore the request, or continue with default settings.

use std::fmt;

use perch_runtime::{ConfigError, TrackingError};

/// Top-level error for Perch APIs.
#[derive(Debug)]
pub enum Error {
    /// Lifecycle or measurement failure from the tracking controller.
    Tracking(TrackingError),
    /// Configuration could not be read, parsed or validated.
    Config(ConfigError),
}

/// Standard result type for Perch APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Fallback ────────────────────────────────────────────────────────────

/// What the host should do when an error surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Leave the panel where it was last placed.
    KeepLayout,
    /// Drop the request; state is unchanged.
    IgnoreRequest,
    /// Continue with [`OverlayConfig::default`](perch_runtime::OverlayConfig::default).
    UseDefaults,
}

impl Error {
    /// Determine the fallback for this error.
    pub fn fallback(&self) -> Fallback {
        match self {
            Self::Tracking(TrackingError::MeasurementUnavailable(_)) => Fallback::KeepLayout,
            Self::Tracking(TrackingError::RootClosed { .. }) => Fallback::IgnoreRequest,
            Self::Config(_) => Fallback::UseDefaults,
        }
    }

    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Tracking(_) => "tracking",
            Self::Config(_) => "config",
        }
    }

    /// Whether the overlay itself is unaffected and the error is purely
    /// informational.
    pub fn is_transient(&self) -> bool {
        matches!(self.fallback(), Fallback::KeepLayout)
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tracking(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepLayout => write!(f, "keep_layout"),
            Self::IgnoreRequest => write!(f, "ignore_request"),
            Self::UseDefaults => write!(f, "use_defaults"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tracking(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<TrackingError> for Error {
    fn from(err: TrackingError) -> Self {
        Self::Tracking(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Config(ConfigError::Io(err))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
