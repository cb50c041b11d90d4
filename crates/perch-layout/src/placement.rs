#![forbid(unsafe_code)]

//! Placement resolver for floating panels anchored to a rectangle.
//!
//! [`resolve`] computes where a panel (a selection bubble, a context menu, a
//! dropdown) should render relative to its anchor so that it stays inside
//! the viewport. It flips to the opposite side when the preferred side is
//! too tight and then clamps each axis independently.
//!
//! The resolver is a pure function of its inputs. The same request against
//! the same viewport always yields the same [`PlacementResult`], which is
//! what keeps a panel from flickering while it stays open.
//!
//! # Example
//!
//! ```
//! use perch_core::geometry::{Rect, Size};
//! use perch_layout::placement::{resolve, PlacementRequest, Side};
//!
//! let anchor = Rect::new(500.0, 580.0, 100.0, 20.0);
//! let request = PlacementRequest::new(anchor, Size::new(200.0, 300.0)).margin(10.0);
//! let result = resolve(&request, Size::new(1024.0, 600.0));
//!
//! // No room below the anchor, so the panel flips above it.
//! assert_eq!(result.side, Side::Above);
//! assert_eq!(result.y, 270.0);
//! ```

use std::fmt;

use perch_core::geometry::{Rect, Size, center_on, clamp};
use serde::{Deserialize, Serialize};

/// Margin used when a request does not set one.
pub const DEFAULT_MARGIN: f32 = 10.0;

/// Which side of the anchor a panel is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Below the anchor, horizontally centered on it.
    #[default]
    Below,
    /// Above the anchor, horizontally centered on it.
    Above,
    /// To the right of the anchor, top edges aligned.
    Right,
    /// To the left of the anchor, top edges aligned.
    Left,
}

impl Side {
    /// Return the opposite side for flip logic.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Below => Self::Above,
            Self::Above => Self::Below,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }

    /// Whether this is a vertical (above/below) placement.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Below | Self::Above)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Above => "above",
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the resolvers need to place one panel.
///
/// Built by the caller each time a panel is shown or repositioned; the
/// viewport is passed separately so it is always read fresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// The rectangle the panel is positioned relative to.
    pub anchor: Rect,
    /// Measured (or estimated) panel size.
    pub panel: Size,
    /// Minimum distance from the viewport edges and from the anchor.
    pub margin: f32,
    /// Side to try first.
    pub preferred_side: Side,
    /// Bounds of the parent panel, for submenus.
    pub parent_bounds: Option<Rect>,
}

impl PlacementRequest {
    /// Request placing `panel` below `anchor` with the default margin.
    pub fn new(anchor: Rect, panel: Size) -> Self {
        Self {
            anchor,
            panel,
            margin: DEFAULT_MARGIN,
            preferred_side: Side::Below,
            parent_bounds: None,
        }
    }

    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the preferred side.
    #[must_use]
    pub fn preferred_side(mut self, side: Side) -> Self {
        self.preferred_side = side;
        self
    }

    /// Set the parent panel bounds (required by
    /// [`resolve_submenu`](crate::cascade::resolve_submenu)).
    #[must_use]
    pub fn parent_bounds(mut self, parent: Rect) -> Self {
        self.parent_bounds = Some(parent);
        self
    }

    /// The margin actually applied: negative or non-finite margins count as 0.
    #[must_use]
    pub fn effective_margin(&self) -> f32 {
        if self.margin.is_finite() && self.margin > 0.0 {
            self.margin
        } else {
            0.0
        }
    }

    /// Whether the anchor and panel are usable numbers.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.anchor.is_finite() && self.panel.is_valid()
    }
}

/// Where a panel ended up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Left edge in viewport coordinates.
    pub x: f32,
    /// Top edge in viewport coordinates.
    pub y: f32,
    /// The side actually used, which may differ from the preferred one.
    pub side: Side,
    /// Whether either axis was pulled in to fit the viewport.
    pub clamped: bool,
}

impl PlacementResult {
    /// Safe position used for malformed input: the top-left margin corner.
    #[must_use]
    pub fn fallback(margin: f32, side: Side) -> Self {
        Self {
            x: margin,
            y: margin,
            side,
            clamped: true,
        }
    }

    /// The panel's rectangle at this position.
    #[must_use]
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.x, self.y, size)
    }
}

/// Resolve a root panel's position.
///
/// 1. Try `preferred_side` (default below).
/// 2. If that side has less than `panel + margin` of room and the opposite
///    side has strictly more room, flip.
/// 3. Center on the anchor across the placement axis, then clamp `x` into
///    `[margin, viewport.width - width - margin]` and `y` likewise.
///
/// Malformed input (NaN, infinities, negative sizes) yields
/// [`PlacementResult::fallback`] instead of failing. The result is never
/// above or left of the margin line.
pub fn resolve(request: &PlacementRequest, viewport: Size) -> PlacementResult {
    let margin = request.effective_margin();
    if !request.is_well_formed() || !viewport.is_valid() {
        #[cfg(feature = "tracing")]
        tracing::debug!(?request, ?viewport, "malformed placement request, using fallback");
        return PlacementResult::fallback(margin, request.preferred_side);
    }

    let anchor = request.anchor;
    let panel = request.panel;
    let side = choose_side(&anchor, panel, margin, request.preferred_side, viewport);
    let (cx, cy) = candidate(&anchor, panel, margin, side);
    let x = clamp(cx, margin, viewport.width - panel.width - margin);
    let y = clamp(cy, margin, viewport.height - panel.height - margin);

    #[cfg(feature = "tracing")]
    if side != request.preferred_side {
        tracing::trace!(from = %request.preferred_side, to = %side, "placement flipped");
    }

    PlacementResult {
        x,
        y,
        side,
        clamped: x != cx || y != cy,
    }
}

/// Room between the anchor and the viewport edge on `side`.
fn available_space(anchor: &Rect, viewport: Size, side: Side) -> f32 {
    match side {
        Side::Below => viewport.height - anchor.bottom(),
        Side::Above => anchor.top(),
        Side::Right => viewport.width - anchor.right(),
        Side::Left => anchor.left(),
    }
}

/// Panel extent along the placement axis of `side`.
fn extent(panel: Size, side: Side) -> f32 {
    if side.is_vertical() {
        panel.height
    } else {
        panel.width
    }
}

fn choose_side(anchor: &Rect, panel: Size, margin: f32, preferred: Side, viewport: Size) -> Side {
    let available = available_space(anchor, viewport, preferred);
    if available >= extent(panel, preferred) + margin {
        return preferred;
    }
    let flipped = preferred.opposite();
    if available_space(anchor, viewport, flipped) > available {
        flipped
    } else {
        preferred
    }
}

/// Unclamped origin for `side`.
fn candidate(anchor: &Rect, panel: Size, margin: f32, side: Side) -> (f32, f32) {
    let (center_x, _) = center_on(anchor, panel);
    match side {
        Side::Below => (center_x, anchor.bottom() + margin),
        Side::Above => (center_x, anchor.top() - panel.height - margin),
        Side::Right => (anchor.right() + margin, anchor.top()),
        Side::Left => (anchor.left() - panel.width - margin, anchor.top()),
    }
}
