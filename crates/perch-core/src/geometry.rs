#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are CSS pixels with the origin at the top-left of the
//! viewport. Everything here is pure: values are snapshots taken from the
//! host and discarded after a placement pass.

/// An axis-aligned rectangle, typically an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Create a rectangle at `(x, y)` with the given size.
    #[inline]
    pub const fn from_origin_size(x: f32, y: f32, size: Size) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Finite origin and a finite, non-negative size.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.size().is_valid()
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the two rectangles share any interior area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// there is no overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::from_edges(x, y, right, bottom))
        } else {
            None
        }
    }

    /// The smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

/// Width and height of a panel or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Finite and non-negative in both dimensions.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// Constrain `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics and never returns NaN: a NaN
/// value yields `min`, non-finite bounds are treated as `0.0`, and when
/// `min > max` (a viewport smaller than the panel plus margins) `min` wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    let min = finite_or_zero(min);
    let max = finite_or_zero(max);
    if min > max || value.is_nan() {
        return min;
    }
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Whether a panel starting at `x` crosses the right margin line.
#[inline]
pub fn overflows_right(x: f32, width: f32, viewport_width: f32, margin: f32) -> bool {
    x + width > viewport_width - margin
}

/// Whether a panel starting at `x` crosses the left margin line.
#[inline]
pub fn overflows_left(x: f32, margin: f32) -> bool {
    x < margin
}

/// Whether a panel starting at `y` crosses the top margin line.
#[inline]
pub fn overflows_top(y: f32, margin: f32) -> bool {
    y < margin
}

/// Whether a panel starting at `y` crosses the bottom margin line.
#[inline]
pub fn overflows_bottom(y: f32, height: f32, viewport_height: f32, margin: f32) -> bool {
    y + height > viewport_height - margin
}

/// Origin that centers `panel` horizontally on the anchor's midpoint.
///
/// The returned `y` is the anchor's top edge; placement code replaces it
/// with the side-specific offset.
#[inline]
pub fn center_on(anchor: &Rect, panel: Size) -> (f32, f32) {
    (anchor.center_x() - panel.width / 2.0, anchor.y)
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
