#![forbid(unsafe_code)]

//! Turning editor inputs into anchor rectangles.
//!
//! Every floating panel call site boils down to one of three anchors: the
//! pointer position (context menu), the selection's bounding box (bubble
//! toolbar), or a trigger element's box (dropdown, submenu item).

use perch_core::geometry::Rect;

/// Zero-size anchor at a pointer position.
///
/// Returns `None` for a non-finite position.
#[must_use]
pub fn point_anchor(x: f32, y: f32) -> Option<Rect> {
    let rect = Rect::new(x, y, 0.0, 0.0);
    rect.is_finite().then_some(rect)
}

/// Bounding box of a selection's client rectangles.
///
/// Empty and malformed rectangles (collapsed line boxes, NaN from detached
/// nodes) are skipped. A selection with nothing left yields `None`: there is
/// nothing to anchor to, so no panel should open.
pub fn selection_anchor<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects
        .into_iter()
        .filter(|r| r.is_finite() && !r.is_empty())
        .reduce(|acc, r| acc.union(&r))
}

/// Validate a trigger element's bounding box.
///
/// Zero-size triggers are accepted (a hidden item still has a position);
/// non-finite or negative-size ones are not.
#[must_use]
pub fn trigger_anchor(rect: Rect) -> Option<Rect> {
    rect.is_finite().then_some(rect)
}
