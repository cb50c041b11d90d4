#![forbid(unsafe_code)]

//! Submenu cascade resolver.
//!
//! Submenus expand sideways from their parent panel rather than below their
//! trigger, so they never cover sibling items. Direction is decided against
//! the parent panel's bounds, not the trigger's, so hovering different
//! triggers in the same open panel cannot make the submenu jump sides.

use perch_core::geometry::{Size, clamp, overflows_left, overflows_right};

use crate::placement::{PlacementRequest, PlacementResult, Side};

/// Resolve a submenu's position next to its parent panel.
///
/// 1. Expand right: `x = parent.right + margin`, top-aligned with the
///    trigger (`request.anchor`).
/// 2. If that overflows the right edge, flip left:
///    `x = parent.left - width - margin`.
/// 3. If the left candidate overflows too, take whichever side has strictly
///    more free space next to the parent (ties keep the flipped side) and
///    accept a clamped result.
///
///    The side is picked before clamping, so the panel stays on the roomier
///    side pulled in from the edge rather than pinned to the left margin:
///    a 140px submenu beside a parent spanning `10..270` in a 300px viewport
///    lands at `x = 150` on the right.
/// 4. Shift up just enough to clear the bottom edge, never above `margin`.
///
/// A request whose `preferred_side` is [`Side::Left`] tries left first
/// (right-to-left layouts); every other side starts on the right.
///
/// A missing `parent_bounds` or malformed geometry yields
/// [`PlacementResult::fallback`].
pub fn resolve_submenu(request: &PlacementRequest, viewport: Size) -> PlacementResult {
    let margin = request.effective_margin();
    let first = match request.preferred_side {
        Side::Left => Side::Left,
        _ => Side::Right,
    };

    let parent = match request.parent_bounds {
        Some(parent) if parent.is_finite() => parent,
        _ => return PlacementResult::fallback(margin, first),
    };
    if !request.is_well_formed() || !viewport.is_valid() {
        return PlacementResult::fallback(margin, first);
    }

    let panel = request.panel;
    let right_x = parent.right() + margin;
    let left_x = parent.left() - panel.width - margin;
    let fits = |side: Side| match side {
        Side::Left => !overflows_left(left_x, margin),
        _ => !overflows_right(right_x, panel.width, viewport.width, margin),
    };

    let second = first.opposite();
    let side = if fits(first) {
        first
    } else if fits(second) {
        second
    } else {
        let room_right = viewport.width - parent.right();
        let room_left = parent.left();
        let (room_first, room_second) = match first {
            Side::Left => (room_left, room_right),
            _ => (room_right, room_left),
        };
        if room_first > room_second { first } else { second }
    };

    #[cfg(feature = "tracing")]
    if side != first {
        tracing::trace!(from = %first, to = %side, "submenu flipped");
    }

    let cx = match side {
        Side::Left => left_x,
        _ => right_x,
    };
    let cy = request.anchor.top();
    let x = clamp(cx, margin, viewport.width - panel.width - margin);
    let y = clamp(cy, margin, viewport.height - panel.height - margin);

    PlacementResult {
        x,
        y,
        side,
        clamped: x != cx || y != cy,
    }
}
