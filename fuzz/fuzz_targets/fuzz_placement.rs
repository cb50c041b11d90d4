#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use perch_core::geometry::{Rect, Size};
use perch_layout::{PlacementRequest, Side, resolve, resolve_submenu};

#[derive(Debug, Arbitrary)]
struct Input {
    anchor: [f32; 4],
    panel: [f32; 2],
    parent: Option<[f32; 4]>,
    viewport: [f32; 2],
    margin: f32,
    side: u8,
}

fn side(raw: u8) -> Side {
    match raw % 4 {
        0 => Side::Below,
        1 => Side::Above,
        2 => Side::Right,
        _ => Side::Left,
    }
}

fuzz_target!(|input: Input| {
    let [x, y, w, h] = input.anchor;
    let mut request = PlacementRequest::new(
        Rect::new(x, y, w, h),
        Size::new(input.panel[0], input.panel[1]),
    )
    .margin(input.margin)
    .preferred_side(side(input.side));
    if let Some([px, py, pw, ph]) = input.parent {
        request = request.parent_bounds(Rect::new(px, py, pw, ph));
    }
    let viewport = Size::new(input.viewport[0], input.viewport[1]);
    let margin = request.effective_margin();

    let root = resolve(&request, viewport);
    assert!(root.x.is_finite() && root.y.is_finite(), "{root:?}");
    assert!(root.x >= margin && root.y >= margin, "{root:?} margin {margin}");
    // Same input, same answer.
    assert_eq!(root, resolve(&request, viewport));

    let sub = resolve_submenu(&request, viewport);
    assert!(sub.x.is_finite() && sub.y.is_finite(), "{sub:?}");
    assert!(sub.x >= margin && sub.y >= margin, "{sub:?} margin {margin}");
    assert!(!sub.side.is_vertical());
});
