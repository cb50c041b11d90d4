#![forbid(unsafe_code)]

//! Property-based invariant tests for the overlay controller.
//!
//! Random sequences of lifecycle calls and host events must keep:
//!
//! 1. At most one submenu open, and anchors tracked only for it
//! 2. No listener attached while closed; none leaked after close
//! 3. Every measured panel placed inside the viewport margin box
//! 4. Submenus always stacked above the root panel

use perch_core::event::{Event, KeyCode, KeyEvent, PointerEvent};
use perch_core::geometry::{Rect, Size};
use perch_harness::SceneHost;
use perch_runtime::{Host, OverlayController, PanelId, Phase, SubmenuId};
use proptest::prelude::*;

const SUBMENUS: [&str; 3] = ["colors", "remove-colors", "highlight"];

#[derive(Debug, Clone)]
enum Op {
    Open { x: u16, y: u16, w: u16, h: u16 },
    Close,
    OpenSubmenu { which: usize, row: u16 },
    CloseSubmenu,
    Reposition,
    Frame,
    Resize { w: u16, h: u16 },
    Reflow,
    Escape,
    PointerDown { x: u16, y: u16 },
}

// ── Strategies ──────────────────────────────────────────────────────────

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u16..1200, 0u16..800, 0u16..200, 0u16..40)
            .prop_map(|(x, y, w, h)| Op::Open { x, y, w, h }),
        1 => Just(Op::Close),
        3 => (0usize..SUBMENUS.len(), 0u16..8).prop_map(|(which, row)| Op::OpenSubmenu { which, row }),
        1 => Just(Op::CloseSubmenu),
        2 => Just(Op::Reposition),
        3 => Just(Op::Frame),
        2 => (300u16..1600, 300u16..1000).prop_map(|(w, h)| Op::Resize { w, h }),
        1 => Just(Op::Reflow),
        1 => Just(Op::Escape),
        1 => (0u16..1600, 0u16..1000).prop_map(|(x, y)| Op::PointerDown { x, y }),
    ]
}

fn host() -> SceneHost {
    let mut host = SceneHost::new(Size::new(1280.0, 800.0)).with_root_size(Size::new(200.0, 260.0));
    for id in SUBMENUS {
        host.set_panel_size(PanelId::Submenu(SubmenuId::from(id)), Size::new(160.0, 180.0));
    }
    host
}

fn apply(overlay: &mut OverlayController, host: &mut SceneHost, op: &Op) {
    match *op {
        Op::Open { x, y, w, h } => {
            overlay.open(&*host, Rect::new(x as f32, y as f32, w as f32, h as f32));
        }
        Op::Close => {
            overlay.close(host);
        }
        Op::OpenSubmenu { which, row } => {
            let root = overlay.layout().root.as_ref().map(|p| p.rect());
            let trigger = match root {
                Some(r) => Rect::new(r.x, r.y + row as f32 * 30.0, r.width, 30.0),
                None => Rect::new(0.0, 0.0, 100.0, 30.0),
            };
            let _ = overlay.open_submenu(&*host, SUBMENUS[which], trigger);
        }
        Op::CloseSubmenu => {
            overlay.close_submenu();
        }
        Op::Reposition => {
            overlay.reposition(host);
        }
        Op::Frame => {
            overlay.frame(host);
        }
        Op::Resize { w, h } => {
            let size = Size::new(w as f32, h as f32);
            host.set_viewport(size);
            overlay.handle_event(host, Event::resize(size));
        }
        Op::Reflow => {
            overlay.handle_event(host, Event::Reflow);
        }
        Op::Escape => {
            overlay.handle_event(host, Event::Key(KeyEvent::new(KeyCode::Escape)));
        }
        Op::PointerDown { x, y } => {
            overlay.handle_event(host, Event::Pointer(PointerEvent::down(x as f32, y as f32)));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Structural invariants after every step
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_submenu_and_no_stray_listeners(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut host = host();
        let mut overlay = OverlayController::default();

        for op in &ops {
            apply(&mut overlay, &mut host, op);

            prop_assert!(overlay.state().is_consistent(), "inconsistent after {:?}", op);
            prop_assert!(overlay.state().tracked_submenus() <= 1);
            if overlay.phase() == Phase::Closed {
                prop_assert_eq!(host.live_count(), 0, "listeners live while closed after {:?}", op);
                prop_assert!(overlay.layout().is_empty());
            }
            prop_assert_eq!(host.live_count(), overlay.listeners().iter().count());
        }

        overlay.close(&mut host);
        prop_assert_eq!(host.live_count(), 0);
        prop_assert_eq!(host.stale_unsubscribes(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3-4. Placement invariants after each reposition pass
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placed_panels_fit_and_stack(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut host = host();
        let mut overlay = OverlayController::default();

        for op in &ops {
            apply(&mut overlay, &mut host, op);
            if !overlay.is_open() {
                continue;
            }
            let pass = overlay.reposition(&mut host);
            prop_assert!(!pass.frozen, "settle guard tripped after {:?}", op);
            let viewport = host.viewport();
            for panel in pass.layout.panels() {
                let rect = panel.rect();
                prop_assert!(rect.x >= 10.0 && rect.y >= 10.0, "{:?}", panel);
                prop_assert!(rect.right() <= viewport.width - 10.0, "{:?} in {:?}", panel, viewport);
                prop_assert!(rect.bottom() <= viewport.height - 10.0, "{:?} in {:?}", panel, viewport);
            }
            if let (Some(root), Some(sub)) = (&pass.layout.root, &pass.layout.submenu) {
                prop_assert!(sub.z_index > root.z_index);
            }
        }
        overlay.close(&mut host);
        host.assert_no_leaks();
    }
}
