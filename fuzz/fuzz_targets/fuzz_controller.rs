#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use perch_core::event::{Event, HitTarget, KeyCode, KeyEvent, PointerEvent};
use perch_core::geometry::{Rect, Size};
use perch_harness::SceneHost;
use perch_runtime::{OverlayController, PanelId, Phase, SubmenuId};

#[derive(Debug, Arbitrary)]
enum Op {
    Open([f32; 4]),
    Close,
    OpenSubmenu(u8, [f32; 4]),
    CloseSubmenu,
    Reposition,
    Frame,
    Resize(f32, f32),
    Reflow,
    Select(Option<[f32; 4]>),
    Escape,
    PointerDown(f32, f32, bool),
    Measure(bool, f32, f32),
}

fn rect([x, y, w, h]: [f32; 4]) -> Rect {
    Rect::new(x, y, w, h)
}

fuzz_target!(|ops: Vec<Op>| {
    let mut host = SceneHost::new(Size::new(1024.0, 768.0)).with_root_size(Size::new(200.0, 240.0));
    let mut overlay = OverlayController::default();

    for op in ops.into_iter().take(256) {
        match op {
            Op::Open(anchor) => {
                overlay.open(&host, rect(anchor));
            }
            Op::Close => {
                overlay.close(&mut host);
            }
            Op::OpenSubmenu(id, trigger) => {
                let id = SubmenuId::new(format!("sub-{}", id % 4));
                let _ = overlay.open_submenu(&host, id, rect(trigger));
            }
            Op::CloseSubmenu => {
                overlay.close_submenu();
            }
            Op::Reposition => {
                overlay.reposition(&mut host);
            }
            Op::Frame => {
                overlay.frame(&mut host);
            }
            Op::Resize(w, h) => {
                let size = Size::new(w, h);
                host.set_viewport(size);
                overlay.handle_event(&mut host, Event::resize(size));
            }
            Op::Reflow => {
                overlay.handle_event(&mut host, Event::Reflow);
            }
            Op::Select(selection) => {
                overlay.handle_event(&mut host, Event::SelectionChange(selection.map(rect)));
            }
            Op::Escape => {
                overlay.handle_event(&mut host, Event::Key(KeyEvent::new(KeyCode::Escape)));
            }
            Op::PointerDown(x, y, inside) => {
                let target = if inside { HitTarget::Overlay } else { HitTarget::Unknown };
                overlay.handle_event(
                    &mut host,
                    Event::Pointer(PointerEvent::down(x, y).with_target(target)),
                );
            }
            Op::Measure(root, w, h) => {
                let panel = if root {
                    PanelId::Root
                } else {
                    PanelId::Submenu(SubmenuId::new("sub-0"))
                };
                host.set_panel_size(panel, Size::new(w, h));
            }
        }

        assert!(overlay.state().is_consistent());
        if overlay.phase() == Phase::Closed {
            assert_eq!(host.live_count(), 0);
        }
        for panel in overlay.layout().panels() {
            assert!(panel.left().is_finite() && panel.top().is_finite(), "{panel:?}");
        }
    }

    overlay.close(&mut host);
    host.assert_no_leaks();
});
