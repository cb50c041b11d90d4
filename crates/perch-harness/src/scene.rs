#![forbid(unsafe_code)]

//! Reference scenes and event bursts.
//!
//! Each [`Scene`] is a page layout an editor actually produces: a viewport,
//! an anchor, and the panel sizes the host will report once rendered.
//!
//! | Scene | Situation |
//! |-------|-----------|
//! | [`bubble_near_bottom`] | Selection bubble with no room below |
//! | [`context_menu_at_pointer`] | Right-click menu with a color submenu |
//! | [`cramped_submenu`] | Submenu too wide for either side of its parent |
//! | [`narrow_viewport`] | Panel larger than the viewport |

use perch_core::event::Event;
use perch_core::geometry::{Rect, Size};
use perch_runtime::SubmenuId;

use crate::host::SceneHost;

/// A submenu opened from one of the root panel's items.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmenuFixture {
    pub id: SubmenuId,
    /// Bounding box of the trigger item.
    pub trigger: Rect,
    /// Size the host reports once the submenu renders.
    pub size: Size,
}

/// A reproducible page layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: &'static str,
    pub viewport: Size,
    pub anchor: Rect,
    /// Size the host reports once the root panel renders.
    pub root_size: Size,
    pub submenu: Option<SubmenuFixture>,
}

impl Scene {
    /// A host that reports this scene's viewport and panel sizes.
    #[must_use]
    pub fn host(&self) -> SceneHost {
        let host = SceneHost::new(self.viewport).with_root_size(self.root_size);
        match &self.submenu {
            Some(sub) => host.with_submenu_size(sub.id.clone(), sub.size),
            None => host,
        }
    }
}

/// A 200x300 bubble over a selection at the very bottom of a 1024x600 page.
#[must_use]
pub fn bubble_near_bottom() -> Scene {
    Scene {
        name: "bubble_near_bottom",
        viewport: Size::new(1024.0, 600.0),
        anchor: Rect::new(500.0, 580.0, 100.0, 20.0),
        root_size: Size::new(200.0, 300.0),
        submenu: None,
    }
}

/// A context menu opened at the pointer with a color submenu.
#[must_use]
pub fn context_menu_at_pointer() -> Scene {
    Scene {
        name: "context_menu_at_pointer",
        viewport: Size::new(1280.0, 800.0),
        anchor: Rect::new(640.0, 200.0, 0.0, 0.0),
        root_size: Size::new(200.0, 260.0),
        submenu: Some(SubmenuFixture {
            id: SubmenuId::from("colors"),
            trigger: Rect::new(540.0, 250.0, 200.0, 32.0),
            size: Size::new(160.0, 220.0),
        }),
    }
}

/// A 140px submenu next to a parent that leaves 30px on the right and
/// 10px on the left of a 300px viewport.
#[must_use]
pub fn cramped_submenu() -> Scene {
    Scene {
        name: "cramped_submenu",
        viewport: Size::new(300.0, 400.0),
        anchor: Rect::new(10.0, 10.0, 260.0, 0.0),
        root_size: Size::new(260.0, 50.0),
        submenu: Some(SubmenuFixture {
            id: SubmenuId::from("remove-colors"),
            trigger: Rect::new(10.0, 10.0, 260.0, 20.0),
            size: Size::new(140.0, 200.0),
        }),
    }
}

/// A phone-sized viewport smaller than the menu.
#[must_use]
pub fn narrow_viewport() -> Scene {
    Scene {
        name: "narrow_viewport",
        viewport: Size::new(180.0, 320.0),
        anchor: Rect::new(40.0, 120.0, 60.0, 18.0),
        root_size: Size::new(200.0, 400.0),
        submenu: None,
    }
}

/// Every reference scene.
#[must_use]
pub fn all() -> Vec<Scene> {
    vec![
        bubble_near_bottom(),
        context_menu_at_pointer(),
        cramped_submenu(),
        narrow_viewport(),
    ]
}

/// `count` resize events interpolating from `from` to `to`, as a window
/// drag produces. The last event is exactly `to`.
#[must_use]
pub fn resize_storm(count: usize, from: Size, to: Size) -> Vec<Event> {
    let steps = count.max(1);
    (1..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let size = if i == steps {
                to
            } else {
                Size::new(
                    from.width + (to.width - from.width) * t,
                    from.height + (to.height - from.height) * t,
                )
            };
            Event::resize(size)
        })
        .collect()
}
