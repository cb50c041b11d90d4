#![forbid(unsafe_code)]

//! The boundary between the controller and whatever renders the panels.
//!
//! A host is the DOM, a native widget tree, or a test fake. The controller
//! never caches what the host reports: the viewport, panel sizes and anchor
//! rectangles are read again on every pass.

use std::fmt;

use perch_core::geometry::{Rect, Size};

use crate::listener::{ListenerHandle, ListenerKind};

/// Identifier of a submenu within one overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmenuId(String);

impl SubmenuId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubmenuId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SubmenuId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SubmenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the panels an overlay can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// The top-level panel (bubble toolbar, context menu).
    Root,
    /// A nested panel opened from an item of the root panel.
    Submenu(SubmenuId),
}

impl PanelId {
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Submenu(id) => write!(f, "submenu:{id}"),
        }
    }
}

/// Services the controller needs from the rendering environment.
pub trait Host {
    /// Current viewport size. Called on every placement computation.
    fn viewport(&self) -> Size;

    /// Rendered size of a panel, or `None` if it has not been laid out yet.
    fn measure(&self, panel: &PanelId) -> Option<Size>;

    /// Fresh anchor rectangle for a panel.
    ///
    /// Hosts that can re-read the anchor element (a selection's client
    /// rects, a trigger's bounding box) return it here so the panel follows
    /// scrolling and reflow. The default keeps the anchor given at open.
    fn anchor(&self, panel: &PanelId) -> Option<Rect> {
        let _ = panel;
        None
    }

    /// Attach a document-level listener; events arrive through
    /// [`OverlayController::handle_event`](crate::OverlayController::handle_event).
    fn subscribe(&mut self, kind: ListenerKind) -> ListenerHandle;

    /// Detach a listener previously returned by [`subscribe`](Host::subscribe).
    fn unsubscribe(&mut self, handle: ListenerHandle);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn viewport(&self) -> Size {
        (**self).viewport()
    }

    fn measure(&self, panel: &PanelId) -> Option<Size> {
        (**self).measure(panel)
    }

    fn anchor(&self, panel: &PanelId) -> Option<Rect> {
        (**self).anchor(panel)
    }

    fn subscribe(&mut self, kind: ListenerKind) -> ListenerHandle {
        (**self).subscribe(kind)
    }

    fn unsubscribe(&mut self, handle: ListenerHandle) {
        (**self).unsubscribe(handle)
    }
}
