#![forbid(unsafe_code)]

//! Overlay state owned by the controller.
//!
//! ```text
//! Closed --open--> OpenRoot --open_submenu--> OpenRootWithSubmenu
//!    ^                 ^  <--close_submenu--         |
//!    |                 |                             |
//!    +----close--------+-------------close-----------+
//! ```
//!
//! At most one submenu is open at any time. Opening a second one replaces
//! the first, and the anchor map never tracks more than the active submenu.

use ahash::AHashMap;
use perch_core::geometry::{Rect, Size};
use perch_layout::PlacementResult;

use crate::host::{PanelId, SubmenuId};

/// Coarse lifecycle phase, derived from [`OverlayState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Closed,
    OpenRoot,
    OpenRootWithSubmenu,
}

impl Phase {
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::OpenRoot => "open_root",
            Self::OpenRootWithSubmenu => "open_root_with_submenu",
        }
    }
}

/// Where the host should render one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelPlacement {
    pub panel: PanelId,
    pub result: PlacementResult,
    /// The size the placement was computed for (measured or estimated).
    pub size: Size,
    pub z_index: u32,
}

impl PanelPlacement {
    /// `left` style value.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.result.x
    }

    /// `top` style value.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.result.y
    }

    /// Bounds of the placed panel.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.result.rect(self.size)
    }
}

/// Placements for every open panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub root: Option<PanelPlacement>,
    pub submenu: Option<PanelPlacement>,
}

impl Layout {
    /// Open panels, lowest z-index first.
    pub fn panels(&self) -> impl Iterator<Item = &PanelPlacement> {
        self.root.iter().chain(self.submenu.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.submenu.is_none()
    }

    /// Whether `(x, y)` falls inside any placed panel.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.panels().any(|p| p.rect().contains(x, y))
    }
}

/// Everything the controller remembers between passes.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    is_open: bool,
    anchor: Option<Rect>,
    active_submenu: Option<SubmenuId>,
    submenu_anchors: AHashMap<SubmenuId, Rect>,
    layout: Layout,
}

impl OverlayState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.is_open, &self.active_submenu) {
            (false, _) => Phase::Closed,
            (true, None) => Phase::OpenRoot,
            (true, Some(_)) => Phase::OpenRootWithSubmenu,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Anchor of the root panel.
    #[must_use]
    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    #[must_use]
    pub fn active_submenu(&self) -> Option<&SubmenuId> {
        self.active_submenu.as_ref()
    }

    #[must_use]
    pub fn submenu_anchor(&self, id: &SubmenuId) -> Option<Rect> {
        self.submenu_anchors.get(id).copied()
    }

    /// Number of submenu anchors being tracked (0 or 1).
    #[must_use]
    pub fn tracked_submenus(&self) -> usize {
        self.submenu_anchors.len()
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Check the structural invariants.
    ///
    /// - closed implies no anchor, no submenu, no layout
    /// - at most one submenu anchor, and only for the active submenu
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if !self.is_open {
            return self.anchor.is_none()
                && self.active_submenu.is_none()
                && self.submenu_anchors.is_empty()
                && self.layout.is_empty();
        }
        match &self.active_submenu {
            None => self.submenu_anchors.is_empty() && self.layout.submenu.is_none(),
            Some(id) => self.submenu_anchors.len() == 1 && self.submenu_anchors.contains_key(id),
        }
    }

    /// Open (or re-open) the root panel, dropping any submenu.
    pub(crate) fn open(&mut self, anchor: Rect) {
        self.is_open = true;
        self.anchor = Some(anchor);
        self.clear_submenu();
    }

    /// Reset to closed. Returns whether anything was open.
    pub(crate) fn close(&mut self) -> bool {
        let was_open = self.is_open;
        self.is_open = false;
        self.anchor = None;
        self.clear_submenu();
        self.layout.root = None;
        was_open
    }

    /// Make `id` the only open submenu. Returns the submenu it replaced.
    ///
    /// The caller has checked that the root is open.
    pub(crate) fn open_submenu(&mut self, id: SubmenuId, anchor: Rect) -> Option<SubmenuId> {
        let previous = self.active_submenu.take().filter(|prev| *prev != id);
        self.clear_submenu();
        self.submenu_anchors.insert(id.clone(), anchor);
        self.active_submenu = Some(id);
        previous
    }

    /// Close the active submenu, if any.
    pub(crate) fn close_submenu(&mut self) -> Option<SubmenuId> {
        let closed = self.active_submenu.take();
        self.submenu_anchors.clear();
        self.layout.submenu = None;
        closed
    }

    pub(crate) fn set_anchor(&mut self, anchor: Rect) {
        if self.is_open {
            self.anchor = Some(anchor);
        }
    }

    pub(crate) fn set_submenu_anchor(&mut self, anchor: Rect) {
        if let Some(id) = &self.active_submenu {
            self.submenu_anchors.insert(id.clone(), anchor);
        }
    }

    pub(crate) fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Record a single panel's placement.
    pub(crate) fn set_placement(&mut self, placement: PanelPlacement) {
        match placement.panel {
            PanelId::Root => self.layout.root = Some(placement),
            PanelId::Submenu(_) => self.layout.submenu = Some(placement),
        }
    }

    fn clear_submenu(&mut self) {
        self.active_submenu = None;
        self.submenu_anchors.clear();
        self.layout.submenu = None;
    }
}
