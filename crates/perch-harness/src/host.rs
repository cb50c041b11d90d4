#![forbid(unsafe_code)]

//! In-memory [`Host`] for driving an overlay controller in tests.
//!
//! [`SceneHost`] plays the role of the page: it owns a viewport, reports
//! whatever panel sizes and anchors a test configures, and keeps a registry
//! of attached listeners so tests can prove nothing leaks.

use std::collections::{BTreeMap, HashMap};

use perch_core::geometry::{Rect, Size};
use perch_runtime::{Host, ListenerHandle, ListenerKind, PanelId, SubmenuId};

/// A subscribe or unsubscribe call, in the order the host saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOp {
    Subscribe(ListenerKind, ListenerHandle),
    Unsubscribe(ListenerHandle),
}

/// Scriptable host with a listener registry.
#[derive(Debug, Clone)]
pub struct SceneHost {
    viewport: Size,
    sizes: HashMap<PanelId, Size>,
    anchors: HashMap<PanelId, Rect>,
    next_handle: u64,
    live: BTreeMap<u64, ListenerKind>,
    ops: Vec<ListenerOp>,
    /// Unsubscribe calls for handles that were not live.
    stale_unsubscribes: usize,
}

impl SceneHost {
    /// A host with the given viewport and no rendered panels.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            sizes: HashMap::new(),
            anchors: HashMap::new(),
            next_handle: 0,
            live: BTreeMap::new(),
            ops: Vec::new(),
            stale_unsubscribes: 0,
        }
    }

    /// Report `size` when the root panel is measured.
    #[must_use]
    pub fn with_root_size(mut self, size: Size) -> Self {
        self.set_panel_size(PanelId::Root, size);
        self
    }

    /// Report `size` when submenu `id` is measured.
    #[must_use]
    pub fn with_submenu_size(mut self, id: impl Into<SubmenuId>, size: Size) -> Self {
        self.set_panel_size(PanelId::Submenu(id.into()), size);
        self
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_panel_size(&mut self, panel: PanelId, size: Size) {
        self.sizes.insert(panel, size);
    }

    /// Make `panel` unmeasurable, as if it had not been laid out yet.
    pub fn clear_panel_size(&mut self, panel: &PanelId) {
        self.sizes.remove(panel);
    }

    /// Report `anchor` as the live anchor of `panel`.
    pub fn set_anchor(&mut self, panel: PanelId, anchor: Rect) {
        self.anchors.insert(panel, anchor);
    }

    pub fn clear_anchor(&mut self, panel: &PanelId) {
        self.anchors.remove(panel);
    }

    /// Kinds of the listeners currently attached, in attach order.
    #[must_use]
    pub fn live_listeners(&self) -> Vec<ListenerKind> {
        self.live.values().copied().collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.live.values().any(|k| *k == kind)
    }

    /// Every subscribe/unsubscribe call so far.
    #[must_use]
    pub fn ops(&self) -> &[ListenerOp] {
        &self.ops
    }

    /// Total subscribe calls so far.
    #[must_use]
    pub fn subscribe_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, ListenerOp::Subscribe(..)))
            .count()
    }

    #[must_use]
    pub fn stale_unsubscribes(&self) -> usize {
        self.stale_unsubscribes
    }

    /// Panic if any listener is still attached or was released twice.
    #[track_caller]
    pub fn assert_no_leaks(&self) {
        assert!(
            self.live.is_empty(),
            "leaked listeners: {:?}",
            self.live_listeners()
        );
        assert_eq!(
            self.stale_unsubscribes, 0,
            "unsubscribe called with handles that were not live"
        );
    }
}

impl Host for SceneHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn measure(&self, panel: &PanelId) -> Option<Size> {
        self.sizes.get(panel).copied()
    }

    fn anchor(&self, panel: &PanelId) -> Option<Rect> {
        self.anchors.get(panel).copied()
    }

    fn subscribe(&mut self, kind: ListenerKind) -> ListenerHandle {
        self.next_handle += 1;
        let handle = ListenerHandle::new(self.next_handle);
        self.live.insert(handle.raw(), kind);
        self.ops.push(ListenerOp::Subscribe(kind, handle));
        tracing::trace!(listener = kind.as_str(), handle = handle.raw(), "scene host subscribe");
        handle
    }

    fn unsubscribe(&mut self, handle: ListenerHandle) {
        if self.live.remove(&handle.raw()).is_none() {
            self.stale_unsubscribes += 1;
        }
        self.ops.push(ListenerOp::Unsubscribe(handle));
        tracing::trace!(handle = handle.raw(), "scene host unsubscribe");
    }
}
