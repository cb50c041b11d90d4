#![forbid(unsafe_code)]

//! Live tracking controller.
//!
//! [`OverlayController`] keeps a floating panel (and at most one submenu)
//! glued to its anchor while the overlay is open. It is driven entirely by
//! the host:
//!
//! 1. A user action calls [`open`](OverlayController::open) with an anchor.
//!    The controller returns a best-guess placement computed from the
//!    configured size estimate so the first frame lands close to final.
//! 2. After the host has rendered the panel it calls
//!    [`reposition`](OverlayController::reposition) (or
//!    [`frame`](OverlayController::frame)), which re-measures, re-resolves
//!    and attaches the dismissal listeners.
//! 3. Host events go through [`handle_event`](OverlayController::handle_event).
//!    Escape and outside presses close the overlay; geometry events are
//!    coalesced until the next frame.
//!
//! Listeners attach only in step 2, so the pointer press that opened the
//! overlay cannot also dismiss it.
//!
//! # Example
//!
//! ```
//! use perch_core::geometry::{Rect, Size};
//! use perch_runtime::{Host, ListenerHandle, ListenerKind, OverlayController, PanelId};
//!
//! struct Page;
//!
//! impl Host for Page {
//!     fn viewport(&self) -> Size { Size::new(1024.0, 600.0) }
//!     fn measure(&self, _panel: &PanelId) -> Option<Size> { Some(Size::new(200.0, 300.0)) }
//!     fn subscribe(&mut self, _kind: ListenerKind) -> ListenerHandle { ListenerHandle::new(1) }
//!     fn unsubscribe(&mut self, _handle: ListenerHandle) {}
//! }
//!
//! let mut page = Page;
//! let mut overlay = OverlayController::default();
//! overlay.open(&page, Rect::new(500.0, 580.0, 100.0, 20.0));
//!
//! let pass = overlay.reposition(&mut page);
//! let root = pass.layout.root.unwrap();
//! assert_eq!((root.left(), root.top()), (450.0, 270.0));
//!
//! overlay.close(&mut page);
//! assert!(!overlay.is_open());
//! ```

use perch_core::event::{Event, HitTarget, PointerEvent};
use perch_core::event_coalescer::EventCoalescer;
use perch_core::geometry::{Rect, Size};
use perch_layout::{PlacementRequest, resolve, resolve_submenu};

use crate::config::{ConfigError, OverlayConfig};
use crate::error::TrackingError;
use crate::host::{Host, PanelId, SubmenuId};
use crate::listener::{ListenerManager, ListenerSet};
use crate::state::{Layout, OverlayState, PanelPlacement, Phase};

/// Outcome of one reposition pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reposition {
    /// Placements after the pass.
    pub layout: Layout,
    /// Whether any placement differs from before the pass.
    pub changed: bool,
    /// Panels left at their previous placement because the host could not
    /// measure them.
    pub skipped: Vec<TrackingError>,
    /// The settle guard tripped and the previous layout was kept.
    pub frozen: bool,
}

/// What [`OverlayController::handle_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not relevant to the overlay in its current phase.
    Ignored,
    /// A geometry event held for the next [`frame`](OverlayController::frame).
    Queued,
    /// The overlay was dismissed.
    Closed,
}

/// Geometry a reposition pass was computed from.
///
/// Any difference from the previous pass is new input, not oscillation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PassInputs {
    viewport: Size,
    root_anchor: Option<Rect>,
    submenu_anchor: Option<Rect>,
}

/// Drives one overlay's lifecycle against a [`Host`].
#[derive(Debug, Default)]
pub struct OverlayController {
    config: OverlayConfig,
    state: OverlayState,
    listeners: ListenerManager,
    coalescer: EventCoalescer,
    /// Layout-changing passes since the inputs last changed.
    settle_passes: u32,
    /// Inputs of the previous pass while open.
    last_inputs: Option<PassInputs>,
    /// A transition or event is waiting for a reposition pass.
    dirty: bool,
}

impl OverlayController {
    /// Create a closed controller.
    ///
    /// Fails with [`ConfigError::Validation`] if `config` does not validate.
    pub fn new(config: OverlayConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validated()?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Current placements, root first.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        self.state.layout()
    }

    /// Listener kinds currently attached to the host.
    #[must_use]
    pub fn listeners(&self) -> ListenerSet {
        self.listeners.active()
    }

    /// Whether a reposition pass is due.
    #[must_use]
    pub fn needs_reposition(&self) -> bool {
        self.state.is_open() && (self.dirty || self.coalescer.has_pending())
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Open the root panel at `anchor`, replacing any previous anchor and
    /// dropping an open submenu.
    ///
    /// Returns a best-guess placement from the configured size estimate.
    pub fn open<H: Host + ?Sized>(&mut self, host: &H, anchor: Rect) -> PanelPlacement {
        let from = self.state.phase();
        self.state.open(anchor);
        let placement = self.place_root(host.viewport(), anchor, self.config.estimated_root_size);
        self.state.set_layout(Layout {
            root: Some(placement.clone()),
            submenu: None,
        });
        self.coalescer.clear();
        self.mark_dirty();
        tracing::debug!(
            from = from.as_str(),
            x = placement.left(),
            y = placement.top(),
            side = %placement.result.side,
            "Overlay opened"
        );
        placement
    }

    /// Close the overlay and release every host listener.
    ///
    /// Safe to call in any phase. Returns whether anything was torn down.
    pub fn close<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        let was_open = self.state.close();
        let had_listeners = !self.listeners.is_empty();
        self.listeners.release_all(host);
        self.coalescer.clear();
        self.settle_passes = 0;
        self.last_inputs = None;
        self.dirty = false;
        if was_open {
            tracing::debug!("Overlay closed");
        }
        was_open || had_listeners
    }

    /// Open submenu `id` next to the root panel, closing any other submenu.
    ///
    /// `anchor` is the trigger item's rectangle; the submenu top-aligns
    /// with it.
    pub fn open_submenu<H: Host + ?Sized>(
        &mut self,
        host: &H,
        id: impl Into<SubmenuId>,
        anchor: Rect,
    ) -> Result<PanelPlacement, TrackingError> {
        let id = id.into();
        if !self.state.is_open() {
            tracing::debug!(submenu = %id, "Submenu requested while closed");
            return Err(TrackingError::RootClosed { submenu: id });
        }

        if let Some(replaced) = self.state.open_submenu(id.clone(), anchor) {
            tracing::debug!(closed = %replaced, opened = %id, "Submenu replaced");
        }
        let parent = self.root_bounds().unwrap_or(anchor);
        let placement = self.place_submenu(
            host.viewport(),
            id,
            anchor,
            self.config.estimated_submenu_size,
            parent,
        );
        self.state.set_placement(placement.clone());
        self.mark_dirty();
        tracing::debug!(
            panel = %placement.panel,
            x = placement.left(),
            y = placement.top(),
            side = %placement.result.side,
            "Submenu opened"
        );
        Ok(placement)
    }

    /// Close the active submenu. Returns it, or `None` if none was open.
    pub fn close_submenu(&mut self) -> Option<SubmenuId> {
        let closed = self.state.close_submenu();
        if let Some(id) = &closed {
            self.mark_dirty();
            tracing::debug!(submenu = %id, "Submenu closed");
        }
        closed
    }

    // ---------------------------------------------------------------------
    // Tracking
    // ---------------------------------------------------------------------

    /// Refine placements against the host's current geometry.
    ///
    /// Call after the host has rendered the panels. Each open panel is
    /// measured and re-resolved against a freshly read viewport; a panel
    /// the host cannot measure keeps its previous placement and is listed
    /// in [`Reposition::skipped`]. Listeners are reconciled at the end.
    ///
    /// A changed viewport or anchor always gets a fresh pass. Only
    /// layout changes against unchanged inputs count toward
    /// `max_settle_passes`.
    pub fn reposition<H: Host + ?Sized>(&mut self, host: &mut H) -> Reposition {
        let _span =
            tracing::debug_span!("perch.reposition", phase = self.state.phase().as_str()).entered();

        if !self.state.is_open() {
            self.listeners.reconcile(host, ListenerSet::empty());
            self.dirty = false;
            return Reposition::default();
        }

        let viewport = host.viewport();
        if let Some(anchor) = host.anchor(&PanelId::Root) {
            self.state.set_anchor(anchor);
        }
        let active = self.state.active_submenu().cloned();
        if let Some(id) = &active
            && let Some(anchor) = host.anchor(&PanelId::Submenu(id.clone()))
        {
            self.state.set_submenu_anchor(anchor);
        }
        let inputs = PassInputs {
            viewport,
            root_anchor: self.state.anchor(),
            submenu_anchor: active.as_ref().and_then(|id| self.state.submenu_anchor(id)),
        };
        let moved = self.last_inputs.replace(inputs) != Some(inputs);

        if std::mem::take(&mut self.dirty) || moved {
            self.settle_passes = 0;
        }
        if self.settle_passes >= self.config.max_settle_passes {
            tracing::warn!(
                passes = self.settle_passes,
                "Layout did not settle; keeping last placement"
            );
            self.reconcile_listeners(host);
            return Reposition {
                layout: self.state.layout().clone(),
                changed: false,
                skipped: Vec::new(),
                frozen: true,
            };
        }

        let previous = self.state.layout().clone();
        let mut next = previous.clone();
        let mut skipped = Vec::new();

        if let Some(anchor) = inputs.root_anchor {
            match host.measure(&PanelId::Root) {
                Some(size) => next.root = Some(self.place_root(viewport, anchor, size)),
                None => {
                    tracing::debug!(panel = "root", "No measurement; keeping previous placement");
                    skipped.push(TrackingError::MeasurementUnavailable(PanelId::Root));
                }
            }
        }

        if let Some(id) = active {
            let panel = PanelId::Submenu(id.clone());
            match (inputs.submenu_anchor, host.measure(&panel)) {
                (Some(anchor), Some(size)) => {
                    let parent = next.root.as_ref().map_or(anchor, PanelPlacement::rect);
                    next.submenu = Some(self.place_submenu(viewport, id, anchor, size, parent));
                }
                _ => {
                    tracing::debug!(%panel, "No measurement; keeping previous placement");
                    skipped.push(TrackingError::MeasurementUnavailable(panel));
                }
            }
        }

        let changed = next != previous;
        if changed {
            self.settle_passes = self.settle_passes.saturating_add(1);
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                passes = self.settle_passes,
                "Layout changed"
            );
        } else {
            self.settle_passes = 0;
        }
        self.state.set_layout(next);
        debug_assert!(self.state.is_consistent());

        self.reconcile_listeners(host);
        Reposition {
            layout: self.state.layout().clone(),
            changed,
            skipped,
            frozen: false,
        }
    }

    /// Route a host event.
    ///
    /// Key and pointer presses are acted on only once the matching listener
    /// is attached. Geometry events are held until the next
    /// [`frame`](Self::frame).
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: Event) -> EventOutcome {
        if !self.state.is_open() {
            return EventOutcome::Ignored;
        }
        let active = self.listeners.active();

        match event {
            Event::Key(key) => {
                if key.is_escape() && active.contains(ListenerSet::KEY_DOWN) {
                    tracing::debug!("Escape pressed; dismissing overlay");
                    self.close(host);
                    EventOutcome::Closed
                } else {
                    EventOutcome::Ignored
                }
            }
            Event::Pointer(pointer) => {
                if pointer.is_down()
                    && active.contains(ListenerSet::POINTER_DOWN)
                    && self.is_outside(&pointer)
                {
                    tracing::debug!(
                        x = pointer.x,
                        y = pointer.y,
                        "Pointer down outside; dismissing overlay"
                    );
                    self.close(host);
                    EventOutcome::Closed
                } else {
                    EventOutcome::Ignored
                }
            }
            Event::Resize { .. } if !active.contains(ListenerSet::RESIZE) => EventOutcome::Ignored,
            geometry => match self.coalescer.push(geometry) {
                None => {
                    self.dirty = true;
                    EventOutcome::Queued
                }
                Some(_) => EventOutcome::Ignored,
            },
        }
    }

    /// Flush coalesced events and run at most one reposition pass.
    ///
    /// Call once per animation frame. A selection that collapsed to nothing
    /// closes the overlay; a new selection rectangle becomes the root
    /// anchor. Returns `None` when there was nothing to do.
    pub fn frame<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Reposition> {
        let mut collapsed = false;
        for event in self.coalescer.flush() {
            match event {
                Event::SelectionChange(None) => collapsed = true,
                Event::SelectionChange(Some(rect)) => {
                    self.state.set_anchor(rect);
                    self.dirty = true;
                }
                Event::Resize { .. } | Event::Reflow => self.dirty = true,
                _ => {}
            }
        }

        if collapsed && self.state.is_open() {
            tracing::debug!("Selection collapsed; dismissing overlay");
            self.close(host);
            return Some(Reposition {
                changed: true,
                ..Reposition::default()
            });
        }
        if !self.dirty || !self.state.is_open() {
            return None;
        }
        Some(self.reposition(host))
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.settle_passes = 0;
    }

    fn reconcile_listeners<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.listeners
            .reconcile(host, ListenerSet::for_phase(self.state.phase()));
    }

    fn root_bounds(&self) -> Option<Rect> {
        self.state.layout().root.as_ref().map(PanelPlacement::rect)
    }

    fn is_outside(&self, pointer: &PointerEvent) -> bool {
        match pointer.target {
            HitTarget::Overlay => false,
            HitTarget::Outside => true,
            HitTarget::Unknown => !self.state.layout().contains(pointer.x, pointer.y),
        }
    }

    fn place_root(&self, viewport: Size, anchor: Rect, size: Size) -> PanelPlacement {
        let request = PlacementRequest::new(anchor, size)
            .margin(self.config.margin)
            .preferred_side(self.config.preferred_side);
        PanelPlacement {
            panel: PanelId::Root,
            result: resolve(&request, viewport),
            size,
            z_index: self.config.base_z,
        }
    }

    fn place_submenu(
        &self,
        viewport: Size,
        id: SubmenuId,
        anchor: Rect,
        size: Size,
        parent: Rect,
    ) -> PanelPlacement {
        let request = PlacementRequest::new(anchor, size)
            .margin(self.config.margin)
            .preferred_side(self.config.submenu_side)
            .parent_bounds(parent);
        PanelPlacement {
            panel: PanelId::Submenu(id),
            result: resolve_submenu(&request, viewport),
            size,
            z_index: self.config.submenu_z(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{ListenerHandle, ListenerKind};
    use perch_core::event::{KeyCode, KeyEvent};
    use perch_layout::Side;
    use std::cell::Cell;

    struct TestHost {
        viewport: Size,
        root: Option<Size>,
        submenu: Option<Size>,
        /// Alternate the root height on every measurement.
        oscillate: bool,
        measurements: Cell<u32>,
        next: u64,
        live: Vec<(ListenerKind, ListenerHandle)>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                viewport: Size::new(1024.0, 600.0),
                root: Some(Size::new(200.0, 300.0)),
                submenu: Some(Size::new(140.0, 120.0)),
                oscillate: false,
                measurements: Cell::new(0),
                next: 0,
                live: Vec::new(),
            }
        }
    }

    impl Host for TestHost {
        fn viewport(&self) -> Size {
            self.viewport
        }

        fn measure(&self, panel: &PanelId) -> Option<Size> {
            let n = self.measurements.get();
            self.measurements.set(n + 1);
            match panel {
                PanelId::Root if self.oscillate => {
                    let h = if n % 2 == 0 { 300.0 } else { 320.0 };
                    self.root.map(|s| Size::new(s.width, h))
                }
                PanelId::Root => self.root,
                PanelId::Submenu(_) => self.submenu,
            }
        }

        fn subscribe(&mut self, kind: ListenerKind) -> ListenerHandle {
            self.next += 1;
            let handle = ListenerHandle::new(self.next);
            self.live.push((kind, handle));
            handle
        }

        fn unsubscribe(&mut self, handle: ListenerHandle) {
            self.live.retain(|(_, h)| *h != handle);
        }
    }

    fn anchor() -> Rect {
        Rect::new(500.0, 580.0, 100.0, 20.0)
    }

    fn escape() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Escape))
    }

    #[test]
    fn open_uses_size_estimate() {
        let host = TestHost::new();
        let mut overlay = OverlayController::default();
        let guess = overlay.open(&host, anchor());
        // 200x400 estimate above a 580px-high anchor.
        assert_eq!(guess.result.side, Side::Above);
        assert_eq!(guess.top(), 170.0);
        assert_eq!(guess.size, Size::new(200.0, 400.0));
        assert_eq!(guess.z_index, 50);
        assert_eq!(overlay.phase(), Phase::OpenRoot);
    }

    #[test]
    fn reposition_refines_with_measurement() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        let pass = overlay.reposition(&mut host);
        assert!(pass.changed);
        let root = pass.layout.root.unwrap();
        assert_eq!((root.left(), root.top()), (450.0, 270.0));
        assert!(pass.skipped.is_empty());
    }

    #[test]
    fn listeners_attach_after_first_pass() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        assert!(host.live.is_empty());
        assert!(overlay.listeners().is_empty());
        overlay.reposition(&mut host);
        assert_eq!(host.live.len(), 3);
        assert_eq!(overlay.listeners(), ListenerSet::all());
    }

    #[test]
    fn opening_press_cannot_dismiss() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        let press = Event::Pointer(PointerEvent::down(5.0, 5.0));
        assert_eq!(overlay.handle_event(&mut host, press.clone()), EventOutcome::Ignored);
        assert!(overlay.is_open());

        overlay.reposition(&mut host);
        assert_eq!(overlay.handle_event(&mut host, press), EventOutcome::Closed);
        assert!(!overlay.is_open());
        assert!(host.live.is_empty());
    }

    #[test]
    fn press_inside_panel_keeps_overlay_open() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);
        let press = Event::Pointer(PointerEvent::down(460.0, 300.0));
        assert_eq!(overlay.handle_event(&mut host, press), EventOutcome::Ignored);
        assert!(overlay.is_open());
    }

    #[test]
    fn host_hit_target_overrides_geometry() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);

        let portal_press = PointerEvent::down(5.0, 5.0).with_target(HitTarget::Overlay);
        assert_eq!(
            overlay.handle_event(&mut host, Event::Pointer(portal_press)),
            EventOutcome::Ignored
        );
        let outside = PointerEvent::down(460.0, 300.0).with_target(HitTarget::Outside);
        assert_eq!(
            overlay.handle_event(&mut host, Event::Pointer(outside)),
            EventOutcome::Closed
        );
    }

    #[test]
    fn escape_dismisses_and_releases_listeners() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);
        assert_eq!(overlay.handle_event(&mut host, escape()), EventOutcome::Closed);
        assert_eq!(overlay.phase(), Phase::Closed);
        assert!(host.live.is_empty());
        assert!(overlay.layout().is_empty());
    }

    #[test]
    fn other_keys_ignored() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);
        let key = Event::Key(KeyEvent::new(KeyCode::Char('b')));
        assert_eq!(overlay.handle_event(&mut host, key), EventOutcome::Ignored);
        assert!(overlay.is_open());
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        assert!(!overlay.close(&mut host));
        overlay.open(&host, anchor());
        assert!(overlay.close(&mut host));
        assert!(!overlay.close(&mut host));
        assert_eq!(overlay.phase(), Phase::Closed);
    }

    #[test]
    fn submenu_requires_open_root() {
        let host = TestHost::new();
        let mut overlay = OverlayController::default();
        let err = overlay
            .open_submenu(&host, "colors", Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap_err();
        assert_eq!(
            err,
            TrackingError::RootClosed {
                submenu: SubmenuId::from("colors")
            }
        );
        assert_eq!(overlay.phase(), Phase::Closed);
    }

    #[test]
    fn submenu_stacks_above_root() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, Rect::new(100.0, 100.0, 80.0, 20.0));
        overlay.reposition(&mut host);
        let trigger = Rect::new(100.0, 150.0, 200.0, 30.0);
        let placement = overlay.open_submenu(&host, "colors", trigger).unwrap();
        assert_eq!(placement.z_index, 60);
        assert_eq!(placement.result.side, Side::Right);
        assert_eq!(placement.top(), 150.0);
        assert_eq!(overlay.phase(), Phase::OpenRootWithSubmenu);

        let pass = overlay.reposition(&mut host);
        let root = pass.layout.root.unwrap();
        let sub = pass.layout.submenu.unwrap();
        assert_eq!(sub.left(), root.rect().right() + 10.0);
        assert!(!sub.rect().intersects(&root.rect()));
    }

    #[test]
    fn second_submenu_replaces_first() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, Rect::new(100.0, 100.0, 80.0, 20.0));
        overlay.reposition(&mut host);
        overlay
            .open_submenu(&host, "colors", Rect::new(100.0, 150.0, 200.0, 30.0))
            .unwrap();
        overlay
            .open_submenu(&host, "remove", Rect::new(100.0, 180.0, 200.0, 30.0))
            .unwrap();
        assert_eq!(overlay.state().tracked_submenus(), 1);
        assert_eq!(
            overlay.state().active_submenu(),
            Some(&SubmenuId::from("remove"))
        );
        assert!(overlay.state().is_consistent());
    }

    #[test]
    fn close_submenu_keeps_root() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        assert_eq!(overlay.close_submenu(), None);
        overlay
            .open_submenu(&host, "colors", Rect::new(500.0, 300.0, 200.0, 30.0))
            .unwrap();
        assert_eq!(overlay.close_submenu(), Some(SubmenuId::from("colors")));
        assert_eq!(overlay.phase(), Phase::OpenRoot);
        assert!(overlay.layout().submenu.is_none());
        overlay.close(&mut host);
    }

    #[test]
    fn unmeasured_panel_keeps_guess() {
        let mut host = TestHost::new();
        host.root = None;
        let mut overlay = OverlayController::default();
        let guess = overlay.open(&host, anchor());
        let pass = overlay.reposition(&mut host);
        assert!(!pass.changed);
        assert_eq!(pass.layout.root, Some(guess));
        assert_eq!(
            pass.skipped,
            vec![TrackingError::MeasurementUnavailable(PanelId::Root)]
        );
    }

    #[test]
    fn settle_guard_freezes_oscillating_layout() {
        let mut host = TestHost::new();
        host.oscillate = true;
        let config = OverlayConfig::default().max_settle_passes(3);
        let mut overlay = OverlayController::new(config).unwrap();
        overlay.open(&host, anchor());
        for _ in 0..3 {
            let pass = overlay.reposition(&mut host);
            assert!(pass.changed);
            assert!(!pass.frozen);
        }
        let before = overlay.layout().clone();
        let pass = overlay.reposition(&mut host);
        assert!(pass.frozen);
        assert!(!pass.changed);
        assert_eq!(overlay.layout(), &before);
    }

    #[test]
    fn event_resets_settle_guard() {
        let mut host = TestHost::new();
        host.oscillate = true;
        let mut overlay =
            OverlayController::new(OverlayConfig::default().max_settle_passes(1)).unwrap();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);
        assert!(overlay.reposition(&mut host).frozen);

        overlay.handle_event(&mut host, Event::Reflow);
        let pass = overlay.frame(&mut host).unwrap();
        assert!(!pass.frozen);
        assert!(pass.changed);
    }

    #[test]
    fn changed_viewport_lifts_frozen_guard() {
        let mut host = TestHost::new();
        host.oscillate = true;
        let mut overlay =
            OverlayController::new(OverlayConfig::default().max_settle_passes(1)).unwrap();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);
        assert!(overlay.reposition(&mut host).frozen);

        host.viewport = Size::new(700.0, 600.0);
        let pass = overlay.reposition(&mut host);
        assert!(!pass.frozen);
        assert!(pass.layout.root.unwrap().rect().right() <= 690.0);
    }

    #[test]
    fn new_validates_config() {
        assert!(OverlayController::new(OverlayConfig::default()).is_ok());
        assert!(matches!(
            OverlayController::new(OverlayConfig::default().max_settle_passes(0)),
            Err(ConfigError::Validation(_))
        ));
        assert!(OverlayController::new(OverlayConfig::default().submenu_side(Side::Above)).is_err());
    }

    #[test]
    fn frame_coalesces_resizes() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.frame(&mut host).unwrap();
        assert!(overlay.frame(&mut host).is_none());

        for width in [900.0, 800.0, 700.0] {
            let outcome = overlay.handle_event(&mut host, Event::resize(Size::new(width, 600.0)));
            assert_eq!(outcome, EventOutcome::Queued);
        }
        host.viewport = Size::new(700.0, 600.0);
        assert!(overlay.needs_reposition());
        let pass = overlay.frame(&mut host).unwrap();
        let root = pass.layout.root.unwrap();
        assert!(root.rect().right() <= 690.0);
        assert!(overlay.frame(&mut host).is_none());
    }

    #[test]
    fn selection_change_moves_anchor() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.frame(&mut host);
        let moved = Rect::new(100.0, 100.0, 100.0, 20.0);
        overlay.handle_event(&mut host, Event::SelectionChange(Some(moved)));
        let pass = overlay.frame(&mut host).unwrap();
        let root = pass.layout.root.unwrap();
        assert_eq!(root.result.side, Side::Below);
        assert_eq!(root.top(), 130.0);
        assert_eq!(overlay.state().anchor(), Some(moved));
    }

    #[test]
    fn collapsed_selection_dismisses() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.frame(&mut host);
        overlay.handle_event(&mut host, Event::SelectionChange(None));
        let pass = overlay.frame(&mut host).unwrap();
        assert!(pass.changed);
        assert!(pass.layout.is_empty());
        assert!(!overlay.is_open());
        assert!(host.live.is_empty());
    }

    #[test]
    fn events_ignored_while_closed() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        assert_eq!(overlay.handle_event(&mut host, escape()), EventOutcome::Ignored);
        assert_eq!(overlay.handle_event(&mut host, Event::Reflow), EventOutcome::Ignored);
        assert!(overlay.frame(&mut host).is_none());
    }

    #[test]
    fn reopen_drops_submenu_and_keeps_listeners() {
        let mut host = TestHost::new();
        let mut overlay = OverlayController::default();
        overlay.open(&host, anchor());
        overlay.reposition(&mut host);
        overlay
            .open_submenu(&host, "colors", Rect::new(500.0, 300.0, 200.0, 30.0))
            .unwrap();
        overlay.open(&host, Rect::new(10.0, 10.0, 0.0, 0.0));
        assert_eq!(overlay.phase(), Phase::OpenRoot);
        assert_eq!(host.live.len(), 3);
        overlay.reposition(&mut host);
        assert_eq!(host.live.len(), 3);
        overlay.close(&mut host);
    }
}
