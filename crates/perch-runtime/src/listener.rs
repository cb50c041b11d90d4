#![forbid(unsafe_code)]

//! Document-level listeners owned by an overlay.
//!
//! An open overlay needs three listeners on the host: pointer-down (dismiss
//! on outside press), key-down (dismiss on Escape) and resize (reposition).
//! The controller declares which ones the current phase wants as a
//! [`ListenerSet`]; [`ListenerManager::reconcile`] diffs that against what
//! is attached, the same way a runtime diffs declared subscriptions.
//!
//! The manager is the only holder of host handles, so every attached
//! listener is either in its active list or has been released.

use bitflags::bitflags;

use crate::host::Host;
use crate::state::Phase;

bitflags! {
    /// A set of listener kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListenerSet: u8 {
        const POINTER_DOWN = 0b001;
        const KEY_DOWN     = 0b010;
        const RESIZE       = 0b100;
    }
}

impl ListenerSet {
    /// Listeners wanted while in `phase`.
    #[must_use]
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Closed => Self::empty(),
            Phase::OpenRoot | Phase::OpenRootWithSubmenu => Self::all(),
        }
    }

    /// Iterate the kinds in this set in a fixed order.
    pub fn kinds(self) -> impl Iterator<Item = ListenerKind> {
        ListenerKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

/// A single listener kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
    Resize,
}

impl ListenerKind {
    /// Every kind, in attach order.
    pub const ALL: [ListenerKind; 3] = [Self::PointerDown, Self::KeyDown, Self::Resize];

    #[must_use]
    pub const fn flag(self) -> ListenerSet {
        match self {
            Self::PointerDown => ListenerSet::POINTER_DOWN,
            Self::KeyDown => ListenerSet::KEY_DOWN,
            Self::Resize => ListenerSet::RESIZE,
        }
    }

    /// Host-facing event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::KeyDown => "keydown",
            Self::Resize => "resize",
        }
    }
}

/// Opaque token a host returns for an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Tracks the listeners an overlay has attached to its host.
#[derive(Debug, Default)]
pub(crate) struct ListenerManager {
    active: Vec<(ListenerKind, ListenerHandle)>,
}

impl ListenerManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Kinds currently attached.
    pub(crate) fn active(&self) -> ListenerSet {
        self.active
            .iter()
            .fold(ListenerSet::empty(), |set, (kind, _)| set | kind.flag())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Bring the attached listeners in line with `wanted`.
    ///
    /// Detaches kinds no longer wanted, attaches missing ones, and leaves
    /// the rest untouched so a steady phase never churns the host.
    pub(crate) fn reconcile<H: Host + ?Sized>(&mut self, host: &mut H, wanted: ListenerSet) {
        let mut remaining = Vec::with_capacity(self.active.len());
        for (kind, handle) in self.active.drain(..) {
            if wanted.contains(kind.flag()) {
                remaining.push((kind, handle));
            } else {
                tracing::debug!(listener = kind.as_str(), handle = handle.raw(), "Detaching listener");
                host.unsubscribe(handle);
            }
        }
        self.active = remaining;

        let attached = self.active();
        for kind in wanted.difference(attached).kinds() {
            let handle = host.subscribe(kind);
            tracing::debug!(listener = kind.as_str(), handle = handle.raw(), "Attaching listener");
            self.active.push((kind, handle));
        }
    }

    /// Detach every listener.
    pub(crate) fn release_all<H: Host + ?Sized>(&mut self, host: &mut H) {
        for (kind, handle) in self.active.drain(..) {
            tracing::debug!(listener = kind.as_str(), handle = handle.raw(), "Detaching listener");
            host.unsubscribe(handle);
        }
    }
}

impl Drop for ListenerManager {
    fn drop(&mut self) {
        if !self.active.is_empty() {
            tracing::warn!(
                count = self.active.len(),
                "overlay dropped while open; host listeners were not released"
            );
        }
    }
}
