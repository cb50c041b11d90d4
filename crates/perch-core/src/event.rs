#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host translates its native events (DOM, winit, terminal) into these
//! before handing them to an overlay controller. Only the events that drive
//! overlay placement and dismissal are modelled.
//!
//! # Design Notes
//!
//! - Pointer coordinates share the viewport coordinate space of
//!   [`Rect`](crate::geometry::Rect).
//! - `KeyEventKind` defaults to `Press`.
//! - A pointer event may carry the host's own hit-test verdict in
//!   [`HitTarget`]; `Unknown` asks the consumer to hit-test geometrically.

use crate::geometry::{Rect, Size};

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse, pen, touch) event.
    Pointer(PointerEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width.
        width: f32,
        /// New viewport height.
        height: f32,
    },

    /// The text selection changed.
    ///
    /// Carries the new selection's bounding rectangle, or `None` when the
    /// selection collapsed.
    SelectionChange(Option<Rect>),

    /// Content around the anchor reflowed (scroll, image load, edit).
    Reflow,
}

impl Event {
    /// Shorthand for a resize event.
    #[must_use]
    pub fn resize(size: Size) -> Self {
        Self::Resize {
            width: size.width,
            height: size.height,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// A key-down of Escape (press or auto-repeat).
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.code == KeyCode::Escape && self.kind != KeyEventKind::Release
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate in viewport space.
    pub x: f32,

    /// Y coordinate in viewport space.
    pub y: f32,

    /// Where the host says the event landed, if it knows.
    pub target: HitTarget,
}

impl PointerEvent {
    /// Create a new pointer event with an unknown target.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            target: HitTarget::Unknown,
        }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Attach the host's hit-test verdict.
    #[must_use]
    pub const fn with_target(mut self, target: HitTarget) -> Self {
        self.target = target;
        self
    }

    /// Whether this is a button press of any kind.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(_))
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved.
    Moved,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen tip, or touch contact.
    Primary,

    /// Right mouse button.
    Secondary,

    /// Middle mouse button.
    Auxiliary,
}

/// The host's verdict on whether a pointer event hit an overlay panel.
///
/// Hosts with a real element tree (a DOM, a widget tree) know whether the
/// event target sits inside a panel's subtree even when portals or
/// transforms make geometry misleading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitTarget {
    /// The host did not classify the target.
    #[default]
    Unknown,

    /// The target is inside an overlay panel's subtree.
    Overlay,

    /// The target is outside every overlay panel.
    Outside,
}
