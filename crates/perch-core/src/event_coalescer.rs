#![forbid(unsafe_code)]

//! Event coalescing for high-frequency geometry events.
//!
//! A window drag-resize or a scroll over a selection can deliver dozens of
//! geometry events per frame. Overlay placement is cheap, but re-rendering
//! for every one of them is not. [`EventCoalescer`] reduces a burst to at
//! most one event of each kind per frame:
//!
//! - Resize: latest size wins
//! - Selection change: latest selection rectangle wins
//! - Reflow: deduplicated
//!
//! Everything else (keys, pointer events) passes through immediately. The caller flushes once per animation frame.
//!
//! # Usage
//!
//! ```
//! use perch_core::event::Event;
//! use perch_core::event_coalescer::EventCoalescer;
//! use perch_core::geometry::Size;
//!
//! let mut coalescer = EventCoalescer::new();
//! assert!(coalescer.push(Event::resize(Size::new(800.0, 600.0))).is_none());
//! assert!(coalescer.push(Event::resize(Size::new(820.0, 600.0))).is_none());
//!
//! let pending = coalescer.flush();
//! assert_eq!(pending, vec![Event::Resize { width: 820.0, height: 600.0 }]);
//! ```

use crate::event::Event;
use crate::geometry::{Rect, Size};

/// Coalesces geometry events so a burst triggers one reposition per frame.
///
/// Not thread-safe; use from the UI thread that owns the overlay.
///
/// All operations are O(1). At most three events are held.
#[derive(Debug, Clone, Default)]
pub struct EventCoalescer {
    /// Latest viewport size.
    pending_resize: Option<Size>,

    /// Latest selection rectangle. The outer `Option` is "pending", the
    /// inner one is the payload (a collapsed selection is `None`).
    pending_selection: Option<Option<Rect>>,

    pending_reflow: bool,

    /// Events absorbed since the last flush.
    absorbed: u32,
}

impl EventCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the coalescer.
    ///
    /// Returns `Some(event)` if the event should be processed immediately,
    /// or `None` if it was absorbed and is pending until [`flush`].
    ///
    /// [`flush`]: EventCoalescer::flush
    pub fn push(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Resize { width, height } => {
                self.pending_resize = Some(Size::new(width, height));
            }
            Event::SelectionChange(rect) => {
                self.pending_selection = Some(rect);
            }
            Event::Reflow => {
                self.pending_reflow = true;
            }
            other => return Some(other),
        }
        self.absorbed = self.absorbed.saturating_add(1);
        None
    }

    /// Flush all pending events.
    ///
    /// Order: resize, selection change, reflow. Viewport size
    /// is applied before anything that is measured against it.
    #[must_use]
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(3);
        self.flush_each(|event| events.push(event));
        events
    }

    /// Flush pending events, calling a closure for each.
    pub fn flush_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Event),
    {
        #[cfg(feature = "tracing")]
        if self.absorbed > 0 {
            tracing::trace!(absorbed = self.absorbed, "flushing coalesced events");
        }

        if let Some(size) = self.pending_resize.take() {
            f(Event::resize(size));
        }
        if let Some(rect) = self.pending_selection.take() {
            f(Event::SelectionChange(rect));
        }
        if std::mem::take(&mut self.pending_reflow) {
            f(Event::Reflow);
        }
        self.absorbed = 0;
    }

    /// Check if there are any pending coalesced events.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_resize.is_some() || self.pending_selection.is_some() || self.pending_reflow
    }

    /// Number of events absorbed since the last flush.
    #[must_use]
    pub fn absorbed(&self) -> u32 {
        self.absorbed
    }

    /// Drop all pending events without processing them.
    ///
    /// Used when the overlay closes: nothing queued may outlive it.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
