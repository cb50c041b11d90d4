#![forbid(unsafe_code)]

//! Core: geometry primitives, input events, and event coalescing.
//!
//! # Role in Perch
//! `perch-core` is the vocabulary shared by every other crate. It owns the
//! rectangle math used by the placement resolvers and the normalized events
//! the tracking controller consumes.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Rect`](geometry::Rect), [`Size`](geometry::Size),
//!   NaN-proof clamping, edge overflow tests, centering.
//! - **Event**: canonical key, pointer, resize, selection and reflow events.
//! - **Coalescing**: at most one geometry event of each kind per frame.
//!
//! # How it fits in the system
//! `perch-layout` consumes the geometry types in its pure resolvers;
//! `perch-runtime` consumes events and drives the resolvers from them.

pub mod event;
pub mod event_coalescer;
pub mod geometry;
