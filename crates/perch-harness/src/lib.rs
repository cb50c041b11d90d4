#![forbid(unsafe_code)]

//! Test support for Perch overlays.
//!
//! - [`SceneHost`]: an in-memory [`Host`](perch_runtime::Host) with a
//!   listener registry and leak detection
//! - [`scene`]: reference page layouts and event bursts

pub mod host;
pub mod scene;

pub use host::{ListenerOp, SceneHost};
pub use scene::{Scene, SubmenuFixture};
