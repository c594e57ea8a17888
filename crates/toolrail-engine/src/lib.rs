#![forbid(unsafe_code)]

//! Placement engine for the Toolrail customization surface.
//!
//! The engine owns the live "which widget lives in which container at which
//! position" state and the operations that mutate it (move, remove, reset),
//! gated behind a customization session. Rendering, drag visuals, and raw
//! input translation are the caller's concern; the drag adapter in
//! [`gesture`] is the only bridge between pointer gestures and engine
//! moves.

pub mod engine;
pub mod event;
pub mod gesture;
pub mod session;
pub mod store;

pub use engine::{EngineError, PlacementEngine};
pub use event::{LayoutEvent, ObserverId};
pub use gesture::{DragGesture, GestureError};
pub use session::{CustomizeSession, SessionState};
pub use store::PlacementStore;
