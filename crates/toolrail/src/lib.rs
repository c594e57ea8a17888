#![forbid(unsafe_code)]

//! Toolrail public facade crate.
//!
//! Re-exports the common types from the model and engine crates and offers
//! a lightweight prelude for day-to-day usage.

// --- Model re-exports ------------------------------------------------------

pub use toolrail_model::{
    ContainerId, DefaultLayout, DefaultPosition, LAYOUT_SCHEMA_VERSION, LayoutSnapshot,
    RegistryError, SnapshotError, WidgetDef, WidgetId, WidgetRegistry,
};

// --- Engine re-exports -----------------------------------------------------

pub use toolrail_engine::{
    CustomizeSession, DragGesture, EngineError, GestureError, LayoutEvent, ObserverId,
    PlacementEngine, PlacementStore, SessionState,
};

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::{
        ContainerId, CustomizeSession, DragGesture, LayoutEvent, LayoutSnapshot, WidgetDef,
        WidgetId, WidgetRegistry,
    };
}
