#![forbid(unsafe_code)]

//! Data model for the Toolrail customization engine.
//!
//! Identities, the widget registry with its default layout, and the
//! persisted layout snapshot schema. The live placement state and its
//! mutation engine live in `toolrail-engine`.

pub mod id;
pub mod layout;
pub mod registry;
pub mod snapshot;

pub use id::{ContainerId, WidgetId};
pub use layout::DefaultLayout;
pub use registry::{DefaultPosition, RegistryError, WidgetDef, WidgetRegistry};
pub use snapshot::{LAYOUT_SCHEMA_VERSION, LayoutSnapshot, SnapshotError};
