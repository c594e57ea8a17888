//! Catalog of known widgets and their default placement.
//!
//! The registry is built once when the customization surface is wired up and
//! is read-only from then on: widget definitions are immutable after
//! [`WidgetRegistry::register`], and [`WidgetRegistry::default_layout`]
//! snapshots the default arrangement used for reset and default-state
//! detection.
//!
//! # Invariants
//!
//! 1. Each [`WidgetId`] maps to at most one [`WidgetDef`].
//! 2. A widget's default container must be declared (via
//!    [`add_container`](WidgetRegistry::add_container)) before the widget is
//!    registered.
//! 3. The default layout lists every declared container, including empty
//!    ones, so "default state" is well-defined for containers with no
//!    default widgets.
//!
//! The registry has a single logical owner (the customization session) and
//! uses no interior mutability.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::id::{ContainerId, WidgetId};
use crate::layout::DefaultLayout;

/// Where a widget sits in its default container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPosition {
    /// A specific index; clamps to the end if out of range at build time.
    At(usize),
    /// After all indexed widgets, in registration order.
    Append,
}

/// Immutable definition of a customizable widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDef {
    /// Stable identity.
    pub id: WidgetId,
    /// Container the widget occupies in the default layout.
    pub default_container: ContainerId,
    /// Position within the default container.
    pub default_position: DefaultPosition,
    /// Whether the widget may be removed from all containers.
    pub removable: bool,
    /// Whether a drag gesture may pick this widget up.
    pub draggable: bool,
}

impl WidgetDef {
    /// Create a definition with append positioning, removable and draggable.
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, default_container: impl Into<ContainerId>) -> Self {
        Self {
            id: id.into(),
            default_container: default_container.into(),
            default_position: DefaultPosition::Append,
            removable: true,
            draggable: true,
        }
    }

    /// Pin the default position to a specific index.
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.default_position = DefaultPosition::At(index);
        self
    }

    /// Mark the widget as not removable from the layout.
    #[must_use]
    pub fn non_removable(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Mark the widget as not draggable.
    #[must_use]
    pub fn non_draggable(mut self) -> Self {
        self.draggable = false;
        self
    }
}

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A widget with this ID is already registered.
    DuplicateWidget { id: WidgetId },
    /// No widget with this ID is registered.
    UnknownWidget { id: WidgetId },
    /// The container was never declared.
    UnknownContainer { id: ContainerId },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateWidget { id } => write!(f, "widget {id:?} is already registered"),
            Self::UnknownWidget { id } => write!(f, "unknown widget {id:?}"),
            Self::UnknownContainer { id } => write!(f, "unknown container {id:?}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Catalog of widget definitions and declared container regions.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: FxHashMap<WidgetId, WidgetDef>,
    /// Registration order, used to build the default layout deterministically.
    order: Vec<WidgetId>,
    /// Declared containers in declaration order, no duplicates.
    containers: Vec<ContainerId>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a container region. Re-declaring is a no-op.
    pub fn add_container(&mut self, id: impl Into<ContainerId>) {
        let id = id.into();
        if !self.containers.contains(&id) {
            self.containers.push(id);
        }
    }

    /// Whether a container has been declared.
    #[must_use]
    pub fn has_container(&self, id: &ContainerId) -> bool {
        self.containers.contains(id)
    }

    /// Declared containers in declaration order.
    #[must_use]
    pub fn containers(&self) -> &[ContainerId] {
        &self.containers
    }

    /// Register a widget definition.
    ///
    /// Fails with [`RegistryError::DuplicateWidget`] if the ID exists, or
    /// [`RegistryError::UnknownContainer`] if the default container was
    /// never declared. The registry is unchanged on failure.
    pub fn register(&mut self, def: WidgetDef) -> Result<(), RegistryError> {
        if self.widgets.contains_key(&def.id) {
            return Err(RegistryError::DuplicateWidget { id: def.id });
        }
        if !self.has_container(&def.default_container) {
            return Err(RegistryError::UnknownContainer {
                id: def.default_container,
            });
        }
        self.order.push(def.id.clone());
        self.widgets.insert(def.id.clone(), def);
        Ok(())
    }

    /// Look up a widget definition.
    pub fn get(&self, id: &WidgetId) -> Result<&WidgetDef, RegistryError> {
        self.widgets
            .get(id)
            .ok_or_else(|| RegistryError::UnknownWidget { id: id.clone() })
    }

    /// Whether a widget is registered.
    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Registered widget IDs in registration order.
    pub fn widget_ids(&self) -> impl Iterator<Item = &WidgetId> {
        self.order.iter()
    }

    /// Number of registered widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no widgets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Build the immutable default layout snapshot.
    ///
    /// Every declared container appears, even when empty. Widgets with
    /// [`DefaultPosition::At`] clamp-insert at their index; `Append` widgets
    /// follow in registration order.
    #[must_use]
    pub fn default_layout(&self) -> DefaultLayout {
        let mut layout = DefaultLayout::with_containers(self.containers.iter().cloned());
        for id in &self.order {
            // Order entries are inserted alongside the definition; the
            // lookup cannot fail.
            if let Some(def) = self.widgets.get(id) {
                match def.default_position {
                    DefaultPosition::At(index) => {
                        layout.insert_at(&def.default_container, def.id.clone(), index);
                    }
                    DefaultPosition::Append => {
                        layout.push(&def.default_container, def.id.clone());
                    }
                }
            }
        }
        layout
    }
}
