//! Validated placement mutations over the live store.
//!
//! [`PlacementEngine`] ties the widget registry, the placement store, and
//! the observer list together. Every mutation validates against the registry
//! first and leaves the store untouched on failure; observers are notified
//! synchronously before the mutating call returns, so a caller that just
//! dropped a widget sees a fully consistent state when it next queries (and
//! may immediately start another drag).
//!
//! # Reentrancy
//!
//! Mutations through `&mut self` cannot overlap in safe Rust, but callers
//! that hand shared wrappers into observer callbacks could otherwise re-enter
//! mid-notification. A busy flag covers the whole mutate-and-notify window;
//! reentrant mutations fail fast with [`EngineError::Reentrant`].

use std::cell::Cell;
use std::fmt;

use tracing::{debug, trace};

use toolrail_model::{
    ContainerId, DefaultLayout, LayoutSnapshot, RegistryError, SnapshotError, WidgetDef, WidgetId,
    WidgetRegistry,
};

use crate::event::{LayoutEvent, ObserverId, ObserverRegistry};
use crate::store::PlacementStore;

/// Errors from engine and session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The widget is not registered.
    UnknownWidget { id: WidgetId },
    /// The target container was never declared.
    UnknownContainer { id: ContainerId },
    /// The widget is flagged `removable: false`.
    NotRemovable { id: WidgetId },
    /// The operation requires a different session state.
    InvalidState { operation: &'static str },
    /// The operation was issued from inside an observer notification.
    Reentrant { operation: &'static str },
    /// A persisted snapshot failed validation.
    Snapshot(SnapshotError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWidget { id } => write!(f, "unknown widget {id:?}"),
            Self::UnknownContainer { id } => write!(f, "unknown container {id:?}"),
            Self::NotRemovable { id } => write!(f, "widget {id:?} is not removable"),
            Self::InvalidState { operation } => {
                write!(f, "{operation} requires an active customization session")
            }
            Self::Reentrant { operation } => {
                write!(f, "{operation} called reentrantly from an observer")
            }
            Self::Snapshot(err) => write!(f, "invalid layout snapshot: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SnapshotError> for EngineError {
    fn from(err: SnapshotError) -> Self {
        Self::Snapshot(err)
    }
}

/// Clears the busy flag when notification unwinds.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Registry-validated mutations and queries over the live placement state.
#[derive(Debug)]
pub struct PlacementEngine {
    registry: WidgetRegistry,
    default_layout: DefaultLayout,
    store: PlacementStore,
    observers: ObserverRegistry,
    notifying: Cell<bool>,
}

impl PlacementEngine {
    /// Create an engine seeded with the registry's default layout.
    #[must_use]
    pub fn new(registry: WidgetRegistry) -> Self {
        let default_layout = registry.default_layout();
        let store = PlacementStore::from_layout(&default_layout);
        Self {
            registry,
            default_layout,
            store,
            observers: ObserverRegistry::default(),
            notifying: Cell::new(false),
        }
    }

    /// Create an engine whose live state comes from a persisted snapshot.
    pub fn from_snapshot(
        registry: WidgetRegistry,
        snapshot: &LayoutSnapshot,
    ) -> Result<Self, EngineError> {
        snapshot.validate_against(&registry)?;
        let mut engine = Self::new(registry);
        engine.store = PlacementStore::from_snapshot(snapshot);
        Ok(engine)
    }

    /// The widget catalog.
    #[must_use]
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// The registry's default layout snapshot.
    #[must_use]
    pub fn default_layout(&self) -> &DefaultLayout {
        &self.default_layout
    }

    // -- Observers ----------------------------------------------------------

    /// Subscribe to layout events. Delivery is synchronous, in subscription
    /// order.
    pub fn subscribe(&mut self, observer: impl FnMut(&LayoutEvent) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Drop an observer. Returns `true` if it was subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of subscribed observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // -- Mutations ----------------------------------------------------------

    /// Move a widget to `index` within a container.
    ///
    /// Validates the widget and container against the registry; the store is
    /// unchanged on failure. A move to the slot the widget already occupies
    /// is a store no-op but still notifies observers (downstream consumers
    /// may need a refresh regardless).
    pub fn move_widget(
        &mut self,
        widget: &WidgetId,
        container: &ContainerId,
        index: usize,
    ) -> Result<(), EngineError> {
        self.ensure_idle("move")?;
        self.lookup(widget)?;
        if !self.registry.has_container(container) {
            return Err(EngineError::UnknownContainer {
                id: container.clone(),
            });
        }
        let from = self.store.place(widget.clone(), container, index);
        debug!(%widget, %container, index, from = ?from, "widget moved");
        self.dispatch(&LayoutEvent::PlacementChanged {
            widget: widget.clone(),
            from,
            to: Some(container.clone()),
        });
        Ok(())
    }

    /// Remove a widget from all containers.
    ///
    /// A no-op (without notification) if the widget is registered but
    /// unplaced. Fails with [`EngineError::NotRemovable`] for pinned
    /// widgets.
    pub fn remove_widget(&mut self, widget: &WidgetId) -> Result<(), EngineError> {
        self.ensure_idle("remove")?;
        let def = self.lookup(widget)?;
        if !def.removable {
            return Err(EngineError::NotRemovable { id: widget.clone() });
        }
        let Some(from) = self.store.remove(widget) else {
            trace!(%widget, "remove of unplaced widget ignored");
            return Ok(());
        };
        debug!(%widget, %from, "widget removed");
        self.dispatch(&LayoutEvent::PlacementChanged {
            widget: widget.clone(),
            from: Some(from),
            to: None,
        });
        Ok(())
    }

    /// Restore every container to the default layout and drop widgets the
    /// default layout does not reference. Emits a single
    /// [`LayoutEvent::LayoutReset`] after the store has settled.
    pub fn reset_to_default(&mut self) -> Result<(), EngineError> {
        self.ensure_idle("reset")?;
        self.store.reset_to(&self.default_layout);
        debug!(widgets = self.store.widget_count(), "layout reset to default");
        self.dispatch(&LayoutEvent::LayoutReset);
        Ok(())
    }

    /// Replace the live state with a persisted snapshot. Observers see one
    /// [`LayoutEvent::LayoutReset`] (full-state invalidation).
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) -> Result<(), EngineError> {
        self.ensure_idle("restore")?;
        snapshot.validate_against(&self.registry)?;
        self.store = PlacementStore::from_snapshot(snapshot);
        debug!(widgets = self.store.widget_count(), "layout restored from snapshot");
        self.dispatch(&LayoutEvent::LayoutReset);
        Ok(())
    }

    // -- Queries ------------------------------------------------------------

    /// Whether a drag gesture may pick this widget up: it is registered,
    /// currently placed, and flagged draggable.
    #[must_use]
    pub fn can_drag(&self, widget: &WidgetId) -> bool {
        self.registry
            .get(widget)
            .map(|def| def.draggable && self.store.container_of(widget).is_some())
            .unwrap_or(false)
    }

    /// The container currently holding a widget.
    #[must_use]
    pub fn container_of(&self, widget: &WidgetId) -> Option<&ContainerId> {
        self.store.container_of(widget)
    }

    /// The (container, index) of a widget, if placed.
    #[must_use]
    pub fn position_of(&self, widget: &WidgetId) -> Option<(&ContainerId, usize)> {
        self.store.position_of(widget)
    }

    /// The ordered sequence for a container.
    #[must_use]
    pub fn sequence(&self, container: &ContainerId) -> Option<&[WidgetId]> {
        self.store.sequence(container)
    }

    /// Whether the live state exactly matches the default layout.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.store.matches_layout(&self.default_layout)
    }

    /// Read-only copy of the live state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        self.store.snapshot()
    }

    // -- Internals ----------------------------------------------------------

    fn lookup(&self, widget: &WidgetId) -> Result<&WidgetDef, EngineError> {
        self.registry.get(widget).map_err(|err| match err {
            RegistryError::UnknownWidget { id } => EngineError::UnknownWidget { id },
            RegistryError::UnknownContainer { id } => EngineError::UnknownContainer { id },
            RegistryError::DuplicateWidget { id } => EngineError::UnknownWidget { id },
        })
    }

    fn ensure_idle(&self, operation: &'static str) -> Result<(), EngineError> {
        if self.notifying.get() {
            return Err(EngineError::Reentrant { operation });
        }
        Ok(())
    }

    fn dispatch(&mut self, event: &LayoutEvent) {
        self.notifying.set(true);
        let _guard = DispatchGuard(&self.notifying);
        self.observers.emit(event);
    }

    #[cfg(test)]
    pub(crate) fn force_notifying(&self, value: bool) {
        self.notifying.set(value);
    }
}
