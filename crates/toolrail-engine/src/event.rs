//! Layout change events and synchronous observers.
//!
//! Observers are notified synchronously, on the caller's stack, before the
//! mutating call returns. The engine is single-threaded; there is no queue
//! and no delivery reordering. Observers must not re-enter the engine with a
//! mutation from inside a callback (the engine fails such calls fast, see
//! `EngineError::Reentrant`).

use toolrail_model::{ContainerId, WidgetId};

/// A change to the live layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// One widget moved (or was removed, when `to` is `None`).
    ///
    /// `from: None` means the widget was previously unplaced.
    PlacementChanged {
        widget: WidgetId,
        from: Option<ContainerId>,
        to: Option<ContainerId>,
    },
    /// The whole layout was replaced (reset or snapshot restore). Observers
    /// must treat this as a full-state invalidation, not an incremental
    /// diff.
    LayoutReset,
}

/// Handle identifying a subscribed observer, for unsubscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ObserverFn = Box<dyn FnMut(&LayoutEvent)>;

/// Ordered observer list with stable IDs.
///
/// Delivery order is subscription order. Same-thread, synchronous dispatch
/// only.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(ObserverId, ObserverFn)>,
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.observers.len())
            .finish()
    }
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: impl FnMut(&LayoutEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `true` if the observer was present.
    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub(crate) fn emit(&mut self, event: &LayoutEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
