//! The default layout template.
//!
//! A [`DefaultLayout`] is the registry-defined arrangement the live placement
//! state is compared against ("is the layout default?") and restored to on
//! reset. It is read-only once built; only the registry constructs one.

use std::collections::BTreeMap;

use crate::id::{ContainerId, WidgetId};

/// Immutable container → ordered widget IDs template.
///
/// Shares the keyspace of container and widget identities with the live
/// placement state, but is a fixed template, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefaultLayout {
    containers: BTreeMap<ContainerId, Vec<WidgetId>>,
}

impl DefaultLayout {
    /// Create a layout with the given (empty) containers.
    pub(crate) fn with_containers(ids: impl IntoIterator<Item = ContainerId>) -> Self {
        Self {
            containers: ids.into_iter().map(|id| (id, Vec::new())).collect(),
        }
    }

    /// Insert a widget at a clamped index in a container's sequence.
    pub(crate) fn insert_at(&mut self, container: &ContainerId, widget: WidgetId, index: usize) {
        let seq = self.containers.entry(container.clone()).or_default();
        let index = index.min(seq.len());
        seq.insert(index, widget);
    }

    /// Append a widget to a container's sequence.
    pub(crate) fn push(&mut self, container: &ContainerId, widget: WidgetId) {
        self.containers.entry(container.clone()).or_default().push(widget);
    }

    /// The ordered default sequence for a container, if the container is
    /// part of this layout.
    #[must_use]
    pub fn sequence(&self, container: &ContainerId) -> Option<&[WidgetId]> {
        self.containers.get(container).map(Vec::as_slice)
    }

    /// Iterate containers and their default sequences in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContainerId, &[WidgetId])> {
        self.containers.iter().map(|(id, seq)| (id, seq.as_slice()))
    }

    /// Container IDs known to this layout.
    pub fn container_ids(&self) -> impl Iterator<Item = &ContainerId> {
        self.containers.keys()
    }

    /// Whether a widget appears anywhere in the default layout.
    #[must_use]
    pub fn contains_widget(&self, widget: &WidgetId) -> bool {
        self.containers.values().any(|seq| seq.contains(widget))
    }

    /// The default (container, index) of a widget, if it has one.
    #[must_use]
    pub fn position_of(&self, widget: &WidgetId) -> Option<(&ContainerId, usize)> {
        self.containers.iter().find_map(|(id, seq)| {
            seq.iter().position(|w| w == widget).map(|idx| (id, idx))
        })
    }

    /// Total number of placed widgets across all containers.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.containers.values().map(Vec::len).sum()
    }
}
