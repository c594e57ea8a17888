//! The live placement state: which widget sits where.
//!
//! [`PlacementStore`] owns the container → ordered widget IDs mapping and a
//! reverse widget → container index. It is the single source of truth for
//! the current layout during a customization session.
//!
//! # Invariants
//!
//! 1. A widget ID appears in at most one container's sequence, at most once.
//! 2. The reverse index agrees exactly with the container sequences.
//! 3. Mutations are all-or-nothing; a widget is never visible in two
//!    containers, or in none, across a [`place`](PlacementStore::place).

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use toolrail_model::{ContainerId, DefaultLayout, LayoutSnapshot, WidgetId};

/// Live container → ordered widget IDs mapping with a reverse index.
#[derive(Debug, Clone, Default)]
pub struct PlacementStore {
    containers: BTreeMap<ContainerId, Vec<WidgetId>>,
    index: FxHashMap<WidgetId, ContainerId>,
}

impl PlacementStore {
    /// Seed a store from a default layout (all containers present, widgets
    /// in their default slots).
    #[must_use]
    pub fn from_layout(layout: &DefaultLayout) -> Self {
        let mut store = Self::default();
        store.reset_to(layout);
        store
    }

    /// Seed a store from a persisted snapshot.
    ///
    /// The snapshot is trusted here; callers validate it first (see
    /// `LayoutSnapshot::validate_against`).
    #[must_use]
    pub fn from_snapshot(snapshot: &LayoutSnapshot) -> Self {
        let mut store = Self::default();
        for (container, seq) in &snapshot.placements {
            store.containers.insert(container.clone(), seq.clone());
            for widget in seq {
                store.index.insert(widget.clone(), container.clone());
            }
        }
        store
    }

    /// Place a widget at `index` in a container, detaching it from wherever
    /// it currently sits. Indexes beyond the sequence length clamp to
    /// append. Returns the container the widget came from, if any.
    pub fn place(
        &mut self,
        widget: WidgetId,
        container: &ContainerId,
        index: usize,
    ) -> Option<ContainerId> {
        let from = self.detach(&widget);
        let seq = self.containers.entry(container.clone()).or_default();
        let index = index.min(seq.len());
        seq.insert(index, widget.clone());
        self.index.insert(widget, container.clone());
        from
    }

    /// Remove a widget from whatever container holds it. Returns the
    /// container it was in; `None` (and no change) if it was unplaced.
    pub fn remove(&mut self, widget: &WidgetId) -> Option<ContainerId> {
        let from = self.detach(widget);
        if from.is_some() {
            self.index.remove(widget);
        }
        from
    }

    fn detach(&mut self, widget: &WidgetId) -> Option<ContainerId> {
        let current = self.index.get(widget)?.clone();
        if let Some(seq) = self.containers.get_mut(&current) {
            seq.retain(|w| w != widget);
        }
        Some(current)
    }

    /// The container currently holding a widget, if any.
    #[must_use]
    pub fn container_of(&self, widget: &WidgetId) -> Option<&ContainerId> {
        self.index.get(widget)
    }

    /// The (container, index) of a widget, if placed.
    #[must_use]
    pub fn position_of(&self, widget: &WidgetId) -> Option<(&ContainerId, usize)> {
        let container = self.index.get(widget)?;
        let seq = self.containers.get(container)?;
        let idx = seq.iter().position(|w| w == widget)?;
        Some((container, idx))
    }

    /// The ordered sequence for a container, if known to the store.
    #[must_use]
    pub fn sequence(&self, container: &ContainerId) -> Option<&[WidgetId]> {
        self.containers.get(container).map(Vec::as_slice)
    }

    /// Total number of placed widgets.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.index.len()
    }

    /// Read-only copy of the full mapping for persistence and comparison.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::new(self.containers.clone())
    }

    /// Replace every container sequence with the default layout's, dropping
    /// any widget the layout does not reference.
    pub fn reset_to(&mut self, layout: &DefaultLayout) {
        self.containers.clear();
        self.index.clear();
        for (container, seq) in layout.iter() {
            self.containers.insert(container.clone(), seq.to_vec());
            for widget in seq {
                self.index.insert(widget.clone(), container.clone());
            }
        }
    }

    /// Whether the current state exactly matches a default layout: same
    /// sequences for every layout container, and no widgets placed in
    /// containers the layout does not describe.
    #[must_use]
    pub fn matches_layout(&self, layout: &DefaultLayout) -> bool {
        for (container, expected) in layout.iter() {
            let actual = self.sequence(container).unwrap_or(&[]);
            if actual != expected {
                return false;
            }
        }
        self.containers
            .iter()
            .filter(|(id, _)| layout.sequence(id).is_none())
            .all(|(_, seq)| seq.is_empty())
    }

    /// Check invariants 1 and 2 (used by property tests).
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0usize;
        for (container, seq) in &self.containers {
            for widget in seq {
                seen += 1;
                if self.index.get(widget) != Some(container) {
                    return false;
                }
            }
        }
        seen == self.index.len()
    }
}
