//! Customization session lifecycle.
//!
//! A [`CustomizeSession`] brackets the period during which placement
//! mutations are permitted: `Inactive → Active` on [`enter`], back to
//! `Inactive` on [`exit`] (which yields the final snapshot for the
//! persistence collaborator). Mutations outside `Active` fail with
//! `EngineError::InvalidState`; queries are allowed in any state.
//!
//! Reset never ends the session: after [`reset_all`] the session stays
//! `Active`, every registered widget is still retrievable, and every
//! default-layout widget is draggable again.
//!
//! [`enter`]: CustomizeSession::enter
//! [`exit`]: CustomizeSession::exit
//! [`reset_all`]: CustomizeSession::reset_all

use std::fmt;

use tracing::debug;

use toolrail_model::{ContainerId, LayoutSnapshot, WidgetId, WidgetRegistry};

use crate::engine::{EngineError, PlacementEngine};
use crate::event::{LayoutEvent, ObserverId};

/// Whether customization mode is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Customization chrome closed; layout is read-only.
    #[default]
    Inactive,
    /// Customization chrome open; mutations permitted.
    Active,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => f.write_str("inactive"),
            Self::Active => f.write_str("active"),
        }
    }
}

/// The engine plus the session state machine gating its mutations.
#[derive(Debug)]
pub struct CustomizeSession {
    engine: PlacementEngine,
    state: SessionState,
}

impl CustomizeSession {
    /// Create an inactive session seeded with the registry's default
    /// layout.
    #[must_use]
    pub fn new(registry: WidgetRegistry) -> Self {
        Self {
            engine: PlacementEngine::new(registry),
            state: SessionState::Inactive,
        }
    }

    /// Create an inactive session whose layout comes from a persisted
    /// snapshot (a previous session's [`exit`](Self::exit) result).
    pub fn with_snapshot(
        registry: WidgetRegistry,
        snapshot: &LayoutSnapshot,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            engine: PlacementEngine::from_snapshot(registry, snapshot)?,
            state: SessionState::Inactive,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether customization mode is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Open customization mode. Fails if already active.
    pub fn enter(&mut self) -> Result<(), EngineError> {
        if self.is_active() {
            return Err(EngineError::InvalidState { operation: "enter" });
        }
        self.state = SessionState::Active;
        debug!("customization session entered");
        Ok(())
    }

    /// Close customization mode, yielding the final layout snapshot for
    /// persistence. Fails if not active.
    pub fn exit(&mut self) -> Result<LayoutSnapshot, EngineError> {
        self.require_active("exit")?;
        self.state = SessionState::Inactive;
        debug!("customization session exited");
        Ok(self.engine.snapshot())
    }

    // -- Mutations (Active only) --------------------------------------------

    /// Move a widget to `index` within a container.
    pub fn move_widget(
        &mut self,
        widget: &WidgetId,
        container: &ContainerId,
        index: usize,
    ) -> Result<(), EngineError> {
        self.require_active("move")?;
        self.engine.move_widget(widget, container, index)
    }

    /// Remove a widget from all containers.
    pub fn remove_widget(&mut self, widget: &WidgetId) -> Result<(), EngineError> {
        self.require_active("remove")?;
        self.engine.remove_widget(widget)
    }

    /// Restore the default layout. The session stays active.
    pub fn reset_all(&mut self) -> Result<(), EngineError> {
        self.require_active("reset_all")?;
        self.engine.reset_to_default()
    }

    /// Replace the live layout with a persisted snapshot.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) -> Result<(), EngineError> {
        self.require_active("restore")?;
        self.engine.restore(snapshot)
    }

    // -- Queries (any state) ------------------------------------------------

    /// Whether the layout currently matches the registry default.
    #[must_use]
    pub fn in_default_state(&self) -> bool {
        self.engine.is_default()
    }

    /// Whether a drag may pick this widget up.
    #[must_use]
    pub fn can_drag(&self, widget: &WidgetId) -> bool {
        self.engine.can_drag(widget)
    }

    /// The container currently holding a widget.
    #[must_use]
    pub fn container_of(&self, widget: &WidgetId) -> Option<&ContainerId> {
        self.engine.container_of(widget)
    }

    /// The (container, index) of a widget, if placed.
    #[must_use]
    pub fn position_of(&self, widget: &WidgetId) -> Option<(&ContainerId, usize)> {
        self.engine.position_of(widget)
    }

    /// Read-only copy of the live layout.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        self.engine.snapshot()
    }

    /// The underlying engine (read-only).
    #[must_use]
    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    /// Subscribe to layout events.
    pub fn subscribe(&mut self, observer: impl FnMut(&LayoutEvent) + 'static) -> ObserverId {
        self.engine.subscribe(observer)
    }

    /// Drop an observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.engine.unsubscribe(id)
    }

    fn require_active(&self, operation: &'static str) -> Result<(), EngineError> {
        if !self.is_active() {
            return Err(EngineError::InvalidState { operation });
        }
        Ok(())
    }
}
