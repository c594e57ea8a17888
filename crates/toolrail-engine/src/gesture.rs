//! Drag-gesture adapter.
//!
//! Translates a simulated pointer gesture into a single engine move. The
//! engine itself has no notion of an in-progress drag or of waiting: a
//! [`DragGesture`] accumulates the pointer's hover target as discrete steps
//! and commits exactly one `move` on [`drop`](DragGesture::drop). Until the
//! drop, no partial placement state is visible to any caller.
//!
//! # State Machine
//!
//! `pick_up` (fails unless the widget is draggable and the session is
//! active) → zero or more `hover` retargets → `drop` (one move) or
//! `cancel` (no effect).

use std::fmt;

use tracing::trace;

use toolrail_model::{ContainerId, WidgetId};

use crate::engine::EngineError;
use crate::session::CustomizeSession;

/// Errors from the gesture adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// The widget cannot start a drag (unknown, unplaced, or pinned).
    NotDraggable { id: WidgetId },
    /// Customization mode is not open.
    SessionInactive,
    /// The gesture was dropped without ever hovering a target slot.
    NoTarget,
    /// The committed move was rejected by the engine.
    Engine(EngineError),
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDraggable { id } => write!(f, "widget {id:?} cannot start a drag"),
            Self::SessionInactive => f.write_str("drag requires an active customization session"),
            Self::NoTarget => f.write_str("drag dropped without a target slot"),
            Self::Engine(err) => write!(f, "drag rejected: {err}"),
        }
    }
}

impl std::error::Error for GestureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EngineError> for GestureError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// A drag in progress: the picked-up widget and its current hover target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    widget: WidgetId,
    origin: (ContainerId, usize),
    target: Option<(ContainerId, usize)>,
}

impl DragGesture {
    /// Start a drag. Fails unless the session is active and the widget is
    /// currently draggable.
    pub fn pick_up(session: &CustomizeSession, widget: &WidgetId) -> Result<Self, GestureError> {
        if !session.is_active() {
            return Err(GestureError::SessionInactive);
        }
        if !session.can_drag(widget) {
            return Err(GestureError::NotDraggable { id: widget.clone() });
        }
        // can_drag implies the widget is placed.
        let (container, index) = session
            .position_of(widget)
            .ok_or_else(|| GestureError::NotDraggable { id: widget.clone() })?;
        trace!(%widget, %container, index, "drag started");
        Ok(Self {
            widget: widget.clone(),
            origin: (container.clone(), index),
            target: None,
        })
    }

    /// The widget being dragged.
    #[must_use]
    pub fn widget(&self) -> &WidgetId {
        &self.widget
    }

    /// Where the drag started.
    #[must_use]
    pub fn origin(&self) -> (&ContainerId, usize) {
        (&self.origin.0, self.origin.1)
    }

    /// The current hover target, if any.
    #[must_use]
    pub fn target(&self) -> Option<(&ContainerId, usize)> {
        self.target.as_ref().map(|(c, i)| (c, *i))
    }

    /// Retarget the drag to a (container, index) slot. May be called any
    /// number of times; only the last target matters.
    pub fn hover(&mut self, container: impl Into<ContainerId>, index: usize) {
        self.target = Some((container.into(), index));
    }

    /// Commit the drag as exactly one engine move at the last hovered slot.
    pub fn drop(self, session: &mut CustomizeSession) -> Result<(), GestureError> {
        let (container, index) = self.target.ok_or(GestureError::NoTarget)?;
        session.move_widget(&self.widget, &container, index)?;
        trace!(widget = %self.widget, %container, index, "drag dropped");
        Ok(())
    }

    /// Abandon the drag without touching the layout.
    pub fn cancel(self) {
        trace!(widget = %self.widget, "drag cancelled");
    }
}
