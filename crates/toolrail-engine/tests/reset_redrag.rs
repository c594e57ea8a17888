//! Dragging widgets again after a reset must work.
//!
//! End-to-end walk of a customization session: drag a widget across
//! containers, reset to the default layout, then verify the same widget is
//! still present, still draggable, and can be dragged again.

use std::cell::RefCell;
use std::rc::Rc;

use toolrail_engine::{CustomizeSession, DragGesture, EngineError, LayoutEvent};
use toolrail_model::{ContainerId, WidgetDef, WidgetId, WidgetRegistry};

fn browser_like_registry() -> WidgetRegistry {
    let mut reg = WidgetRegistry::new();
    reg.add_container("nav-bar");
    reg.add_container("panel-menu");
    reg.add_container("palette");
    reg.register(WidgetDef::new("history", "panel-menu")).unwrap();
    reg.register(WidgetDef::new("preferences", "nav-bar")).unwrap();
    reg
}

#[test]
fn still_customizable_after_reset() {
    let mut session = CustomizeSession::new(browser_like_registry());
    session.enter().unwrap();

    let history = WidgetId::new("history");
    let preferences = WidgetId::new("preferences");
    let nav_bar = ContainerId::new("nav-bar");
    let panel_menu = ContainerId::new("panel-menu");

    assert!(session.can_drag(&history), "draggable before any change");
    assert!(session.can_drag(&preferences));

    session.move_widget(&history, &nav_bar, 2).unwrap();
    assert_eq!(session.container_of(&history), Some(&nav_bar));
    assert!(!session.in_default_state());

    session.reset_all().unwrap();
    assert!(session.in_default_state(), "back in default state");
    assert_eq!(session.container_of(&history), Some(&panel_menu));

    // The widgets must still exist and still be draggable.
    assert!(session.engine().registry().get(&history).is_ok());
    assert!(session.engine().registry().get(&preferences).is_ok());
    assert!(session.can_drag(&history), "draggable after reset");
    assert!(session.can_drag(&preferences));

    // Re-issuing the drag must succeed.
    session.move_widget(&history, &nav_bar, 0).unwrap();
    assert_eq!(session.container_of(&history), Some(&nav_bar));

    session.reset_all().unwrap();
    session.exit().unwrap();
}

#[test]
fn redrag_through_gesture_adapter_after_reset() {
    let mut session = CustomizeSession::new(browser_like_registry());
    session.enter().unwrap();

    let history = WidgetId::new("history");

    let mut drag = DragGesture::pick_up(&session, &history).unwrap();
    drag.hover("nav-bar", 1);
    drag.drop(&mut session).unwrap();

    session.reset_all().unwrap();

    let mut drag = DragGesture::pick_up(&session, &history).unwrap();
    drag.hover("nav-bar", 0);
    drag.drop(&mut session).unwrap();
    assert_eq!(
        session.container_of(&history),
        Some(&ContainerId::new("nav-bar"))
    );
}

#[test]
fn reset_emits_one_event_and_preserves_identities() {
    let mut session = CustomizeSession::new(browser_like_registry());
    session.enter().unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = Rc::clone(&events);
        session.subscribe(move |ev| events.borrow_mut().push(ev.clone()));
    }

    let history = WidgetId::new("history");
    let nav_bar = ContainerId::new("nav-bar");
    session.move_widget(&history, &nav_bar, 0).unwrap();
    session.reset_all().unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            LayoutEvent::PlacementChanged {
                widget: history.clone(),
                from: Some(ContainerId::new("panel-menu")),
                to: Some(nav_bar.clone()),
            },
            LayoutEvent::LayoutReset,
        ]
    );

    let ids: Vec<&str> = session
        .engine()
        .registry()
        .widget_ids()
        .map(WidgetId::as_str)
        .collect();
    assert_eq!(ids, vec!["history", "preferences"]);
}

#[test]
fn failed_move_leaves_snapshot_identical() {
    let mut session = CustomizeSession::new(browser_like_registry());
    session.enter().unwrap();

    let before = session.snapshot();
    let err = session
        .move_widget(&WidgetId::new("unknown-widget"), &ContainerId::new("nav-bar"), 0)
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownWidget { .. }));
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.snapshot().state_hash(), before.state_hash());
}

#[test]
fn exit_blob_survives_json_persistence() {
    let mut session = CustomizeSession::new(browser_like_registry());
    session.enter().unwrap();
    session
        .move_widget(&WidgetId::new("history"), &ContainerId::new("nav-bar"), 1)
        .unwrap();
    let blob = session.exit().unwrap();

    // The persistence collaborator treats the snapshot as an opaque blob.
    let json = serde_json::to_string(&blob).unwrap();
    let reloaded = serde_json::from_str(&json).unwrap();
    assert_eq!(blob, reloaded);

    let session = CustomizeSession::with_snapshot(browser_like_registry(), &reloaded).unwrap();
    assert_eq!(
        session.container_of(&WidgetId::new("history")),
        Some(&ContainerId::new("nav-bar"))
    );
    assert!(session.can_drag(&WidgetId::new("history")));
}

#[test]
fn arbitrary_moves_then_reset_is_default() {
    let mut session = CustomizeSession::new(browser_like_registry());
    session.enter().unwrap();

    let history = WidgetId::new("history");
    let preferences = WidgetId::new("preferences");
    for (widget, container, index) in [
        (&history, "nav-bar", 0),
        (&preferences, "panel-menu", 5),
        (&history, "palette", 0),
        (&preferences, "nav-bar", 1),
        (&history, "nav-bar", 0),
    ] {
        session
            .move_widget(widget, &ContainerId::new(container), index)
            .unwrap();
    }

    session.reset_all().unwrap();
    assert!(session.in_default_state());
    assert!(session.can_drag(&history));
    assert!(session.can_drag(&preferences));
}
