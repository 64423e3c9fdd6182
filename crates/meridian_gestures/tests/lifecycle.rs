//! Lifecycle event ordering, movement end and inertia hand-off

mod common;

use common::*;
use meridian_core::Point;
use meridian_gestures::prelude::*;
use meridian_platform::InputEvent;

fn center() -> Point {
    Point::new(WIDTH / 2.0, HEIGHT / 2.0)
}

fn pan(x: f64, y: f64) -> GestureDelta {
    GestureDelta::new().with_pan(Point::new(x, y)).with_around(center())
}

/// Manager with a single "mousePan" handler
fn setup() -> (HandlerManager, RecordingHost, std::rc::Rc<std::cell::RefCell<ScriptedHandler>>) {
    init_tracing();
    let mut manager = HandlerManager::default();
    let handler = ScriptedHandler::shared();
    manager.add("mousePan", handler.clone(), Vec::<String>::new());
    (manager, RecordingHost::new(), handler)
}

/// Drive one pointer move and flush it
fn drag_step(
    manager: &mut HandlerManager,
    host: &mut RecordingHost,
    handler: &std::rc::Rc<std::cell::RefCell<ScriptedHandler>>,
    delta: GestureDelta,
    time_stamp: f64,
) -> InputEvent {
    set_active(handler, true);
    push(handler, delta);
    let event = mouse_move(200.0, 150.0, time_stamp);
    manager.handle_event(host, &event);
    manager.render_frame(host, time_stamp + 8.0);
    event
}

/// Release the pointer and flush
fn release(
    manager: &mut HandlerManager,
    host: &mut RecordingHost,
    handler: &std::rc::Rc<std::cell::RefCell<ScriptedHandler>>,
    time_stamp: f64,
) -> InputEvent {
    set_active(handler, false);
    let event = mouse_up(200.0, 150.0, time_stamp);
    manager.handle_event(host, &event);
    manager.render_frame(host, time_stamp + 8.0);
    event
}

#[test]
fn test_movestart_precedes_gesture_starts() {
    let (mut manager, mut host, handler) = setup();

    let event = drag_step(
        &mut manager,
        &mut host,
        &handler,
        pan(5.0, 0.0).with_zoom(0.1),
        0.0,
    );

    assert_eq!(
        host.event_names(),
        vec!["movestart", "zoomstart", "dragstart", "move", "zoom", "drag"]
    );
    assert!(host.events.iter().all(|e| e.original_event.as_ref() == Some(&event)));
    assert!(manager.is_moving());
    assert!(manager.is_dragging());
    assert!(manager.is_zooming());
    assert!(!manager.is_rotating());
}

#[test]
fn test_movestart_fires_once_per_movement() {
    let (mut manager, mut host, handler) = setup();

    for i in 0..4 {
        drag_step(&mut manager, &mut host, &handler, pan(2.0, 1.0), i as f64 * 16.0);
    }
    assert_eq!(host.count(MapEventKind::MoveStart), 1);
    assert_eq!(host.count(MapEventKind::DragStart), 1);
    assert_eq!(host.count(MapEventKind::Move), 4);
    assert_eq!(host.count(MapEventKind::Drag), 4);

    release(&mut manager, &mut host, &handler, 1000.0);
    drag_step(&mut manager, &mut host, &handler, pan(2.0, 1.0), 2000.0);
    assert_eq!(host.count(MapEventKind::MoveStart), 2);
}

#[test]
fn test_end_events_precede_moveend() {
    let (mut manager, mut host, handler) = setup();
    drag_step(
        &mut manager,
        &mut host,
        &handler,
        pan(5.0, 0.0).with_zoom(0.1),
        0.0,
    );
    host.clear_events();

    let up = release(&mut manager, &mut host, &handler, 100.0);

    assert_eq!(host.event_names(), vec!["zoomend", "dragend", "moveend"]);
    // End events carry the event that deactivated the handler
    assert!(host.events.iter().all(|e| e.original_event.as_ref() == Some(&up)));
    assert!(host.eases.is_empty());
    assert!(!manager.is_moving());
}

#[test]
fn test_end_on_frame_tick_uses_gesture_event() {
    let (mut manager, mut host, handler) = setup();
    let moved = drag_step(&mut manager, &mut host, &handler, pan(5.0, 0.0), 0.0);
    host.clear_events();

    // The handler finishes on its own, without a pointer event
    set_active(&handler, false);
    manager.render_frame(&mut host, 500.0);

    assert_eq!(host.event_names(), vec!["dragend", "moveend"]);
    assert_eq!(host.events[0].original_event.as_ref(), Some(&moved));
}

#[test]
fn test_inertia_replaces_moveend() {
    let (mut manager, mut host, handler) = setup();
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 0.0);
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 16.0);
    host.clear_events();

    let up = release(&mut manager, &mut host, &handler, 30.0);

    assert_eq!(host.event_names(), vec!["dragend"]);
    assert_eq!(host.eases.len(), 1);
    let (ease, original_event) = &host.eases[0];
    assert!(ease.no_move_start);
    assert!(ease.offset.unwrap().x > 0.0);
    assert!(ease.duration_ms > 0.0);
    assert_eq!(original_event.as_ref(), Some(&up));
    assert!(!manager.is_updating_camera());
}

#[test]
fn test_reduced_motion_skips_inertia() {
    let (mut manager, mut host, handler) = setup();
    host.reduced_motion = true;
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 0.0);
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 16.0);
    host.clear_events();

    release(&mut manager, &mut host, &handler, 30.0);

    assert!(host.eases.is_empty());
    assert_eq!(host.event_names(), vec!["dragend", "moveend"]);
}

#[test]
fn test_bearing_snaps_to_north_after_moveend() {
    let (mut manager, mut host, handler) = setup();
    host.transform.bearing = 5.0;
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0).without_inertia(), 0.0);
    release(&mut manager, &mut host, &handler, 30.0);

    assert!(host.position_of(MapEventKind::MoveEnd).is_some());
    assert_eq!(host.reset_norths, 1);
    assert_eq!(host.transform.bearing, 0.0);
}

#[test]
fn test_bearing_outside_snap_is_kept() {
    let (mut manager, mut host, handler) = setup();
    host.transform.bearing = 10.0;
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0).without_inertia(), 0.0);
    release(&mut manager, &mut host, &handler, 30.0);

    assert_eq!(host.reset_norths, 0);
    assert_eq!(host.transform.bearing, 10.0);
}

#[test]
fn test_inertial_ease_snaps_bearing() {
    let (mut manager, mut host, handler) = setup();
    host.transform.bearing = -3.0;
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 0.0);
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 16.0);
    release(&mut manager, &mut host, &handler, 30.0);

    assert_eq!(host.eases.len(), 1);
    assert_eq!(host.eases[0].0.bearing, Some(0.0));
}

#[test]
fn test_stop_during_drag_ends_movement() {
    let (mut manager, mut host, handler) = setup();
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 0.0);
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 16.0);
    assert!(manager.is_dragging());
    host.clear_events();

    manager.stop(&mut host, true);

    assert_eq!(handler.borrow().resets, 1);
    assert_eq!(host.event_names(), vec!["dragend", "moveend"]);
    // Inertia was cleared, so there is nothing to glide on
    assert!(host.eases.is_empty());
    assert!(!manager.is_moving());
    assert!(!manager.is_dragging());
    assert_eq!(manager.pending_changes(), 0);
}

#[test]
fn test_stop_without_end_animation_skips_moveend() {
    let (mut manager, mut host, handler) = setup();
    drag_step(&mut manager, &mut host, &handler, pan(10.0, 0.0), 0.0);
    host.clear_events();

    manager.stop(&mut host, false);

    assert_eq!(host.event_names(), vec!["dragend"]);
    assert!(!manager.is_moving());
}

#[test]
fn test_stop_when_idle_fires_nothing() {
    let (mut manager, mut host, handler) = setup();
    manager.stop(&mut host, true);

    assert!(host.events.is_empty());
    assert_eq!(handler.borrow().resets, 1);
}

#[test]
fn test_zoom_alone_counts_as_moving() {
    let (mut manager, mut host, handler) = setup();
    drag_step(
        &mut manager,
        &mut host,
        &handler,
        GestureDelta::new().with_zoom(0.5).with_around(center()),
        0.0,
    );

    assert!(manager.is_zooming());
    assert!(manager.is_moving());
    assert!(!manager.is_dragging());
    assert_eq!(host.event_names(), vec!["movestart", "zoomstart", "move", "zoom"]);

    release(&mut manager, &mut host, &handler, 100.0);
    assert!(!manager.is_zooming());
    assert!(!manager.is_moving());
}
