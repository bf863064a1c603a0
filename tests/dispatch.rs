
use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use recording::{controller, entries_for, new_log, take, RecordingView};
use uiterm::{Key, Modifier, UiEvent};

#[test]
fn listeners_run_in_registration_order_before_the_active_view() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    ui.set_active("main");

    for name in ["l1", "l2"] {
        let log = Rc::clone(&log);
        ui.add_key_listener(Key::Tab, move |_, key| {
            log.borrow_mut().push(format!("{name}:{key}"));
        });
    }
    let other = Rc::clone(&log);
    ui.add_key_listener(Key::Enter, move |_, _| {
        other.borrow_mut().push("enter-listener".to_string());
    });
    take(&log);

    ui.on_key_event(Modifier::empty(), Key::Tab);
    assert_eq!(
        take(&log),
        vec![
            "l1:tab".to_string(),
            "l2:tab".to_string(),
            "main:key tab".to_string()
        ]
    );
}

#[test]
fn key_listeners_fire_without_an_active_view() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    ui.add_key_listener(Key::F(1), move |_, _| counter.set(counter.get() + 1));

    ui.on_key_event(Modifier::empty(), Key::F(1));
    ui.on_key_event(Modifier::ALT, Key::F(1));
    ui.on_key_event(Modifier::empty(), Key::F(2));
    assert_eq!(hits.get(), 2);
    assert!(take(&log).is_empty());
}

#[test]
fn listener_focus_switch_routes_the_same_key_to_the_new_view() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    ui.add("a", RecordingView::new("a", &log)).expect("add a");
    ui.add("b", RecordingView::new("b", &log)).expect("add b");
    ui.set_active("a");
    ui.add_key_listener(Key::Tab, |ui, _| ui.set_active("b"));
    take(&log);

    ui.on_key_event(Modifier::ALT, Key::Tab);
    let entries = take(&log);
    assert_eq!(
        entries[..2].to_vec(),
        vec!["a:deactivate".to_string(), "b:activate".to_string()]
    );
    assert_eq!(
        entries.last().map(String::as_str),
        Some("b:key alt+tab")
    );
}

#[test]
fn listener_added_during_dispatch_fires_from_the_next_event() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    ui.add_key_listener(Key::Escape, move |ui, _| {
        let counter = Rc::clone(&counter);
        ui.add_key_listener(Key::Escape, move |_, _| counter.set(counter.get() + 1));
    });

    ui.on_key_event(Modifier::empty(), Key::Escape);
    assert_eq!(hits.get(), 0);
    ui.on_key_event(Modifier::empty(), Key::Escape);
    assert_eq!(hits.get(), 1);
}

#[test]
fn characters_without_an_active_view_are_dropped() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    take(&log);

    ui.on_character_event('x');
    ui.dispatch(UiEvent::Character('y'));
    assert!(take(&log).is_empty());
    assert_eq!(backend.flush_count(), 0);
}

#[test]
fn refresh_requested_from_a_character_hook_draws_after_it_returns() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    let view = RecordingView::new("main", &log).on_input(|ui| {
        ui.refresh();
        ui.refresh();
    });
    ui.add("main", view).expect("add");
    ui.set_active("main");
    take(&log);
    let flushes = backend.flush_count();

    ui.on_character_event('x');
    assert_eq!(
        take(&log),
        vec!["main:char x".to_string(), "main:draw".to_string()]
    );
    assert_eq!(backend.flush_count(), flushes + 1);
}

#[test]
fn bounds_set_from_a_hook_reach_the_view_after_it_returns() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    let view = RecordingView::new("main", &log).on_input(|ui| {
        ui.set_bounds("main", (1, 2, 3, 4)).expect("known element");
        assert_eq!(ui.bounds("main").map(|b| b.x1), Some(3));
    });
    ui.add("main", view).expect("add");
    ui.set_active("main");
    take(&log);

    ui.on_character_event('z');
    assert_eq!(
        take(&log),
        vec!["main:char z".to_string(), "main:bounds 1,2,3,4".to_string()]
    );
}

#[test]
fn nested_refresh_from_a_draw_hook_flushes_once() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    let nested = Rc::new(Cell::new(false));
    let once = Rc::clone(&nested);
    let view = RecordingView::new("outer", &log)
        .with_label("HELLO")
        .on_draw(move |ui| {
            if !once.replace(true) {
                ui.refresh();
            }
        });
    ui.add("outer", view).expect("add outer");
    ui.add("plain", RecordingView::new("plain", &log))
        .expect("add plain");
    take(&log);

    ui.refresh();
    assert!(nested.get());
    assert_eq!(backend.flush_count(), 1);
    assert_eq!(backend.clear_count(), 2);
    assert_eq!(backend.line(0), "HELLO");

    let entries = take(&log);
    assert_eq!(entries_for(&entries, "draw").len(), entries.len());
    assert_eq!(
        entries.iter().filter(|e| *e == "outer:draw").count(),
        2,
        "caller repainted in the follow-up pass"
    );
    assert_eq!(entries.iter().filter(|e| *e == "plain:draw").count(), 2);

    ui.refresh();
    assert_eq!(backend.flush_count(), 2);
}

#[test]
fn refresh_before_backend_init_does_nothing() {
    let log = new_log();
    let backend = uiterm::MemoryBackend::new(10, 2);
    let ui = uiterm::Ui::new(recording::RecordingManager::new(&log), backend.clone());
    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    take(&log);

    ui.refresh();
    ui.set_active("main");
    assert_eq!(take(&log), vec!["main:activate".to_string()]);
    assert_eq!(backend.flush_count(), 0);
    assert_eq!(backend.clear_count(), 0);
}

#[test]
fn repaint_requests_from_every_draw_are_bounded() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    let view = RecordingView::new("main", &log)
        .with_label("busy")
        .on_draw(|ui| ui.refresh());
    ui.add("main", view).expect("add");
    take(&log);

    ui.refresh();
    assert_eq!(backend.flush_count(), 1);
    assert_eq!(backend.clear_count(), 8);
    assert_eq!(backend.line(0), "busy");
    assert!(!ui.is_drawing());
}

#[test]
fn uppercase_ctrl_chords_reach_lowercase_bindings() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    ui.set_active("main");
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    ui.add_key_listener(Key::ctrl('a'), move |_, key| {
        assert_eq!(key, Key::Ctrl('a'));
        counter.set(counter.get() + 1);
    });
    take(&log);

    ui.on_key_event(Modifier::empty(), Key::Ctrl('A'));
    ui.dispatch(UiEvent::Key(Modifier::empty(), Key::Ctrl('a')));
    assert_eq!(hits.get(), 2);
    assert_eq!(
        take(&log),
        vec!["main:key ctrl+a".to_string(), "main:key ctrl+a".to_string()]
    );
}
