
use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use recording::{controller, entries_for, new_log, take, RecordingView};
use uiterm::{Bounds, UiError};

#[test]
fn duplicate_name_is_rejected_and_first_view_kept() {
    let log = new_log();
    let (ui, backend) = controller(&log);

    ui.add("main", RecordingView::new("first", &log))
        .expect("first add");
    let err = ui
        .add("main", RecordingView::new("second", &log))
        .expect_err("duplicate rejected");
    assert_eq!(err, UiError::duplicate_name("main"));
    assert_eq!(ui.len(), 1);
    assert_eq!(take(&log), vec!["first:init".to_string()]);

    ui.refresh();
    assert_eq!(take(&log), vec!["first:draw".to_string()]);
    assert_eq!(backend.flush_count(), 1);
}

#[test]
fn add_initializes_without_redrawing() {
    let log = new_log();
    let (ui, backend) = controller(&log);

    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    assert_eq!(take(&log), vec!["main:init".to_string()]);
    assert_eq!(ui.bounds("main"), Some(Bounds::default()));
    assert_eq!(backend.flush_count(), 0);
}

#[test]
fn set_bounds_on_unknown_name_changes_nothing() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    take(&log);

    let err = ui
        .set_bounds("side", (0, 0, 10, 10))
        .expect_err("unknown rejected");
    assert_eq!(err, UiError::unknown_element("side"));
    assert_eq!(ui.names(), vec!["main".to_string()]);
    assert_eq!(ui.bounds("main"), Some(Bounds::default()));
    assert!(take(&log).is_empty());
}

#[test]
fn set_bounds_stores_and_forwards_unvalidated_rectangles() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    ui.add("main", RecordingView::new("main", &log))
        .expect("add");
    take(&log);

    ui.set_bounds("main", (10, 5, 2, -3)).expect("set bounds");
    assert_eq!(ui.bounds("main"), Some(Bounds::new(10, 5, 2, -3)));
    assert_eq!(take(&log), vec!["main:bounds 10,5,2,-3".to_string()]);
    assert_eq!(backend.flush_count(), 0);
}

#[test]
fn focus_transfer_deactivates_before_activating_then_redraws_once() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    let a = RecordingView::new("a", &log);
    let b = RecordingView::new("b", &log);
    let flags = [a.active_flag(), b.active_flag()];
    ui.add("a", a).expect("add a");
    ui.add("b", b).expect("add b");

    let active_count = |flags: &[Rc<RefCell<bool>>]| flags.iter().filter(|f| *f.borrow()).count();

    ui.set_active("a");
    assert_eq!(ui.active().as_deref(), Some("a"));
    assert_eq!(active_count(&flags[..]), 1);
    take(&log);
    let flushes = backend.flush_count();

    ui.set_active("b");
    let entries = take(&log);
    assert_eq!(
        entries[..2].to_vec(),
        vec!["a:deactivate".to_string(), "b:activate".to_string()]
    );
    assert_eq!(entries_for(&entries[2..], "draw").len(), 2);
    assert_eq!(entries.len(), 4);
    assert_eq!(ui.active().as_deref(), Some("b"));
    assert_eq!(active_count(&flags[..]), 1);
    assert_eq!(backend.flush_count(), flushes + 1);
}

#[test]
fn unknown_target_only_deactivates() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    ui.add("a", RecordingView::new("a", &log)).expect("add");
    ui.set_active("a");
    take(&log);

    ui.set_active("missing");
    let entries = take(&log);
    assert_eq!(entries, vec!["a:deactivate".to_string(), "a:draw".to_string()]);
    assert_eq!(ui.active(), None);
}

#[test]
fn reactivating_the_active_element_skips_deactivation() {
    let log = new_log();
    let (ui, _backend) = controller(&log);
    ui.add("a", RecordingView::new("a", &log)).expect("add");
    ui.set_active("a");
    take(&log);

    ui.set_active("a");
    assert_eq!(
        take(&log),
        vec!["a:activate".to_string(), "a:draw".to_string()]
    );
}

#[test]
fn focus_changes_requested_from_a_view_hook_keep_their_order() {
    let log = new_log();
    let (ui, backend) = controller(&log);
    let a = RecordingView::new("a", &log).on_input(|ui| ui.set_active("b"));
    ui.add("a", a).expect("add a");
    ui.add("b", RecordingView::new("b", &log)).expect("add b");
    ui.set_active("a");
    take(&log);
    let flushes = backend.flush_count();

    ui.on_character_event('q');
    let entries = take(&log);
    assert_eq!(
        entries[..3].to_vec(),
        vec![
            "a:char q".to_string(),
            "a:deactivate".to_string(),
            "b:activate".to_string()
        ]
    );
    assert_eq!(entries_for(&entries, "draw").len(), 2);
    assert_eq!(ui.active().as_deref(), Some("b"));
    assert_eq!(backend.flush_count(), flushes + 1);
}
