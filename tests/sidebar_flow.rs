use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use todo_sidebar_rs::tasks::TaskStore;
use todo_sidebar_rs::{
    EdgeTrigger, FileTaskStore, Importance, Position, Rect, ScreenEdge, SidebarConfig,
    SidebarController, Transition, WindowMode,
};

const SCREEN: Rect = Rect {
    left: 0.0,
    top: 0.0,
    right: 1920.0,
    bottom: 1080.0,
};

fn start(path: &std::path::Path, now: Instant) -> SidebarController<FileTaskStore> {
    let config = SidebarConfig::default();
    let edge = EdgeTrigger::new(
        config.edge.strip(SCREEN, config.trigger_width),
        WindowMode::AutoHide,
    );
    SidebarController::start(FileTaskStore::new(path), edge, &config, now)
}

#[test]
fn tasks_survive_a_restart_in_order() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("todo_sidebar_tasks.txt");
    let t0 = Instant::now();

    let mut first = start(&path, t0);
    let a = first.add_task("pay rent", Importance::Important).expect("add");
    first.add_task("call the plumber", Importance::Normal).expect("add");
    first.add_task("a || b", Importance::Normal).expect("add");
    first.move_task(2, 0).expect("move");
    first.set_checked(a, true, t0).expect("check");

    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "0||normal||a || b\n1||important||pay rent\n0||normal||call the plumber\n"
    );

    let second = start(&path, t0);
    let loaded: Vec<(bool, Importance, &str)> = second
        .tasks()
        .iter()
        .map(|t| (t.checked, t.importance, t.text.as_str()))
        .collect();
    assert_eq!(
        loaded,
        vec![
            (false, Importance::Normal, "a || b"),
            (true, Importance::Important, "pay rent"),
            (false, Importance::Normal, "call the plumber"),
        ]
    );
}

#[test]
fn malformed_lines_are_skipped() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tasks.txt");
    fs::write(&path, "0||normal||keep this\n1||important\n\n").expect("write");

    let controller = start(&path, Instant::now());
    assert_eq!(controller.tasks().len(), 1);
    assert_eq!(controller.tasks()[0].text, "keep this");
}

#[test]
fn invalid_utf8_line_does_not_lose_the_rest() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tasks.txt");
    fs::write(
        &path,
        b"0||normal||keep one\n0||normal||bad \xff byte\n0||normal||keep two\n",
    )
    .expect("write");

    let mut controller = start(&path, Instant::now());
    controller.add_task("new", Importance::Normal).expect("add");

    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "0||normal||keep one\n0||normal||keep two\n0||normal||new\n"
    );
}

#[test]
fn unreadable_file_starts_empty() {
    let temp = tempdir().expect("tempdir");
    // A directory where the file should be cannot be read as text.
    let path = temp.path().join("tasks.txt");
    fs::create_dir(&path).expect("mkdir");

    let mut controller = start(&path, Instant::now());
    assert!(controller.tasks().is_empty());

    // Saving fails too, but the task stays in memory.
    controller.add_task("still here", Importance::Normal).expect("add");
    assert!(controller.save_error().is_some());
    assert_eq!(controller.tasks().len(), 1);
}

#[test]
fn checked_tasks_expire_and_are_written_back() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tasks.txt");
    let t0 = Instant::now();
    let delay = Duration::from_millis(3000);

    let mut controller = start(&path, t0);
    let a = controller.add_task("A", Importance::Normal).expect("add");
    let b = controller.add_task("B", Importance::Normal).expect("add");
    controller.set_checked(a, true, t0).expect("check");
    controller.set_checked(b, true, t0 + delay / 2).expect("check");

    assert_eq!(controller.fire_due_expiries(t0 + delay), vec![a]);
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "1||normal||B\n"
    );

    controller.set_checked(b, false, t0 + delay).expect("uncheck");
    assert!(controller.fire_due_expiries(t0 + delay * 4).is_empty());
    assert_eq!(
        FileTaskStore::new(&path).load().expect("load").len(),
        1
    );
}

#[test]
fn bulk_remove_leaves_no_stale_timers() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tasks.txt");
    let t0 = Instant::now();

    let mut controller = start(&path, t0);
    let a = controller.add_task("A", Importance::Normal).expect("add");
    controller.add_task("B", Importance::Normal).expect("add");
    let c = controller.add_task("C", Importance::Important).expect("add");
    controller.set_checked(a, true, t0).expect("check");
    controller.set_checked(c, true, t0).expect("check");

    controller.remove_checked_now();

    assert_eq!(fs::read_to_string(&path).expect("read"), "0||normal||B\n");
    assert!(controller.expiry().is_empty());
    assert!(controller
        .fire_due_expiries(t0 + Duration::from_secs(60))
        .is_empty());
}

#[test]
fn panel_opens_from_edge_and_closes_outside() {
    let temp = tempdir().expect("tempdir");
    let mut controller = start(&temp.path().join("tasks.txt"), Instant::now());
    let panel = ScreenEdge::Right.strip(SCREEN, 300.0);

    let at_edge = Position::new(1915.0, 540.0);
    assert_eq!(controller.poll_pointer(at_edge, panel), Some(Transition::Show));
    for _ in 0..10 {
        assert_eq!(controller.poll_pointer(at_edge, panel), None);
    }

    assert_eq!(controller.poll_pointer(Position::new(1700.0, 100.0), panel), None);
    assert_eq!(
        controller.poll_pointer(Position::new(900.0, 100.0), panel),
        Some(Transition::Hide)
    );
}
