use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("termlist-{nanos}-{label}"))
}

fn run_line(store_dir: &Path, line: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_termlist");
    let config_path = store_dir.join("config-absent.json");

    Command::new(exe)
        .args(["--command", line])
        .env("TERMLIST_STORE_DIR", store_dir)
        .env("TERMLIST_CONFIG_PATH", &config_path)
        .env("TERMLIST_DISABLE_CLIPBOARD", "1")
        .output()
        .expect("failed to run command line")
}

#[test]
fn one_shot_add_echoes_and_renders() {
    let store_dir = temp_path("oneshot-add");

    let output = run_line(&store_dir, "add: buy milk");
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("> add: buy milk"));
    assert!(stdout.contains("1 [ ] buy milk"));
    assert!(!stdout.contains("terminal mode"));
}

#[test]
fn tasks_persist_across_process_runs() {
    let store_dir = temp_path("oneshot-persist");

    let first = run_line(&store_dir, "add: persisted task");
    assert!(first.status.success());

    let second = run_line(&store_dir, "clear");
    std::fs::remove_dir_all(&store_dir).ok();

    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("1 [ ] persisted task"));
}

#[test]
fn out_of_range_index_leaves_store_untouched() {
    let store_dir = temp_path("oneshot-range");

    let first = run_line(&store_dir, "add: only one");
    assert!(first.status.success());

    let second = run_line(&store_dir, "x: 99");
    let third = run_line(&store_dir, "clear");
    std::fs::remove_dir_all(&store_dir).ok();

    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("error: invalid index"));

    let rendered = String::from_utf8_lossy(&third.stdout);
    assert!(rendered.contains("1 [ ] only one"));
}

#[test]
fn reset_deletes_every_task() {
    let store_dir = temp_path("oneshot-reset");

    run_line(&store_dir, "add: one");
    run_line(&store_dir, "add: two");
    let reset = run_line(&store_dir, "reset");
    let after = run_line(&store_dir, "clear");
    std::fs::remove_dir_all(&store_dir).ok();

    let stdout = String::from_utf8_lossy(&reset.stdout);
    assert!(stdout.contains("no tasks yet — try: add: your next tiny win"));

    let rendered = String::from_utf8_lossy(&after.stdout);
    assert!(rendered.contains("no tasks yet — try: add: your next tiny win"));
}
