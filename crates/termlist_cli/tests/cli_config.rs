use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("termlist-{nanos}-{label}"))
}

fn write_config(path: &PathBuf, config: serde_json::Value) {
    std::fs::write(path, serde_json::to_string(&config).unwrap()).unwrap();
}

fn run_session(label: &str, config: serde_json::Value, args: &[&str], input: &str) -> String {
    let exe = env!("CARGO_BIN_EXE_termlist");
    let store_dir = temp_path(label);
    let config_path = temp_path(&format!("{label}-config.json"));
    write_config(&config_path, config);

    let mut child = Command::new(exe)
        .args(args)
        .env("TERMLIST_STORE_DIR", &store_dir)
        .env("TERMLIST_CONFIG_PATH", &config_path)
        .env("TERMLIST_DISABLE_CLIPBOARD", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    let output = child
        .wait_with_output()
        .expect("failed to read session output");

    std::fs::remove_dir_all(&store_dir).ok();
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn alias_line_expands_before_dispatch() {
    let stdout = run_session(
        "alias",
        serde_json::json!({ "aliases": { "t": "today" } }),
        &[],
        "t\nexit\n",
    );

    assert!(stdout.contains("> today"));
    assert!(stdout.contains("1 [ ] — "));
}

#[test]
fn config_theme_colors_piped_output() {
    let stdout = run_session(
        "config-theme",
        serde_json::json!({ "theme": "default" }),
        &[],
        "exit\n",
    );

    // The ready line is ok-styled, so the default palette wraps it in green.
    assert!(stdout.contains("\u{1b}[32m"));
}

#[test]
fn theme_flag_overrides_config() {
    let stdout = run_session(
        "theme-flag",
        serde_json::json!({ "theme": "default" }),
        &["--theme", "mono"],
        "exit\n",
    );

    assert!(!stdout.contains('\u{1b}'));
}
