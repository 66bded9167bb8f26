//! End-to-end watch sessions against the built binary

mod common;

use std::time::Duration;

use common::{is_event, is_run_event, TestEnv};

const WAIT: Duration = Duration::from_secs(10);

#[test]
fn missing_app_folder_fails_at_startup() {
    let env = TestEnv::new();
    let output = env.run(&["watch", "does-not-exist", "--no-livereload"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("app folder not found"),
        "stderr:\n{stderr}"
    );
}

#[test]
fn file_instead_of_folder_fails_at_startup() {
    let env = TestEnv::new();
    let output = env.run(&["watch", "my-app/app.json", "--no-livereload"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("app folder not found"));
}

#[test]
fn malformed_project_config_fails_at_startup() {
    let env = TestEnv::new();
    env.write_app_file("appix.toml", "frontend_url = [\n");

    let output = env.run(&["watch", "my-app", "--no-livereload"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "stderr:\n{stderr}");
}

#[test]
fn initial_push_runs_and_failure_is_not_fatal() {
    let env = TestEnv::new();
    let watch = env.spawn_watch(&[]);

    let started = watch.wait_for_event(WAIT, |v| is_event(v, "watch_started"));
    assert!(started.is_some(), "no watch_started event");

    let failed = watch
        .wait_for_event(WAIT, |v| is_run_event(v, "push_failed", 0))
        .expect("initial push should report its failure");
    assert_eq!(failed["command"], "watch");
    assert_eq!(failed["trigger"], "initial");

    // Still watching after the failed push
    env.write_app_file("src/index.js", "export default 2;\n");
    let changed = watch.wait_for_event(WAIT, |v| is_event(v, "file_changed"));
    assert!(changed.is_some(), "session stopped after a failed push");

    watch.kill();
}

#[test]
fn change_after_initial_push_triggers_change_run() {
    let env = TestEnv::new();
    let watch = env.spawn_watch(&[]);

    watch
        .wait_for_event(WAIT, |v| is_run_event(v, "push_failed", 0))
        .expect("initial push never finished");

    env.write_app_file("src/index.js", "export default 3;\n");

    let started = watch
        .wait_for_event(WAIT, |v| is_event(v, "push_started") && v["run"] != 0)
        .expect("change did not start a push");
    assert_eq!(started["trigger"], "change");

    watch.kill();
}

#[test]
fn ignored_changes_are_not_reported() {
    let env = TestEnv::new();
    let watch = env.spawn_watch(&[]);

    watch
        .wait_for_event(WAIT, |v| is_run_event(v, "push_failed", 0))
        .expect("initial push never finished");

    env.write_app_file("node_modules/dep/index.js", "module.exports = 1;\n");
    env.write_app_file("src/.index.js.swp", "swap");

    let changed = watch.wait_for_event(Duration::from_millis(800), |v| {
        is_event(v, "file_changed") || is_event(v, "push_started")
    });
    assert!(changed.is_none(), "unexpected event: {changed:?}");

    watch.kill();
}
