//! Test environment builder for isolated Appix testing.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver};
use tempfile::TempDir;

/// Frontend URL nothing listens on; every push fails fast.
pub const UNREACHABLE_FRONTEND: &str = "http://127.0.0.1:9/upload";

/// Isolated test environment.
///
/// Provides:
/// - An app folder named `my-app`
/// - An isolated config home (so the user's real config is never read)
pub struct TestEnv {
    root: TempDir,
    app: PathBuf,
    config_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let app = root.path().join("my-app");
        let config_home = root.path().join("config");
        std::fs::create_dir_all(app.join("src")).unwrap();
        std::fs::create_dir_all(&config_home).unwrap();
        std::fs::write(app.join("app.json"), r#"{"name":"my-app"}"#).unwrap();
        std::fs::write(app.join("src/index.js"), "export default 1;\n").unwrap();
        Self {
            root,
            app,
            config_home,
        }
    }

    pub fn app(&self) -> &Path {
        &self.app
    }

    pub fn app_path(&self, relative: &str) -> PathBuf {
        self.app.join(relative)
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn write_app_file(&self, relative: &str, content: &str) {
        let path = self.app_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_appix"));
        cmd.args(args)
            .current_dir(self.root.path())
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("HOME", self.root.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("APPIX_FRONTEND_URL")
            .env_remove("APPIX_LOCAL_FRONTEND_URL")
            .env_remove("APPIX_LIVERELOAD_PORT")
            .env_remove("APPIX_NO_LIVERELOAD");
        cmd
    }

    /// Run to completion.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    /// Start a long-running watch against the unreachable frontend.
    pub fn spawn_watch(&self, extra: &[&str]) -> WatchProcess {
        let mut args = vec!["--json", "watch", "my-app", "--noBrowser", "--no-livereload"];
        args.extend_from_slice(extra);
        let mut child = self
            .command(&args)
            .env("APPIX_FRONTEND_URL", UNREACHABLE_FRONTEND)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let (tx, rx) = unbounded();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        WatchProcess { child, lines: rx }
    }
}

/// A running `appix watch --json`.
pub struct WatchProcess {
    child: Child,
    lines: Receiver<String>,
}

impl WatchProcess {
    /// Wait for an NDJSON event matching `pred`.
    pub fn wait_for_event(
        &self,
        timeout: Duration,
        pred: impl Fn(&serde_json::Value) -> bool,
    ) -> Option<serde_json::Value> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = self.lines.recv_timeout(remaining).ok()?;
            let Ok(value) = serde_json::from_str::<serde_json::Value>(&line) else {
                continue;
            };
            if pred(&value) {
                return Some(value);
            }
        }
    }

    pub fn kill(mut self) -> String {
        let _ = self.child.kill();
        let output = self.child.wait_with_output().unwrap();
        String::from_utf8_lossy(&output.stderr).into_owned()
    }
}

pub fn is_event(value: &serde_json::Value, event: &str) -> bool {
    value["event"] == event
}

pub fn is_run_event(value: &serde_json::Value, event: &str, run: u64) -> bool {
    value["event"] == event && value["run"] == run
}
