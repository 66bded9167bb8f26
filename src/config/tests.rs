//! Tests for the config module

use super::loader::{load_layered, with_env_overrides};
use super::types::*;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.frontend_url, None);
    assert_eq!(config.local_frontend_url, "http://localhost:3001/upload");
    assert_eq!(config.push.idle_timeout(), Duration::from_secs(180));
    assert_eq!(config.push.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.push.poll_interval(), Duration::from_secs(1));
    assert!(config.livereload.enabled);
    assert_eq!(config.livereload.port, 35729);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.output.unicode);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
frontend_url = "https://frontend.test/upload"

[push]
idle_timeout_secs = 60
poll_interval_ms = 250

[livereload]
enabled = false

[output]
color = "never"
unicode = false
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(
        config.frontend_url.as_deref(),
        Some("https://frontend.test/upload")
    );
    assert_eq!(config.push.idle_timeout_secs, 60);
    assert_eq!(config.push.request_timeout_secs, 10);
    assert_eq!(config.push.poll_interval(), Duration::from_millis(250));
    assert!(!config.livereload.enabled);
    assert_eq!(config.livereload.port, 35729);
    assert_eq!(config.output.color, ColorMode::Never);
    assert!(!config.output.unicode);
}

#[test]
fn test_config_empty_file_is_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_endpoints_from_config() {
    let config = Config {
        frontend_url: Some("https://frontend.test/upload".to_string()),
        ..Config::default()
    };
    let endpoints = config.endpoints();
    assert_eq!(endpoints.upload_uri(false).unwrap(), "https://frontend.test/upload");
    assert_eq!(endpoints.upload_uri(true).unwrap(), "http://localhost:3001/upload");
}

#[test]
fn test_config_load_with_warnings_reports_unknown_key_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appix.toml");
    fs::write(&path, "[push]\nidle_timeout_sec = 30\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();

    assert_eq!(config.push.idle_timeout_secs, 180);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "idle_timeout_sec");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("idle_timeout_secs"));
    assert!(warnings[0]
        .to_string()
        .contains("did you mean 'idle_timeout_secs'?"));
}

#[test]
fn test_config_invalid_value_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appix.toml");
    fs::write(&path, "[livereload]\nport = \"not a port\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("invalid config in"));
}

#[test]
fn test_layered_project_overrides_user_per_key() {
    let dir = tempdir().unwrap();
    let user = dir.path().join("user.toml");
    let project = dir.path().join("appix.toml");
    fs::write(
        &user,
        "frontend_url = \"https://user.test/upload\"\n[push]\nidle_timeout_secs = 30\nrequest_timeout_secs = 5\n",
    )
    .unwrap();
    fs::write(&project, "[push]\nidle_timeout_secs = 90\n").unwrap();

    let (config, warnings) = load_layered(Some(&user), Some(&project)).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(
        config.frontend_url.as_deref(),
        Some("https://user.test/upload")
    );
    assert_eq!(config.push.idle_timeout_secs, 90);
    assert_eq!(config.push.request_timeout_secs, 5);
}

#[test]
fn test_layered_missing_files_yield_defaults() {
    let dir = tempdir().unwrap();
    let (config, warnings) = load_layered(
        Some(&dir.path().join("nope.toml")),
        Some(&dir.path().join("appix.toml")),
    )
    .unwrap();
    assert_eq!(config, Config::default());
    assert!(warnings.is_empty());
}

#[test]
fn test_load_layered_reads_project_file_in_app_root() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("appix.toml"),
        "local_frontend_url = \"http://localhost:4000/upload\"\n",
    )
    .unwrap();

    let (config, _) = Config::load_layered(dir.path()).unwrap();
    assert_eq!(config.local_frontend_url, "http://localhost:4000/upload");
}

#[test]
fn test_env_override_frontend_urls() {
    let config = with_env_overrides(
        Config::default(),
        env(&[
            ("APPIX_FRONTEND_URL", "https://env.test/upload"),
            ("APPIX_LOCAL_FRONTEND_URL", "http://127.0.0.1:9000/upload"),
        ]),
    );
    assert_eq!(config.frontend_url.as_deref(), Some("https://env.test/upload"));
    assert_eq!(config.local_frontend_url, "http://127.0.0.1:9000/upload");
}

#[test]
fn test_env_override_livereload() {
    let config = with_env_overrides(
        Config::default(),
        env(&[("APPIX_LIVERELOAD_PORT", "40000"), ("APPIX_NO_LIVERELOAD", "1")]),
    );
    assert_eq!(config.livereload.port, 40000);
    assert!(!config.livereload.enabled);
}

#[test]
fn test_env_override_invalid_port_is_ignored() {
    let config = with_env_overrides(
        Config::default(),
        env(&[("APPIX_LIVERELOAD_PORT", "99999"), ("APPIX_NO_LIVERELOAD", "false")]),
    );
    assert_eq!(config.livereload.port, 35729);
    assert!(config.livereload.enabled);
}
