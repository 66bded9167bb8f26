//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppixError, AppixResult};

use super::types::Config;

/// Project config file name, at the root of the watched app
pub const PROJECT_CONFIG_FILE: &str = "appix.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AppixResult<(Config, Vec<ConfigWarning>)> {
    let (table, warnings) = read_table(path)?;
    let config = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| invalid(path, e))?;
    Ok((config, warnings))
}

/// Merge the user config and the project config (project wins per key).
/// Missing files are skipped.
pub fn load_layered(
    user: Option<&Path>,
    project: Option<&Path>,
) -> AppixResult<(Config, Vec<ConfigWarning>)> {
    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();
    let mut last_file = None;

    for path in [user, project].into_iter().flatten() {
        if !path.exists() {
            continue;
        }
        let (table, file_warnings) = read_table(path)?;
        log::debug!("loaded config {}", path.display());
        merge_tables(&mut merged, table);
        warnings.extend(file_warnings);
        last_file = Some(path);
    }

    let config = toml::Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| invalid(last_file.unwrap_or(Path::new("config")), e))?;
    Ok((config, warnings))
}

/// Parse one file into a table, validating it against [`Config`].
fn read_table(path: &Path) -> AppixResult<(toml::Table, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let _: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e))?;

    let table: toml::Table = toml::from_str(&content).map_err(|e| invalid(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((table, warnings))
}

fn invalid(path: &Path, e: impl std::fmt::Display) -> AppixError {
    AppixError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply environment variable overrides (APPIX_* prefix)
pub fn with_env_overrides<F>(mut config: Config, var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // APPIX_FRONTEND_URL
    if let Some(url) = var("APPIX_FRONTEND_URL").filter(|v| !v.trim().is_empty()) {
        config.frontend_url = Some(url);
    }

    // APPIX_LOCAL_FRONTEND_URL
    if let Some(url) = var("APPIX_LOCAL_FRONTEND_URL").filter(|v| !v.trim().is_empty()) {
        config.local_frontend_url = url;
    }

    // APPIX_LIVERELOAD_PORT
    if let Some(port) = var("APPIX_LIVERELOAD_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.livereload.port = port,
            Err(_) => log::warn!("ignoring invalid APPIX_LIVERELOAD_PORT value '{port}'"),
        }
    }

    // APPIX_NO_LIVERELOAD
    if let Some(val) = var("APPIX_NO_LIVERELOAD") {
        if val.to_lowercase() != "false" && val != "0" {
            config.livereload.enabled = false;
        }
    }

    config
}

/// `~/.config/appix/config.toml`, honoring `XDG_CONFIG_HOME`.
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|dir| dir.join("appix/config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "frontend_url",
        "local_frontend_url",
        "push",
        "idle_timeout_secs",
        "request_timeout_secs",
        "poll_interval_ms",
        "livereload",
        "enabled",
        "port",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
