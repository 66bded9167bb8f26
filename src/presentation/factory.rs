//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::{WatchOptions, WatchUseCase};
use crate::config::Config;
use crate::domain::policies::EventFilter;
use crate::domain::ports::{NoopReloadNotifier, ReloadNotifier};
use crate::domain::value_objects::IgnorePatterns;
use crate::error::AppixResult;
use crate::infrastructure::{HttpPushPipeline, LiveReloadServer};

/// Watch-related command line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchFlags {
    pub no_browser: bool,
    pub local: bool,
    pub timeout_secs: Option<u64>,
    pub no_livereload: bool,
    pub verbose: bool,
}

/// Build the event filter for an app: built-in rules plus `.appixignore`.
pub fn load_event_filter(app_path: &Path) -> AppixResult<EventFilter> {
    let patterns = IgnorePatterns::load(app_path)?;
    if !patterns.is_empty() {
        log::debug!("loaded {} ignore patterns", patterns.pattern_count());
    }
    Ok(EventFilter::new(patterns))
}

/// Merge config and flags into watch options (flags win).
pub fn watch_options(app_path: &Path, config: &Config, flags: &WatchFlags) -> WatchOptions {
    let request_timeout = flags
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.push.request_timeout());

    WatchOptions::new(app_path.to_path_buf())
        .with_no_browser(flags.no_browser)
        .with_local_frontend(flags.local)
        .with_verbose(flags.verbose)
        .with_idle_timeout(config.push.idle_timeout())
        .with_request_timeout(request_timeout)
}

/// Reload notifier for the session: the LiveReload server unless disabled.
pub fn create_reload_notifier(config: &Config, flags: &WatchFlags) -> Arc<dyn ReloadNotifier> {
    if flags.no_livereload || !config.livereload.enabled {
        Arc::new(NoopReloadNotifier)
    } else {
        Arc::new(LiveReloadServer::new(config.livereload.port))
    }
}

/// Create a watch use case with all dependencies wired up
pub fn create_watch_use_case(
    options: WatchOptions,
    config: &Config,
    flags: &WatchFlags,
    filter: EventFilter,
) -> WatchUseCase {
    let pipeline = HttpPushPipeline::new(config.endpoints(), filter.clone())
        .with_poll_interval(config.push.poll_interval());
    let notifier = create_reload_notifier(config, flags);

    WatchUseCase::new(options, filter, Arc::new(pipeline), notifier)
}
