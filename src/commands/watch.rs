use std::path::Path;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, unbounded};

use appix::application::{resolve_app_path, WatchEvent};
use appix::config::Config;
use appix::infrastructure::NotifyEventSource;
use appix::presentation::{factory, ColorWhen, WatchFlags};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::watch::{render_watch_event, render_watch_header, WatchHeader};

pub fn cmd_watch(
    app_path: &Path,
    flags: WatchFlags,
    json: bool,
    color: Option<ColorWhen>,
) -> Result<()> {
    let app_path = resolve_app_path(app_path)?;

    // Load configuration (user + project file, then APPIX_* env)
    let (config, warnings) = Config::load_layered(&app_path)?;
    let config = config.with_env_overrides();
    let ui = UiContext::new(json, color, &config);
    for warning in &warnings {
        eprintln!(
            "{} {}",
            Icon::Warning.colored(ui.color, ui.unicode),
            ColoredText::warning(warning.to_string()).render(ui.color)
        );
    }

    let filter = factory::load_event_filter(&app_path)?;
    let options = factory::watch_options(&app_path, &config, &flags);
    let use_case = factory::create_watch_use_case(options, &config, &flags, filter);

    // Change notifications start queueing now and are handled after the initial push
    let (changes_tx, changes_rx) = unbounded();
    let source = NotifyEventSource::start(&app_path, changes_tx)?;

    // Set up Ctrl+C handler
    let (shutdown_tx, shutdown_rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .context("failed to set Ctrl+C handler")?;

    if !json {
        let app = app_path.display().to_string();
        let endpoints = config.endpoints();
        let header = WatchHeader {
            app: &app,
            frontend: endpoints
                .upload_uri(flags.local)
                .unwrap_or("(not configured)"),
            livereload: (config.livereload.enabled && !flags.no_livereload)
                .then_some(config.livereload.port),
        };
        print!("{}", render_watch_header(&header, ui.color, ui.unicode));
    }

    // Start watching
    use_case.start(changes_rx, shutdown_rx, |event| {
        if json {
            println!("{}", event.to_json());
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = render_watch_event(&timestamp, &event, ui.color, ui.unicode);
        match event {
            WatchEvent::PushFailed { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    })?;

    drop(source);
    Ok(())
}
