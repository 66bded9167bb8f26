use appix::application::WatchEvent;
use appix::domain::entities::PushTrigger;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct WatchHeader<'a> {
    pub app: &'a str,
    pub frontend: &'a str,
    pub livereload: Option<u16>,
}

pub fn render_watch_header(
    header: &WatchHeader<'_>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut block = CommandHeader::new(Icon::Watch, "Appix Watch");
    block.add("App", header.app);
    block.add("Frontend", header.frontend);
    block.add(
        "Live reload",
        match header.livereload {
            Some(port) => format!("ws://127.0.0.1:{port}/livereload"),
            None => "disabled".to_string(),
        },
    );
    block.add("Hint", "Press Ctrl+C to stop");
    block.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);

    match event {
        WatchEvent::WatchStarted { app } => format!(
            "{} {} Watching: {}\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            app
        ),
        WatchEvent::FileChanged { path, kind } => format!(
            "{} {} Changed: {} {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path,
            ColoredText::dim(format!("({kind})")).render(supports_color)
        ),
        WatchEvent::PushStarted { run, trigger } => {
            let what = match trigger {
                PushTrigger::Initial => "Initial push".to_string(),
                PushTrigger::Change => format!("Push {run}"),
            };
            format!(
                "{} {} {} started...\n",
                prefix,
                Icon::Progress.colored(supports_color, supports_unicode),
                what
            )
        }
        WatchEvent::PushComplete {
            run,
            files,
            bytes,
            elapsed_ms,
            ..
        } => format!(
            "{} {} Push {} complete: {} files, {} in {}\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            run,
            files,
            format_bytes(*bytes),
            format_elapsed(*elapsed_ms)
        ),
        WatchEvent::PushFailed { run, message, .. } => format!(
            "{} {} Push {} failed: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            run,
            ColoredText::error(message.as_str()).render(supports_color)
        ),
        WatchEvent::Shutdown => format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        ),
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn format_elapsed(ms: u64) -> String {
    if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{ms}ms")
    }
}
