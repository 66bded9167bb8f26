//! Appix CLI - watch an app folder and push it on every change
//!
//! Usage: appix [--json] [-v...] [--color <WHEN>] watch [APP_PATH] [OPTIONS]

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use appix::presentation::{Cli, Commands, WatchFlags};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// `info` by default for this crate; `-v` debug, `-vv` trace. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_module("appix", level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Watch {
            app_path,
            no_browser,
            local,
            timeout,
            no_livereload,
        } => {
            let flags = WatchFlags {
                no_browser,
                local,
                timeout_secs: timeout,
                no_livereload,
                verbose: cli.verbose > 0,
            };
            commands::watch::cmd_watch(&app_path, flags, cli.json, cli.color)
        }
    }
}
