//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose) are inherited by all subcommands
//! - `watch --noBrowser` keeps the historical camel-case spelling; `--no-browser`
//!   is accepted as an alias

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ColorMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// Appix - watch an app folder and push it to the frontend on every change
#[derive(Parser, Debug)]
#[command(name = "appix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output watch events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Push the app, then push again whenever files change
    Watch {
        /// Path to the app folder
        #[arg(default_value = ".")]
        app_path: PathBuf,

        /// Do not open the app in a browser after the initial push
        #[arg(long = "noBrowser", alias = "no-browser")]
        no_browser: bool,

        /// Push to the local frontend
        #[arg(long)]
        local: bool,

        /// Timeout of each HTTP request, in seconds [default: 10]
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,

        /// Do not start the live reload server
        #[arg(long)]
        no_livereload: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["appix"]).is_err());
    }

    #[test]
    fn test_cli_parse_watch_defaults() {
        let cli = Cli::try_parse_from(["appix", "watch"]).unwrap();
        let Commands::Watch {
            app_path,
            no_browser,
            local,
            timeout,
            no_livereload,
        } = cli.command;
        assert_eq!(app_path, PathBuf::from("."));
        assert!(!no_browser);
        assert!(!local);
        assert_eq!(timeout, None);
        assert!(!no_livereload);
    }

    #[test]
    fn test_cli_parse_watch_all_flags() {
        let cli = Cli::try_parse_from([
            "appix",
            "watch",
            "my-app",
            "--noBrowser",
            "--local",
            "--timeout",
            "30",
            "--no-livereload",
        ])
        .unwrap();
        let Commands::Watch {
            app_path,
            no_browser,
            local,
            timeout,
            no_livereload,
        } = cli.command;
        assert_eq!(app_path, PathBuf::from("my-app"));
        assert!(no_browser);
        assert!(local);
        assert_eq!(timeout, Some(30));
        assert!(no_livereload);
    }

    #[test]
    fn test_cli_no_browser_kebab_alias() {
        let cli = Cli::try_parse_from(["appix", "watch", "--no-browser"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Watch {
                no_browser: true,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["appix", "watch", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_cli_json_flag() {
        let cli = Cli::try_parse_from(["appix", "--json", "watch"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_cli_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["appix", "watch", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["appix", "-vv", "watch"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_color_flag() {
        let cli = Cli::try_parse_from(["appix", "--color", "never", "watch"]).unwrap();
        assert!(matches!(cli.color, Some(ColorWhen::Never)));
        assert_eq!(ColorMode::from(ColorWhen::Never), ColorMode::Never);
    }
}
