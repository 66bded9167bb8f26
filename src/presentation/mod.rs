//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use appix::presentation::factory;
//!
//! let filter = factory::load_event_filter(&app_path)?;
//! let options = factory::watch_options(&app_path, &config, &flags);
//! let use_case = factory::create_watch_use_case(options, &config, &flags, filter);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{create_watch_use_case, load_event_filter, watch_options, WatchFlags};
