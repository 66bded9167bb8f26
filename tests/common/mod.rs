//! Common test utilities for Appix integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated app folder and config home, plus helpers to run the CLI
//! - `FakeFrontend`: A canned HTTP frontend for push pipeline tests

#![allow(dead_code)]

pub mod env;
pub mod frontend;

pub use env::*;
pub use frontend::*;
