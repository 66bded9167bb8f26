//! Live reload side-channel
//!
//! A minimal LiveReload (protocol 7) WebSocket server. Browser pages running
//! the LiveReload client reload when a push finishes.

mod protocol;
mod server;

pub use protocol::{hello_reply, parse_command, reload_message, ClientCommand, PROTOCOL_7};
pub use server::{LiveReloadServer, DEFAULT_LIVERELOAD_PORT};
