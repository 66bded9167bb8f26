//! LiveReload protocol messages

use serde::{Deserialize, Serialize};

/// Identifier of LiveReload protocol version 7
pub const PROTOCOL_7: &str = "http://livereload.com/protocols/official-7";

const SERVER_NAME: &str = "appix";

/// Commands a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum ClientCommand {
    Hello {
        #[serde(default)]
        protocols: Vec<String>,
    },
    Info {},
    #[serde(other)]
    Unknown,
}

impl ClientCommand {
    /// True for a hello that offers a protocol this server speaks.
    pub fn accepts_protocol_7(&self) -> bool {
        matches!(self, ClientCommand::Hello { protocols } if protocols.iter().any(|p| p == PROTOCOL_7))
    }
}

#[derive(Serialize)]
struct Hello<'a> {
    command: &'a str,
    protocols: [&'a str; 1],
    #[serde(rename = "serverName")]
    server_name: &'a str,
}

#[derive(Serialize)]
struct Reload<'a> {
    command: &'a str,
    path: &'a str,
    #[serde(rename = "liveCSS")]
    live_css: bool,
}

/// Parse a text frame from a client. `None` when it is not a command.
pub fn parse_command(text: &str) -> Option<ClientCommand> {
    serde_json::from_str(text).ok()
}

/// Server reply to a client hello.
pub fn hello_reply() -> String {
    serde_json::to_string(&Hello {
        command: "hello",
        protocols: [PROTOCOL_7],
        server_name: SERVER_NAME,
    })
    .unwrap_or_default()
}

/// Broadcast asking clients to reload the whole page.
pub fn reload_message() -> String {
    serde_json::to_string(&Reload {
        command: "reload",
        path: "/",
        live_css: true,
    })
    .unwrap_or_default()
}
