//! LiveReload WebSocket server

use std::io;
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tungstenite::{Message, WebSocket};

use crate::domain::ports::ReloadNotifier;
use crate::error::{AppixError, AppixResult};

use super::protocol::{hello_reply, parse_command, reload_message, ClientCommand};

/// Port LiveReload browser extensions connect to
pub const DEFAULT_LIVERELOAD_PORT: u16 = 35729;

/// How long a client thread blocks on a read before checking for broadcasts
const CLIENT_POLL: Duration = Duration::from_millis(50);

type Clients = Arc<Mutex<Vec<Sender<String>>>>;

/// LiveReload server on `127.0.0.1:<port>`.
pub struct LiveReloadServer {
    port: u16,
    addr: OnceLock<SocketAddr>,
    clients: Clients,
}

impl LiveReloadServer {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            addr: OnceLock::new(),
            clients: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Bound address once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.addr.get().copied()
    }

    /// Number of connected clients
    pub fn client_count(&self) -> usize {
        self.clients.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl ReloadNotifier for LiveReloadServer {
    fn start(&self) -> AppixResult<()> {
        if self.addr.get().is_some() {
            return Ok(());
        }

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, self.port)).map_err(|source| {
            AppixError::LiveReload {
                port: self.port,
                source,
            }
        })?;
        let addr = listener.local_addr()?;
        let _ = self.addr.set(addr);

        let clients = self.clients.clone();
        thread::Builder::new()
            .name("appix-livereload".to_string())
            .spawn(move || accept_loop(listener, clients))?;

        log::info!("Live reload listening on ws://{addr}/livereload");
        Ok(())
    }

    fn send_reload(&self) {
        let message = reload_message();
        let Ok(mut clients) = self.clients.lock() else {
            return;
        };
        clients.retain(|client| client.send(message.clone()).is_ok());
        log::debug!("reload sent to {} client(s)", clients.len());
    }
}

fn accept_loop(listener: TcpListener, clients: Clients) {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                log::debug!("live reload accept failed: {e}");
                continue;
            }
        };

        let (tx, rx) = unbounded();
        match clients.lock() {
            Ok(mut clients) => clients.push(tx),
            Err(_) => return,
        }

        let spawned = thread::Builder::new()
            .name("appix-livereload-client".to_string())
            .spawn(move || {
                if let Err(e) = serve_client(stream, rx) {
                    log::debug!("live reload client disconnected: {e}");
                }
            });
        if let Err(e) = spawned {
            log::warn!("failed to spawn live reload client thread: {e}");
        }
    }
}

fn serve_client(stream: TcpStream, outgoing: Receiver<String>) -> Result<(), tungstenite::Error> {
    let peer = stream.peer_addr().ok();
    let mut socket = tungstenite::accept(stream).map_err(|e| match e {
        tungstenite::HandshakeError::Failure(e) => e,
        tungstenite::HandshakeError::Interrupted(_) => {
            tungstenite::Error::Io(io::Error::other("live reload handshake interrupted"))
        }
    })?;
    socket.get_ref().set_read_timeout(Some(CLIENT_POLL))?;
    log::debug!("live reload client connected: {peer:?}");

    loop {
        match socket.read() {
            Ok(message @ Message::Text(_)) => handle_text(&mut socket, message.to_text()?)?,
            Ok(Message::Close(_)) => return Ok(()),
            Ok(_) => {}
            Err(tungstenite::Error::Io(e))
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) => {}
            Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e),
        }

        for message in outgoing.try_iter() {
            socket.send(Message::text(message))?;
        }
    }
}

fn handle_text(socket: &mut WebSocket<TcpStream>, text: &str) -> Result<(), tungstenite::Error> {
    match parse_command(text) {
        Some(command @ ClientCommand::Hello { .. }) => {
            if !command.accepts_protocol_7() {
                log::debug!("live reload client did not offer protocol 7");
            }
            socket.send(Message::text(hello_reply()))
        }
        Some(ClientCommand::Info {}) | Some(ClientCommand::Unknown) => Ok(()),
        None => {
            log::trace!("ignoring live reload frame: {text}");
            Ok(())
        }
    }
}
