//! Connection Handler Module
//!
//! This module handles individual client connections to CalcWire.
//! Each accepted socket gets its own handler task that serves exactly
//! one request and then closes the connection.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌─────────────────────────────┐
//!    │ Read until blank line       │  (async, may suspend)
//!    └───────────┬─────────────────┘
//!                │ read error / EOF ──────> close, no response
//!                ▼
//!    ┌─────────────────────────────┐
//!    │ Parse request               │  (sync)
//!    └───────────┬─────────────────┘
//!                ▼
//!    ┌─────────────────────────────┐
//!    │ Evaluate command            │  (sync)
//!    └───────────┬─────────────────┘
//!                ▼
//!    ┌─────────────────────────────┐
//!    │ Write 200 or 400 response   │  (async, may suspend)
//!    └───────────┬─────────────────┘
//!                ▼
//! 4. Socket closed, handler task ends
//! ```
//!
//! ## Buffer Management
//!
//! Incoming data accumulates in a BytesMut buffer. TCP is a stream
//! protocol, so the header terminator may arrive split across several
//! reads; the handler keeps reading until the buffer contains the blank
//! line. Reading stops at that point, and any bytes already buffered
//! beyond the terminator form the request body.
//!
//! Parse and evaluation failures become 400 responses; transport
//! failures produce no response at all. Either way the socket is closed
//! after at most one write.

use crate::commands::CommandHandler;
use crate::protocol::{find_header_end, RequestParser, Response};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, info, trace};

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total requests answered (200 or 400)
    pub requests_served: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn request_served(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
///
/// The handler owns the socket and its read buffer exclusively; nothing
/// else touches them. It serves one request: read until the header
/// terminator, parse, evaluate, write the response, close.
pub struct ConnectionHandler {
    /// The TCP stream for this connection
    stream: BufWriter<TcpStream>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Buffer for incoming data
    buffer: BytesMut,

    /// The request parser
    parser: RequestParser,

    /// The command evaluator
    command_handler: CommandHandler,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The TCP stream for this connection
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command evaluator
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            parser: RequestParser::new(),
            command_handler,
            stats,
        }
    }

    /// Serves the connection's single request to completion.
    ///
    /// Dropping the handler at the end closes the socket; that happens
    /// exactly once, whether the request succeeded, failed to parse, or
    /// the transport broke mid-way.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.serve_request().await;

        match &result {
            Ok(()) => debug!(client = %self.addr, "Request served, closing"),
            Err(ConnectionError::ClientDisconnected) => {
                debug!(client = %self.addr, "Client disconnected before completing a request")
            }
            Err(e) => debug!(client = %self.addr, error = %e, "Connection ended with error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read -> parse -> evaluate -> write sequence.
    async fn serve_request(&mut self) -> Result<(), ConnectionError> {
        // Reading: a transport failure here aborts with no response.
        self.read_request().await?;

        // Parsing and evaluating run synchronously; failures become a
        // 400 response rather than propagating.
        let response = match self.parser.parse(&self.buffer) {
            Ok(command) => {
                trace!(client = %self.addr, command = %command, "Parsed command");
                match self.command_handler.execute(&command) {
                    Ok(result) => Response::ok(result),
                    Err(e) => Response::bad_request(e.to_string()),
                }
            }
            Err(e) => Response::bad_request(e.to_string()),
        };

        // Writing: the socket closes right after, success or not.
        self.write_response(&response).await?;
        self.stats.request_served();
        Ok(())
    }

    /// Reads from the socket until the buffer contains the blank-line
    /// header terminator.
    ///
    /// Reading stops at the first read after which the terminator is
    /// present; body bytes only count if they were buffered by then.
    async fn read_request(&mut self) -> Result<(), ConnectionError> {
        while find_header_end(&self.buffer).is_none() {
            let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

            if n == 0 {
                // EOF before the terminator: no response is owed.
                return Err(ConnectionError::ClientDisconnected);
            }

            self.stats.bytes_read(n);
            trace!(client = %self.addr, bytes = n, buffered = self.buffer.len(), "Read data");
        }

        Ok(())
    }

    /// Writes the response to the client.
    async fn write_response(&mut self, response: &Response) -> Result<(), ConnectionError> {
        let bytes = response.serialize();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        trace!(client = %self.addr, bytes = bytes.len(), status = %response, "Sent response");
        Ok(())
    }
}

/// Errors that can occur while handling a connection.
///
/// These are all transport-level: parse and evaluation failures never
/// surface here, they are answered with a 400 response instead.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Client disconnected before sending a complete request
    #[error("Client disconnected")]
    ClientDisconnected,
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler and
/// runs it to completion. Transport errors terminate the connection
/// silently; nothing propagates to the caller.
///
/// # Arguments
///
/// * `stream` - The TCP stream for this connection
/// * `addr` - The client's socket address
/// * `command_handler` - The command evaluator
/// * `stats` - Shared connection statistics
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        match e {
            ConnectionError::ClientDisconnected => {}
            ConnectionError::IoError(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}
