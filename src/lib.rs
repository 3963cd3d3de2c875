//! # CalcWire - A Minimal Asynchronous HTTP-Style Calculator Service
//!
//! CalcWire is a small TCP service that reads a single HTTP-style request
//! per connection, interprets the body as a named numeric operation with
//! comma-separated parameters, and answers with a minimal HTTP/1.0
//! response before closing the socket.
//!
//! ## Features
//!
//! - **Single-Request Connections**: one request, one response, close
//! - **Async I/O**: built on Tokio; many connections in flight on one
//!   cooperative execution context, no thread per connection
//! - **Permissive Parsing**: malformed numeric parameters become `0`
//! - **Exact Wire Format**: fixed status lines, `Content-Length` counts
//!   the body plus its trailing CRLF
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          CalcWire                            │
//! │                                                              │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────┐      │
//! │  │ TCP Server  │───>│ Connection   │───>│  Command    │      │
//! │  │ (Listener)  │    │  Handler     │    │  Handler    │      │
//! │  └─────────────┘    └──────┬───────┘    └─────────────┘      │
//! │                            │                                 │
//! │                            ▼                                 │
//! │                   ┌─────────────────┐                        │
//! │                   │ Request Parser  │                        │
//! │                   │ Response Writer │                        │
//! │                   └─────────────────┘                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use calcwire::commands::CommandHandler;
//! use calcwire::connection::{handle_connection, ConnectionStats};
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let stats = Arc::new(ConnectionStats::new());
//!     let listener = TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let stats = Arc::clone(&stats);
//!         tokio::spawn(handle_connection(stream, addr, CommandHandler::new(), stats));
//!     }
//! }
//! ```
//!
//! Try it with curl:
//!
//! ```text
//! $ curl -X GET -d "factorial 5" 127.0.0.1:8080
//! 120
//! $ curl -X POST -d "abs 5,87,2,5,1,4,67,6" 127.0.0.1:8080
//! 22.125
//! ```
//!
//! ## Supported Operations
//!
//! - `factorial n` - n! for n >= 0
//! - `fibonacci n` - iterative Fibonacci (1 for n < 3)
//! - `cos x`, `sin x`, `tan x` - trigonometry in radians
//! - `sqrt x` - square root (NaN for negative input)
//! - `pow x,y` - x to the power y
//! - `abs p1,p2,...` - arithmetic mean (see [`commands`] for why)
//!
//! ## Module Overview
//!
//! - [`protocol`]: request parser, command/response types, wire format
//! - [`commands`]: the pure command evaluator
//! - [`connection`]: per-connection lifecycle management
//!
//! ## Design Highlights
//!
//! ### One Execution Context
//!
//! The server runs on a current-thread Tokio runtime. Connection tasks
//! suspend only at their two I/O points (the delimited read and the
//! final write); parsing, evaluation, and serialization run to
//! completion without yielding, so no other connection can observe a
//! request mid-stage.
//!
//! ### No Shared Mutable State
//!
//! Each connection exclusively owns its socket and buffer. The only
//! cross-connection data is a set of relaxed atomic counters, so the
//! core needs no locks.

pub mod commands;
pub mod connection;
pub mod protocol;

// Re-export commonly used types for convenience
pub use commands::{CommandHandler, EvalError};
pub use connection::{handle_connection, ConnectionError, ConnectionStats};
pub use protocol::{Command, ParseError, RequestParser, Response, Status};

/// The default port CalcWire listens on
pub const DEFAULT_PORT: u16 = 8080;

/// The default host CalcWire binds to (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Version of CalcWire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
