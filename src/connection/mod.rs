//! Connection Handling Module
//!
//! This module manages individual client connections to CalcWire.
//! Each accepted socket is served by its own async task, so many
//! connections can sit in different lifecycle stages at once without a
//! thread per connection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                      (main.rs)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept()
//!                        ▼
//!           ┌────────────────────────┐
//!           │   For each client...   │
//!           └────────────┬───────────┘
//!                        │
//!                        │ spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐        │
//! │  │ Read until  │──>│ Parse and   │──>│ Write resp, │        │
//! │  │ blank line  │   │ evaluate    │   │ then close  │        │
//! │  └─────────────┘   └─────────────┘   └─────────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! One request per connection: the handler reads until the blank-line
//! header terminator, answers once, and closes the socket. A transport
//! failure at either I/O point closes the socket with no response.
//!
//! ## Example
//!
//! ```ignore
//! use calcwire::connection::{handle_connection, ConnectionStats};
//! use calcwire::commands::CommandHandler;
//! use std::sync::Arc;
//!
//! let stats = Arc::new(ConnectionStats::new());
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_connection(stream, addr, CommandHandler::new(), stats));
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
