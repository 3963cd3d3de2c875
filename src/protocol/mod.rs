//! Wire Protocol Implementation
//!
//! This module implements CalcWire's minimal HTTP-style wire format:
//!
//! - [`parser`]: turns raw request bytes into a [`Command`]
//! - [`types`]: the [`Command`] and [`Response`] value types and the
//!   exact HTTP/1.0 response serialization
//!
//! Requests look like an HTTP request line followed by headers, a blank
//! line, and a `<operation> <p1>,<p2>,...` body. Responses are a status
//! line, two headers, a blank line, and the body.

pub mod parser;
pub mod types;

// Re-export commonly used types
pub use parser::{find_header_end, ParseError, RequestParser};
pub use types::{Command, Response, Status};
