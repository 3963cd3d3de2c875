//! HTTP-Style Request Parser
//!
//! This module turns the raw bytes a connection has read off the socket
//! into a structured [`Command`], or a [`ParseError`] describing why the
//! request was rejected.
//!
//! ## How Parsing Works
//!
//! The connection accumulates bytes into a buffer and calls
//! [`find_header_end`] after each read to check whether the blank-line
//! header terminator (`\r\n\r\n`) has arrived. Once it has, the complete
//! buffer is handed to [`RequestParser::parse`] exactly once:
//!
//! 1. The first line's first whitespace token is the request method.
//!    Anything other than `GET` or `POST` is rejected.
//! 2. All remaining header lines are discarded without validation.
//! 3. Whatever bytes were buffered beyond the terminator form the body,
//!    `<operation> <p1>,<p2>,...,<pn>`.
//! 4. The body splits on its first space into operation name and
//!    parameter segment; the parameter segment splits on commas.
//!
//! Numeric parsing is deliberately permissive: a malformed parameter
//! token converts to `0` rather than failing the request. Only a missing
//! operation name or a missing parameter segment rejects the request.

use crate::protocol::types::Command;
use thiserror::Error;

/// Errors that can occur while parsing a request.
///
/// The `Display` text of each variant is written verbatim as the body of
/// the 400 response, so the exact wording is part of the wire contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The request method was neither GET nor POST
    #[error("Wrong request type!\r\nSupported requests: POST, GET")]
    WrongRequestType,

    /// The body was missing its operation name or parameter list
    #[error("Not enough arguments.\r\nExample:\r\nfibonacci 10")]
    NotEnoughArguments,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// The blank-line sequence that terminates the header block.
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Searches `buf` for the header-terminating blank line.
///
/// Returns the index of the first byte *after* the terminator, i.e. the
/// start of the request body, or `None` if the terminator has not arrived
/// yet and the connection must keep reading.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
        .map(|pos| pos + HEADER_TERMINATOR.len())
}

/// Parses complete requests into [`Command`]s.
///
/// # Example
///
/// ```
/// use calcwire::protocol::parser::RequestParser;
///
/// let parser = RequestParser::new();
/// let request = b"GET / HTTP/1.0\r\n\r\nfactorial 5";
/// let command = parser.parse(request).unwrap();
/// assert_eq!(command.name, "factorial");
/// assert_eq!(command.params, vec![5.0]);
/// ```
#[derive(Debug, Default)]
pub struct RequestParser;

impl RequestParser {
    /// Creates a new parser instance.
    pub fn new() -> Self {
        Self
    }

    /// Parses a complete request (headers plus any buffered body bytes).
    ///
    /// The caller must have already confirmed via [`find_header_end`]
    /// that `buf` contains the full header block; bytes past the
    /// terminator are treated as the body.
    pub fn parse(&self, buf: &[u8]) -> ParseResult<Command> {
        let body_start = find_header_end(buf).unwrap_or(buf.len());
        let (head, body) = buf.split_at(body_start);

        self.check_method(head)?;
        self.parse_body(body)
    }

    /// Validates the method token of the request line.
    fn check_method(&self, head: &[u8]) -> ParseResult<()> {
        let first_line = match head.windows(2).position(|w| w == b"\r\n") {
            Some(pos) => &head[..pos],
            None => head,
        };

        let line = String::from_utf8_lossy(first_line);
        let method = line.split_whitespace().next().unwrap_or("");

        if method == "GET" || method == "POST" {
            Ok(())
        } else {
            Err(ParseError::WrongRequestType)
        }
    }

    /// Splits the body into an operation name and its parameters.
    fn parse_body(&self, body: &[u8]) -> ParseResult<Command> {
        let body = String::from_utf8_lossy(body);

        // No space means no parameter segment at all.
        let (name, raw_params) = body
            .split_once(' ')
            .ok_or(ParseError::NotEnoughArguments)?;

        if name.is_empty() {
            return Err(ParseError::NotEnoughArguments);
        }

        // Permissive numeric conversion: malformed tokens become 0.
        let params: Vec<f64> = raw_params
            .split(',')
            .map(|token| token.trim_end_matches(['\r', '\n']))
            .map(|token| token.parse().unwrap_or(0.0))
            .collect();

        if params.is_empty() {
            return Err(ParseError::NotEnoughArguments);
        }

        Ok(Command::new(name, params))
    }
}
