//! Request and Response Types
//!
//! This module defines the two value types that cross the wire boundary:
//! the parsed [`Command`] extracted from a request body, and the
//! [`Response`] written back to the client.
//!
//! ## Response Format
//!
//! Responses are minimal HTTP/1.0: a status line, a content-type header,
//! a content-length header, a blank line, and the body followed by CRLF.
//! The content length counts the body bytes plus the two bytes of that
//! trailing CRLF.
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/html; charset=UTF-8\r\n
//! Content-Length: 5\r\n
//! \r\n
//! 120\r\n
//! ```

use std::fmt;

/// The CRLF line terminator used in the wire format
pub const CRLF: &[u8] = b"\r\n";

/// A parsed command: an operation name plus its numeric parameters.
///
/// Immutable once constructed; the connection parses exactly one of these
/// per request.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// The operation name, e.g. `"factorial"`
    pub name: String,
    /// The parameters, in request order
    pub params: Vec<f64>,
}

impl Command {
    /// Creates a new command.
    pub fn new(name: impl Into<String>, params: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// HTTP status classes the service can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `HTTP/1.0 200 OK`
    Ok,
    /// `HTTP/1.0 400 Bad Request`
    BadRequest,
}

impl Status {
    /// Returns the status line for this status, without terminator.
    pub fn line(&self) -> &'static str {
        match self {
            Status::Ok => "HTTP/1.0 200 OK",
            Status::BadRequest => "HTTP/1.0 400 Bad Request",
        }
    }
}

/// A response ready to be serialized onto the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status class of the response
    pub status: Status,
    /// Response body, without the trailing CRLF
    pub body: String,
}

impl Response {
    /// Creates a 200 response carrying a computed result.
    ///
    /// # Example
    /// ```
    /// use calcwire::protocol::types::Response;
    /// let ok = Response::ok(120.0);
    /// assert_eq!(ok.body, "120");
    /// ```
    pub fn ok(result: f64) -> Self {
        Self {
            status: Status::Ok,
            body: result.to_string(),
        }
    }

    /// Creates a 400 response carrying an error message.
    ///
    /// # Example
    /// ```
    /// use calcwire::protocol::types::Response;
    /// let err = Response::bad_request("Wrong parameters");
    /// ```
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: Status::BadRequest,
            body: message.into(),
        }
    }

    /// Serializes the response to bytes for sending over the wire.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the response into an existing buffer.
    ///
    /// This is more efficient than `serialize()` when reusing a buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.status.line().as_bytes());
        buf.extend_from_slice(CRLF);
        buf.extend_from_slice(b"Content-Type: text/html; charset=UTF-8");
        buf.extend_from_slice(CRLF);
        // Content length counts the body plus its trailing CRLF.
        buf.extend_from_slice(b"Content-Length: ");
        buf.extend_from_slice((self.body.len() + 2).to_string().as_bytes());
        buf.extend_from_slice(CRLF);
        buf.extend_from_slice(CRLF);
        buf.extend_from_slice(self.body.as_bytes());
        buf.extend_from_slice(CRLF);
    }

    /// Returns true if this is an error response.
    pub fn is_error(&self) -> bool {
        self.status == Status::BadRequest
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.status.line(), self.body.len())
    }
}
