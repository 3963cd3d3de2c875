//! Command Evaluation Module
//!
//! This module implements the evaluation layer for CalcWire. It receives
//! parsed commands, dispatches them to the matching numeric operation,
//! and returns either a scalar result or an evaluation error.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ Request Parser  │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Validate     │
//! │  - Compute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Response     │  (protocol module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Operations
//!
//! - `factorial`, `fibonacci`
//! - `cos`, `sin`, `tan`, `sqrt`, `pow`
//! - `abs` (arithmetic mean - see the handler docs)

pub mod handler;

// Re-export the main command handler
pub use handler::{CommandHandler, EvalError};
