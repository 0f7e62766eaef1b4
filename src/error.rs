//! Unified error type.

use std::fmt;

/// The error type returned by vet's fallible operations.
///
/// Per-request validation failures are not `Error`s — they are answered
/// directly with a `400` [`Response`](crate::Response) and never escalate.
/// This type surfaces the two things that can go wrong *before* a request
/// exists: binding or accepting a connection, and compiling a schema at
/// route-registration time.
#[derive(Debug)]
pub enum Error {
    /// Binding to a port or accepting a connection failed.
    Io(std::io::Error),
    /// A schema handed to [`JsonSchema::new`](crate::JsonSchema::new) does
    /// not compile (malformed JSON Schema, unresolvable reference, …).
    Schema(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Schema(msg) => write!(f, "schema: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Schema(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
