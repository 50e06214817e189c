//! Unified error types for the frontend control plane.
//!
//! A single `Error` enum that every subsystem converts into, so a property
//! write that fails deep inside the RPC layer reaches the caller unchanged.

use core::fmt;

use crate::prop::PropertyPath;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A channel, direction, slot or frontend name is out of range.
    InvalidArgument(String),
    /// A remote call was attempted before a session token was supplied.
    NoSessionToken,
    /// The transport or the firmware failed the call.
    RemoteCall(RemoteCallFailure),
    /// The property tree rejected the access.
    Property(PropertyError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::NoSessionToken => write!(f, "no RPC session token supplied"),
            Self::RemoteCall(e) => write!(f, "remote call: {e}"),
            Self::Property(e) => write!(f, "property: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Remote call failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallFailure {
    /// The transport returned an I/O error.
    Transport(String),
    /// The peer closed the link mid-call.
    LinkClosed,
    /// The firmware executed the call and reported an error.
    Remote { method: String, message: String },
    /// A frame could not be encoded or decoded.
    Codec(String),
    /// The reply did not belong to the request in flight.
    Protocol(String),
}

impl fmt::Display for RemoteCallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport: {msg}"),
            Self::LinkClosed => write!(f, "link closed"),
            Self::Remote { method, message } => write!(f, "{method} failed: {message}"),
            Self::Codec(msg) => write!(f, "codec: {msg}"),
            Self::Protocol(msg) => write!(f, "protocol: {msg}"),
        }
    }
}

impl From<RemoteCallFailure> for Error {
    fn from(e: RemoteCallFailure) -> Self {
        Self::RemoteCall(e)
    }
}

impl From<postcard::Error> for RemoteCallFailure {
    fn from(e: postcard::Error) -> Self {
        Self::Codec(e.to_string())
    }
}

impl From<postcard::Error> for Error {
    fn from(e: postcard::Error) -> Self {
        Self::RemoteCall(e.into())
    }
}

// ---------------------------------------------------------------------------
// Property tree errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// No node exists at this path.
    NotFound(PropertyPath),
    /// A node exists at this path but holds a different value type.
    TypeMismatch(PropertyPath),
    /// The node has neither a stored value nor a publisher.
    Empty(PropertyPath),
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(p) => write!(f, "no node at `{p}`"),
            Self::TypeMismatch(p) => write!(f, "node at `{p}` holds another type"),
            Self::Empty(p) => write!(f, "node at `{p}` has no value"),
        }
    }
}

impl From<PropertyError> for Error {
    fn from(e: PropertyError) -> Self {
        Self::Property(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
