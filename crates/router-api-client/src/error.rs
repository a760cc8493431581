//! Router API client errors
//!
//! Every public operation fails with an [`OperationError`]. Its display text is
//! the fixed, operation-level message a UI shows to the user, while the real
//! cause stays reachable through [`std::error::Error::source`].

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// The logical operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /routers`
    FetchRouters,
    /// `POST /routers`
    CreateRouter,
    /// `POST /routers/connection`
    ConnectRouters,
    /// `PATCH /routers/configure`
    ConfigureRouter,
    /// `PATCH /ports/configure`
    ConfigurePort,
    /// `GET /routers/connections`
    FetchRouterConnections,
    /// `GET /routers/connections?ip=...`
    FetchConnectionsByRouter,
    /// `POST /routers/connect`
    AttachRouter,
    /// `POST /ping`
    Ping,
    /// `POST /packet`
    SendPacket,
}

impl Operation {
    /// Fixed user-facing failure message for this operation.
    ///
    /// Port configuration shares the router configuration message.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::FetchRouters => "Failed to fetch routers",
            Operation::CreateRouter => "Failed to create router",
            Operation::ConnectRouters => "Failed to connect router",
            Operation::ConfigureRouter | Operation::ConfigurePort => "Failed to configure router",
            Operation::FetchRouterConnections | Operation::FetchConnectionsByRouter => {
                "Failed to fetch router connections"
            }
            Operation::AttachRouter => "Failed to attach router",
            Operation::Ping => "Failed to ping address",
            Operation::SendPacket => "Failed to send packet",
        }
    }

    /// Short machine-friendly name, used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Operation::FetchRouters => "fetch_routers",
            Operation::CreateRouter => "create_router",
            Operation::ConnectRouters => "connect_routers",
            Operation::ConfigureRouter => "configure_router",
            Operation::ConfigurePort => "configure_port",
            Operation::FetchRouterConnections => "fetch_router_connections",
            Operation::FetchConnectionsByRouter => "fetch_connections_by_router",
            Operation::AttachRouter => "attach_router",
            Operation::Ping => "ping",
            Operation::SendPacket => "send_packet",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single request failed
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, I/O or protocol failure before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {body}")]
    Status {
        /// Response status
        status: StatusCode,
        /// Response body, as text
        body: String,
    },

    /// Response body did not match the expected schema
    #[error("error decoding response body: {source} - Response (first 500 chars): {body}")]
    Decode {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// First 500 characters of the offending body
        body: String,
    },
}

impl TransportError {
    /// Status code of the failed response, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Http(e) => e.status(),
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Decode { .. } => None,
        }
    }
}

/// A failed client operation.
///
/// Displays as the operation's fixed message; the transport cause is chained.
#[derive(Debug, Error)]
#[error("{}", .operation.failure_message())]
pub struct OperationError {
    operation: Operation,
    #[source]
    source: TransportError,
}

impl OperationError {
    /// Wrap a transport failure for the given operation
    pub fn new(operation: Operation, source: TransportError) -> Self {
        Self { operation, source }
    }

    /// Which operation failed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The underlying transport failure
    pub fn cause(&self) -> &TransportError {
        &self.source
    }

    /// Consume the error, keeping only the cause
    pub fn into_cause(self) -> TransportError {
        self.source
    }
}

/// Errors raised while building a client
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required setting is absent
    #[error("Missing configuration: {0} is not set")]
    Missing(&'static str),

    /// Base URL could not be used
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// reqwest refused to build a client
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
