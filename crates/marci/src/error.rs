//! Registration and startup errors.

use http::Method;
use marci_router::RouteError;
use marci_schema::SchemaError;
use marci_server::ServerError;
use thiserror::Error;

/// Errors surfaced by [`App::build`](crate::App::build) and
/// [`App::listen`](crate::App::listen).
///
/// Registration never fails on the spot. Problems are recorded and the first
/// one is returned when the app is built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A schema descriptor did not compile.
    #[error("invalid {part} schema for {method} {path}: {source}")]
    Schema {
        /// Route method.
        method: Method,
        /// Normalized route path.
        path: String,
        /// Which schema: `params`, `query` or `body`.
        part: &'static str,
        /// Compiler error.
        #[source]
        source: SchemaError,
    },

    /// A positional schema list has no meaning for this method.
    #[error("{count} positional schemas are not supported for {method} {path}")]
    SchemaList {
        /// Route method.
        method: Method,
        /// Normalized route path.
        path: String,
        /// Length of the list.
        count: usize,
    },

    /// The path pattern was rejected by the route table.
    #[error("invalid route pattern {path}: {source}")]
    Route {
        /// Normalized route path.
        path: String,
        /// Router error.
        #[source]
        source: RouteError,
    },

    /// An asynchronous plugin setup failed.
    #[error("plugin setup failed: {0}")]
    Setup(#[source] anyhow::Error),

    /// The transport failed to start or stopped with an error.
    #[error(transparent)]
    Server(#[from] ServerError),
}
