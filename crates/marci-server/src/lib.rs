//! # Marci Server
//!
//! Serves a frozen [`RouteTable`](marci_core::RouteTable) over HTTP/1.1.
//!
//! - [`ServerConfig`] - Bind address, request and shutdown timeouts
//! - [`Dispatcher`] - Route lookup, 404 fallback and the global error responder
//! - [`Server`] - Tokio accept loop on hyper with graceful shutdown
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marci_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::builder().port(3000).build();
//! Server::new(config, Arc::new(table)).run().await?;
//! ```

#![doc(html_root_url = "https://docs.rs/marci-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod dispatch;
mod error;
pub mod responder;
mod server;
pub mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_HOST, DEFAULT_PORT};
pub use dispatch::Dispatcher;
pub use error::{ServerError, ServerResult};
pub use server::Server;
pub use shutdown::{ConnectionTracker, ShutdownSignal};
