//! # Marci
//!
//! Lightweight routing and schema validation on top of a hyper transport.
//!
//! - Register handlers per method and path, with `:param` segments
//! - Attach params, query and body schemas written as compact JSON descriptors
//! - Run `onRequest` hooks in order before every handler
//! - Mount plugins under path prefixes, including ones with async setup
//! - Validation failures and handler errors become HTTP responses
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use marci::{schema, App, MarciResult, Method, RequestContext, ServerConfig};
//! use serde_json::{json, Value};
//!
//! async fn get_user(ctx: RequestContext) -> MarciResult<Value> {
//!     Ok(json!({ "id": ctx.params()["userId"] }))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), marci::BuildError> {
//!     let app = App::new();
//!     app.route_with_schemas(
//!         Method::GET,
//!         "/users/:userId",
//!         [schema(json!({ "userId": "number" }))],
//!         get_user,
//!     );
//!     app.listen(ServerConfig::default()).await
//! }
//! ```
//!
//! ## Request pipeline
//!
//! ```text
//! route lookup → params/query parse → hooks (in order) → body parse/check → handler → reply
//!      ↓ miss                  ↓ any error
//!     404               global error responder
//! ```

#![doc(html_root_url = "https://docs.rs/marci/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod error;
mod options;
mod pipeline;
mod registry;
mod scope;

pub use app::App;
pub use error::BuildError;
pub use options::RouteOptions;
pub use scope::{HookPhase, PluginOptions, Scope};

pub use http::{Method, StatusCode};
pub use marci_core::{
    response, HttpError, HttpResponse, IntoReply, Json, MarciError, MarciResult, RawRequest,
    Reply, RequestContext, RequestId, RouteTable,
};
pub use marci_schema::{schema, SchemaItem};
pub use marci_server::{Dispatcher, Server, ServerConfig, ShutdownSignal};

/// Common imports for applications.
pub mod prelude {
    pub use crate::{
        schema, App, HookPhase, HttpError, Json, MarciError, MarciResult, Method, PluginOptions,
        RequestContext, RouteOptions, Scope, ServerConfig,
    };
}
