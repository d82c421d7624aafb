//! # Marci Core
//!
//! Core types for the Marci request pipeline.
//!
//! - [`RawRequest`] - The buffered request handed over by the transport
//! - [`RequestContext`] - Per-request params, query, body and caller fields
//! - [`HttpError`] / [`MarciError`] - The error model
//! - [`Reply`] / [`IntoReply`] - Handler result normalization
//! - [`Handler`] / [`Hook`] - User code entry points
//! - [`Endpoint`] / [`RouteTable`] - What the transport serves

#![doc(html_root_url = "https://docs.rs/marci-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod handler;
mod reply;
mod request;
pub mod response;

pub use context::{RequestContext, RequestId};
pub use error::{HttpError, MarciError, MarciResult};
pub use handler::{BoxedHandler, BoxedHook, Endpoint, Handler, Hook, RouteTable};
pub use reply::{IntoReply, Json, Reply};
pub use request::RawRequest;
pub use response::HttpResponse;
