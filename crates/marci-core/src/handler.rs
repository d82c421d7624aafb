//! Handler, hook and endpoint types.
//!
//! User code is written as async functions or closures taking an owned
//! [`RequestContext`]. The blanket impls below erase them into boxed futures
//! so routes with different return types share one table.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::context::RequestContext;
use crate::error::MarciResult;
use crate::reply::{IntoReply, Reply};
use crate::request::RawRequest;
use crate::response::HttpResponse;

/// A route handler.
///
/// Implemented for every `Fn(RequestContext<C>) -> impl Future<Output =
/// MarciResult<R>>` where `R: IntoReply`.
///
/// # Example
///
/// ```rust
/// use marci_core::{Handler, MarciResult, RequestContext};
/// use serde_json::{json, Value};
///
/// async fn status(_ctx: RequestContext) -> MarciResult<Value> {
///     Ok(json!({ "status": "up" }))
/// }
///
/// fn assert_handler<H: Handler<()>>(_: H) {}
/// assert_handler(status);
/// ```
pub trait Handler<C>: Send + Sync + 'static {
    /// Runs the handler and normalizes its result.
    fn call(&self, ctx: RequestContext<C>) -> BoxFuture<'static, MarciResult<Reply>>;
}

impl<C, F, Fut, R> Handler<C> for F
where
    C: Send + 'static,
    F: Fn(RequestContext<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MarciResult<R>> + Send + 'static,
    R: IntoReply,
{
    fn call(&self, ctx: RequestContext<C>) -> BoxFuture<'static, MarciResult<Reply>> {
        let fut = (self)(ctx);
        Box::pin(async move { fut.await?.into_reply() })
    }
}

/// An `onRequest` hook.
///
/// A hook takes the context, may change it, and hands it back. Returning an
/// error ends the request with that error.
pub trait Hook<C>: Send + Sync + 'static {
    /// Runs the hook.
    fn call(&self, ctx: RequestContext<C>) -> BoxFuture<'static, MarciResult<RequestContext<C>>>;
}

impl<C, F, Fut> Hook<C> for F
where
    C: Send + 'static,
    F: Fn(RequestContext<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MarciResult<RequestContext<C>>> + Send + 'static,
{
    fn call(&self, ctx: RequestContext<C>) -> BoxFuture<'static, MarciResult<RequestContext<C>>> {
        Box::pin((self)(ctx))
    }
}

/// A shareable type-erased handler.
pub type BoxedHandler<C> = Arc<dyn Handler<C>>;

/// A shareable type-erased hook.
pub type BoxedHook<C> = Arc<dyn Hook<C>>;

/// A compiled route: takes the buffered transport request, returns a response.
pub type Endpoint = Arc<dyn Fn(RawRequest) -> BoxFuture<'static, MarciResult<HttpResponse>> + Send + Sync>;

/// The frozen route table served by the transport.
pub type RouteTable = marci_router::Router<Endpoint>;
