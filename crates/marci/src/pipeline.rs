//! The per-route endpoint closure.

use std::sync::Arc;

use futures_util::FutureExt;
use marci_core::{
    BoxedHandler, BoxedHook, Endpoint, HttpError, HttpResponse, MarciResult, RawRequest,
    RequestContext,
};

use crate::options::RouteSpec;

/// Wraps a handler with its compiled schemas and the frozen hook list.
pub(crate) fn endpoint<C>(
    spec: Arc<RouteSpec>,
    hooks: Arc<[BoxedHook<C>]>,
    handler: BoxedHandler<C>,
) -> Endpoint
where
    C: Default + Send + 'static,
{
    Arc::new(move |raw: RawRequest| {
        let spec = Arc::clone(&spec);
        let hooks = Arc::clone(&hooks);
        let handler = Arc::clone(&handler);
        async move { run(raw, &spec, &hooks, &handler).await }.boxed()
    })
}

async fn run<C>(
    raw: RawRequest,
    spec: &RouteSpec,
    hooks: &[BoxedHook<C>],
    handler: &BoxedHandler<C>,
) -> MarciResult<HttpResponse>
where
    C: Default + Send + 'static,
{
    let params = match &spec.params {
        Some(validator) => validator.parse(raw.params_value())?,
        None => raw.params_value(),
    };

    let query = match (raw.query_value()?, &spec.query) {
        (Some(query), Some(validator)) => Some(validator.parse(query)?),
        (query, _) => query,
    };

    let mut ctx = RequestContext::<C>::new(raw, params, query);
    tracing::debug!(request_id = %ctx.request_id(), http.path = ctx.raw().path(), "dispatching");

    for hook in hooks {
        ctx = hook.call(ctx).await?;
    }

    if let Some(validator) = &spec.body {
        let body = ctx.raw().json()?;
        if let Some(error) = validator.first_error(&body) {
            return Err(HttpError::body_validation(&error).into());
        }
        ctx.set_body(body);
    }

    handler.call(ctx).await?.into_response()
}
