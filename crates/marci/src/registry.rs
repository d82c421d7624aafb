//! Shared registration state behind every [`Scope`](crate::Scope).

use std::sync::Arc;

use futures_util::future::BoxFuture;
use http::Method;
use indexmap::IndexMap;
use marci_core::{BoxedHandler, BoxedHook, RouteTable};

use crate::error::BuildError;
use crate::options::RouteSpec;
use crate::pipeline::endpoint;

pub(crate) type Setup = BoxFuture<'static, anyhow::Result<()>>;

pub(crate) struct RouteEntry<C> {
    spec: Arc<RouteSpec>,
    handler: BoxedHandler<C>,
}

/// Routes, hooks, pending plugin setups and deferred errors.
pub(crate) struct Registry<C> {
    routes: IndexMap<(String, Method), RouteEntry<C>>,
    hooks: Vec<BoxedHook<C>>,
    setups: Vec<Setup>,
    errors: Vec<BuildError>,
    frozen: bool,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            routes: IndexMap::new(),
            hooks: Vec::new(),
            setups: Vec::new(),
            errors: Vec::new(),
            frozen: false,
        }
    }
}

impl<C> Registry<C> {
    fn accepts(&self, what: &str) -> bool {
        if self.frozen {
            tracing::warn!("ignoring {what} registered after the app was built");
        }
        !self.frozen
    }

    pub(crate) fn add_route(
        &mut self,
        method: Method,
        path: String,
        spec: RouteSpec,
        handler: BoxedHandler<C>,
    ) {
        if !self.accepts("route") {
            return;
        }
        tracing::debug!(http.method = %method, http.path = %path, "route registered");
        let entry = RouteEntry {
            spec: Arc::new(spec),
            handler,
        };
        // same (path, method) keeps the last handler
        self.routes.insert((path, method), entry);
    }

    pub(crate) fn add_hook(&mut self, hook: BoxedHook<C>) {
        if self.accepts("hook") {
            self.hooks.push(hook);
        }
    }

    pub(crate) fn add_setup(&mut self, setup: Setup) {
        if self.accepts("plugin") {
            self.setups.push(setup);
        }
    }

    pub(crate) fn add_error(&mut self, error: BuildError) {
        self.errors.push(error);
    }

    pub(crate) fn take_setups(&mut self) -> Vec<Setup> {
        std::mem::take(&mut self.setups)
    }

    /// Freezes the registry into a route table. Later registrations are
    /// ignored.
    pub(crate) fn freeze(&mut self) -> Result<RouteTable, BuildError>
    where
        C: Default + Send + 'static,
    {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        self.frozen = true;

        let hooks: Arc<[BoxedHook<C>]> = std::mem::take(&mut self.hooks).into();
        let mut table = RouteTable::new();
        for ((path, method), entry) in std::mem::take(&mut self.routes) {
            let endpoint = endpoint(entry.spec, Arc::clone(&hooks), entry.handler);
            table
                .route(&method, &path, endpoint)
                .map_err(|source| BuildError::Route { path, source })?;
        }

        tracing::debug!(routes = table.len(), hooks = hooks.len(), "route table frozen");
        Ok(table)
    }
}
