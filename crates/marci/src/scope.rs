//! The registration API shared by the app and its plugins.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use http::Method;
use marci_core::{Handler, Hook};
use marci_router::{join_prefix, normalize_path};
use marci_schema::SchemaItem;
use parking_lot::Mutex;

use crate::error::BuildError;
use crate::options::{RouteOptions, RouteSpec};
use crate::registry::Registry;

/// When a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HookPhase {
    /// After params and query are parsed, before the body is validated.
    OnRequest,
}

/// Options for [`Scope::register`] and [`Scope::register_async`].
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    /// Path prefix appended to the parent scope's prefix.
    pub prefix: String,
}

impl PluginOptions {
    /// Options with a prefix.
    #[must_use]
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// A handle for registering routes, hooks and plugins under a path prefix.
///
/// Every scope created from one [`App`](crate::App) writes to the same
/// registry. Hooks are app-wide regardless of the scope that added them.
pub struct Scope<C = ()> {
    registry: Arc<Mutex<Registry<C>>>,
    prefix: String,
}

impl<C> Clone for Scope<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            prefix: self.prefix.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Scope<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope").field("prefix", &self.prefix).finish()
    }
}

impl<C> Scope<C>
where
    C: Default + Send + 'static,
{
    pub(crate) fn root(registry: Arc<Mutex<Registry<C>>>) -> Self {
        Self {
            registry,
            prefix: String::new(),
        }
    }

    pub(crate) fn registry(&self) -> &Arc<Mutex<Registry<C>>> {
        &self.registry
    }

    /// The accumulated path prefix, `""` at the root.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Registers a route without validation.
    pub fn route<H: Handler<C>>(&self, method: Method, path: &str, handler: H) -> &Self {
        self.route_with_options(method, path, RouteOptions::new(), handler)
    }

    /// Registers a route with explicit schemas.
    pub fn route_with_options<H: Handler<C>>(
        &self,
        method: Method,
        path: &str,
        options: RouteOptions,
        handler: H,
    ) -> &Self {
        let path = normalize_path(&self.prefix, path);
        let compiled = RouteSpec::compile(&method, &path, &options);

        let mut registry = self.registry.lock();
        match compiled {
            Ok(spec) => registry.add_route(method, path, spec, Arc::new(handler)),
            Err(err) => registry.add_error(err),
        }
        self
    }

    /// Registers a route with a positional schema list.
    ///
    /// See [`RouteOptions::from_schema_list`] for how positions map to
    /// params, query and body.
    pub fn route_with_schemas<H: Handler<C>>(
        &self,
        method: Method,
        path: &str,
        schemas: impl IntoIterator<Item = SchemaItem>,
        handler: H,
    ) -> &Self {
        match RouteOptions::from_schema_list(&method, schemas.into_iter().collect()) {
            Ok(options) => self.route_with_options(method, path, options, handler),
            Err(BuildError::SchemaList { method, count, .. }) => {
                let path = normalize_path(&self.prefix, path);
                self.registry
                    .lock()
                    .add_error(BuildError::SchemaList { method, path, count });
                self
            }
            Err(err) => {
                self.registry.lock().add_error(err);
                self
            }
        }
    }

    /// `GET` without validation.
    pub fn get<H: Handler<C>>(&self, path: &str, handler: H) -> &Self {
        self.route(Method::GET, path, handler)
    }

    /// `POST` without validation.
    pub fn post<H: Handler<C>>(&self, path: &str, handler: H) -> &Self {
        self.route(Method::POST, path, handler)
    }

    /// `PUT` without validation.
    pub fn put<H: Handler<C>>(&self, path: &str, handler: H) -> &Self {
        self.route(Method::PUT, path, handler)
    }

    /// `PATCH` without validation.
    pub fn patch<H: Handler<C>>(&self, path: &str, handler: H) -> &Self {
        self.route(Method::PATCH, path, handler)
    }

    /// `DELETE` without validation.
    pub fn delete<H: Handler<C>>(&self, path: &str, handler: H) -> &Self {
        self.route(Method::DELETE, path, handler)
    }

    /// Appends an app-wide hook. Hooks run in the order they were added.
    pub fn add_hook<H: Hook<C>>(&self, phase: HookPhase, hook: H) -> &Self {
        match phase {
            HookPhase::OnRequest => self.registry.lock().add_hook(Arc::new(hook)),
        }
        self
    }

    /// Runs a plugin now, inside a child scope.
    pub fn register<F>(&self, plugin: F, options: PluginOptions) -> &Self
    where
        F: FnOnce(&Scope<C>),
    {
        plugin(&self.child(&options));
        self
    }

    /// Starts an asynchronous plugin inside a child scope.
    ///
    /// The returned future is settled by [`App::build`](crate::App::build)
    /// before the route table is frozen; its routes are not served earlier.
    pub fn register_async<F, Fut>(&self, plugin: F, options: PluginOptions) -> &Self
    where
        F: FnOnce(Scope<C>) -> Fut,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let setup = plugin(self.child(&options)).boxed();
        self.registry.lock().add_setup(setup);
        self
    }

    fn child(&self, options: &PluginOptions) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            prefix: join_prefix(&self.prefix, &options.prefix),
        }
    }
}
