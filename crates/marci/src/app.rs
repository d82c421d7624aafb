//! The application: root scope plus the build and listen phases.

use std::ops::Deref;
use std::sync::Arc;

use futures_util::future::try_join_all;
use marci_core::RouteTable;
use marci_server::{Server, ServerConfig, ShutdownSignal};
use parking_lot::Mutex;

use crate::error::BuildError;
use crate::registry::Registry;
use crate::scope::Scope;

/// A Marci application.
///
/// Dereferences to its root [`Scope`], so routes, hooks and plugins are
/// registered directly on the app.
///
/// # Example
///
/// ```rust,no_run
/// use marci::{App, MarciResult, PluginOptions, RequestContext, ServerConfig};
/// use serde_json::{json, Value};
///
/// async fn status(_ctx: RequestContext) -> MarciResult<Value> {
///     Ok(json!({ "status": "up" }))
/// }
///
/// # async fn run() -> Result<(), marci::BuildError> {
/// let app = App::new();
/// app.register(|api| { api.get("/", status); }, PluginOptions::prefix("/api"));
/// app.listen(ServerConfig::builder().port(3000).build()).await
/// # }
/// ```
pub struct App<C = ()> {
    root: Scope<C>,
}

impl<C> App<C>
where
    C: Default + Send + 'static,
{
    /// Creates an empty app.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Scope::root(Arc::new(Mutex::new(Registry::default()))),
        }
    }

    /// Settles every pending plugin setup and freezes the route table.
    ///
    /// Setups started while settling are awaited too. Fails with the first
    /// setup error or, after all setups succeeded, the first registration
    /// error.
    pub async fn build(self) -> Result<RouteTable, BuildError> {
        let registry = Arc::clone(self.root.registry());

        loop {
            let pending = registry.lock().take_setups();
            if pending.is_empty() {
                break;
            }
            tracing::debug!(count = pending.len(), "settling plugin setups");
            try_join_all(pending).await.map_err(BuildError::Setup)?;
        }

        let table = registry.lock().freeze()?;
        Ok(table)
    }

    /// Builds the app and serves it until SIGINT or SIGTERM.
    pub async fn listen(self, config: ServerConfig) -> Result<(), BuildError> {
        let table = self.build().await?;
        Server::new(config, Arc::new(table)).run().await?;
        Ok(())
    }

    /// Builds the app and serves it until `shutdown` fires.
    pub async fn listen_with_shutdown(
        self,
        config: ServerConfig,
        shutdown: ShutdownSignal,
    ) -> Result<(), BuildError> {
        let table = self.build().await?;
        Server::new(config, Arc::new(table))
            .run_with_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

impl<C> Default for App<C>
where
    C: Default + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Deref for App<C> {
    type Target = Scope<C>;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl<C> std::fmt::Debug for App<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}
