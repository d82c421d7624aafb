//! High-level router API.

use http::Method;

use crate::method_router::MethodRouter;
use crate::node::Node;
use crate::params::Params;
use crate::{RouteError, RouteMatch};

/// A radix tree route table keyed by path pattern and HTTP method.
///
/// # Example
///
/// ```rust
/// use marci_router::{Router, MethodRouter};
/// use http::Method;
///
/// let mut router = Router::new();
/// router.insert("/users", MethodRouter::new().get("listUsers").post("createUser")).unwrap();
/// router.route(&Method::GET, "/users/:userId", "getUser").unwrap();
///
/// let found = router.match_route(&Method::GET, "/users/42").unwrap();
/// assert_eq!(*found.value, "getUser");
/// assert_eq!(found.params.get("userId"), Some("42"));
/// ```
///
/// # Route Priority
///
/// 1. **Static segments** (e.g., `/users/me`)
/// 2. **Parameter segments** (e.g., `/users/:id`)
/// 3. **Wildcard segments** (e.g., `/files/*path`)
///
/// Registering the same (path, method) pair twice keeps the last value.
#[derive(Debug, Clone)]
pub struct Router<T> {
    root: Node<T>,
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            route_count: 0,
        }
    }

    /// Inserts every method of `methods` at `path`.
    pub fn insert(&mut self, path: &str, methods: MethodRouter<T>) -> Result<(), RouteError> {
        self.route_count += self.root.insert(path, methods)?;
        Ok(())
    }

    /// Registers a single (path, method) pair.
    pub fn route(&mut self, method: &Method, path: &str, value: T) -> Result<(), RouteError> {
        self.insert(path, MethodRouter::new().method(method, value))
    }

    /// Matches a path and method against the router.
    ///
    /// Returns `None` when no pattern registered for `method` matches the
    /// path. Patterns without a value for `method` never shadow ones that
    /// have one.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, T>> {
        let (value, params) = self.root.match_method(method, path)?;
        Some(RouteMatch::new(value, params))
    }

    /// Matches a path regardless of method.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        self.root.match_path(path)
    }

    /// Returns the number of distinct (path, method) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
