//! Radix tree route table for Marci.
//!
//! This crate stores values (usually compiled request endpoints) by path
//! pattern and HTTP method, and resolves concrete request paths to them.
//!
//! # Features
//!
//! - **Radix Tree Matching**: lookup cost grows with path length, not route count
//! - **Path Parameters**: `/users/:id` or `/users/{id}`
//! - **Wildcards**: catch-all routes (`/files/*path`)
//! - **Last Write Wins**: re-registering a (path, method) pair replaces it
//! - **Path Normalization**: one trailing slash is insignificant
//!
//! # Example
//!
//! ```rust
//! use marci_router::{normalize_path, MethodRouter, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! let path = normalize_path("/api", "/users/");
//! router.insert(&path, MethodRouter::new().get("listUsers")).unwrap();
//! router.insert("/api/users/:userId", MethodRouter::new().get("getUser")).unwrap();
//!
//! let found = router.match_route(&Method::GET, "/api/users/42").unwrap();
//! assert_eq!(*found.value, "getUser");
//! assert_eq!(found.params.get("userId"), Some("42"));
//! ```
//!
//! # Architecture
//!
//! ```text
//!                    (root)
//!                      │
//!              ┌───────┴───────┐
//!              │               │
//!            "api"          "files"
//!              │               │
//!           "users"          "*path"
//!        ┌─────┴─────┐
//!        │           │
//!     (leaf)     ":userId"
//!     [GET]          │
//!                 (leaf)
//!              [GET,POST]
//! ```

mod method_router;
mod node;
mod params;
mod path;
mod router;

pub use method_router::MethodRouter;
pub use node::Node;
pub use params::Params;
pub use path::{join_prefix, normalize_path, normalize_prefix, SegmentKind};
pub use router::Router;

/// A matched route with its value and captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// The value registered for the matched (path, method)
    pub value: &'a T,
    /// Captured path parameters
    pub params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(value: &'a T, params: Params) -> Self {
        Self { value, params }
    }
}

/// Errors raised while inserting a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A `*name` segment appeared before the end of the pattern.
    #[error("wildcard must be the last segment in `{0}`")]
    WildcardNotLast(String),

    /// A parameter segment had no name.
    #[error("parameter without a name in `{0}`")]
    EmptyParamName(String),

    /// A `*name` segment reused a position already taken by another name.
    #[error("wildcard in `{pattern}` conflicts with existing `*{existing}`")]
    WildcardConflict {
        /// The rejected pattern.
        pattern: String,
        /// Name of the wildcard already registered at that position.
        existing: String,
    },
}
