//! Radix tree node implementation.

use http::Method;

use crate::method_router::MethodRouter;
use crate::params::Params;
use crate::path::{parse_pattern, SegmentKind};
use crate::RouteError;

/// A node in the radix tree.
///
/// Each node represents one path segment. Nodes at route boundaries carry a
/// [`MethodRouter`] with the values registered for that path.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The pattern segment this node represents
    pub segment: String,

    /// The kind of segment
    pub kind: SegmentKind,

    /// Values registered at this exact path
    pub methods: Option<MethodRouter<T>>,

    /// Static children, sorted by segment for binary search
    static_children: Vec<Node<T>>,

    /// Parameter children, one per distinct name, tried in insertion order
    param_children: Vec<Node<T>>,

    /// Wildcard child (always a leaf)
    wildcard_child: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(segment: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            segment: segment.into(),
            kind,
            methods: None,
            static_children: Vec::new(),
            param_children: Vec::new(),
            wildcard_child: None,
        }
    }

    /// Creates a root node for the tree.
    #[must_use]
    pub fn root() -> Self {
        Self::new("", SegmentKind::Static)
    }

    /// Inserts `methods` at `pattern`, merging into any existing entry.
    ///
    /// Returns how many (path, method) pairs were newly added.
    pub fn insert(&mut self, pattern: &str, methods: MethodRouter<T>) -> Result<usize, RouteError> {
        let segments = parse_pattern(pattern)?;
        self.insert_segments(pattern, &segments, methods)
    }

    fn insert_segments(
        &mut self,
        pattern: &str,
        segments: &[(String, SegmentKind)],
        methods: MethodRouter<T>,
    ) -> Result<usize, RouteError> {
        let Some(((segment, kind), remaining)) = segments.split_first() else {
            return Ok(match &mut self.methods {
                Some(existing) => existing.merge(methods),
                None => {
                    let added = methods.allowed_methods().len();
                    self.methods = Some(methods);
                    added
                }
            });
        };

        let child = match kind {
            SegmentKind::Static => {
                match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(segment))
                {
                    Ok(i) => &mut self.static_children[i],
                    Err(i) => {
                        self.static_children
                            .insert(i, Node::new(segment.clone(), kind.clone()));
                        &mut self.static_children[i]
                    }
                }
            }
            SegmentKind::Param(name) => {
                let position = self
                    .param_children
                    .iter()
                    .position(|c| matches!(&c.kind, SegmentKind::Param(n) if n == name));
                let i = position.unwrap_or_else(|| {
                    self.param_children
                        .push(Node::new(segment.clone(), kind.clone()));
                    self.param_children.len() - 1
                });
                &mut self.param_children[i]
            }
            SegmentKind::Wildcard(name) => {
                let child: &mut Node<T> = self
                    .wildcard_child
                    .get_or_insert_with(|| Box::new(Node::new(segment.clone(), kind.clone())));
                if let SegmentKind::Wildcard(existing) = &child.kind {
                    if existing != name {
                        return Err(RouteError::WildcardConflict {
                            pattern: pattern.to_owned(),
                            existing: existing.clone(),
                        });
                    }
                }
                child
            }
        };
        child.insert_segments(pattern, remaining, methods)
    }

    /// Matches a concrete request path against the tree, ignoring the method.
    ///
    /// Returns the method router and captured parameters if some route's
    /// pattern matches. Static segments win over parameters, parameters over
    /// wildcards; a failed branch is unwound before the next one is tried.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter<T>, Params)> {
        self.match_with(path, |_| true)
    }

    /// Matches a concrete request path and method.
    ///
    /// A pattern without a value for `method` counts as a miss, so the
    /// search goes on to lower-priority branches.
    #[must_use]
    pub fn match_method(&self, method: &Method, path: &str) -> Option<(&T, Params)> {
        let (methods, params) = self.match_with(path, |m| m.handler(method).is_some())?;
        Some((methods.handler(method)?, params))
    }

    fn match_with<F>(&self, path: &str, accept: F) -> Option<(&MethodRouter<T>, Params)>
    where
        F: Fn(&MethodRouter<T>) -> bool,
    {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        let methods = self.match_segments(&segments, &mut params, &accept)?;
        Some((methods, params))
    }

    fn match_segments<'a, F>(
        &'a self,
        segments: &[&str],
        params: &mut Params,
        accept: &F,
    ) -> Option<&'a MethodRouter<T>>
    where
        F: Fn(&MethodRouter<T>) -> bool,
    {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.methods.as_ref().filter(|m| accept(m));
        };

        if let Some(child) = self.find_static_child(segment) {
            if let Some(found) = child.match_segments(remaining, params, accept) {
                return Some(found);
            }
        }

        for child in &self.param_children {
            if let SegmentKind::Param(name) = &child.kind {
                let mark = params.len();
                params.push(name.clone(), *segment);
                if let Some(found) = child.match_segments(remaining, params, accept) {
                    return Some(found);
                }
                params.truncate(mark);
            }
        }

        if let Some(child) = &self.wildcard_child {
            if let (SegmentKind::Wildcard(name), Some(methods)) = (&child.kind, &child.methods) {
                if accept(methods) {
                    params.push(name.clone(), segments.join("/"));
                    return Some(methods);
                }
            }
        }

        None
    }

    fn find_static_child(&self, segment: &str) -> Option<&Node<T>> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_insert_and_match_param() {
        let mut root = Node::root();
        root.insert("/users/:id", MethodRouter::new().get("getUser"))
            .unwrap();

        let (methods, params) = root.match_path("/users/123").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&"getUser"));
        assert_eq!(params.get("id"), Some("123"));
    }

    #[test]
    fn test_static_children_stay_sorted() {
        let mut root = Node::root();
        for name in ["zeta", "alpha", "mid"] {
            root.insert(&format!("/{name}"), MethodRouter::new().get(name))
                .unwrap();
        }
        let order: Vec<_> = root.static_children.iter().map(|c| c.segment.as_str()).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_static_priority_over_param() {
        let mut root = Node::root();
        root.insert("/users/me", MethodRouter::new().get("me")).unwrap();
        root.insert("/users/:id", MethodRouter::new().get("byId")).unwrap();

        let (methods, params) = root.match_path("/users/me").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&"me"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_failed_static_branch_falls_back_to_param() {
        let mut root = Node::root();
        root.insert("/users/me/settings", MethodRouter::new().get("settings"))
            .unwrap();
        root.insert("/users/:id/posts", MethodRouter::new().get("posts"))
            .unwrap();

        let (methods, params) = root.match_path("/users/me/posts").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&"posts"));
        assert_eq!(params.get("id"), Some("me"));
    }

    #[test]
    fn test_failed_param_branch_unwinds_capture() {
        let mut root = Node::root();
        root.insert("/files/:id/meta", MethodRouter::new().get("meta"))
            .unwrap();
        root.insert("/files/*path", MethodRouter::new().get("serve"))
            .unwrap();

        let (methods, params) = root.match_path("/files/a/b").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&"serve"));
        assert_eq!(params.get("id"), None);
        assert_eq!(params.get("path"), Some("a/b"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_distinct_param_names_at_same_position() {
        let mut root = Node::root();
        root.insert("/users/:userId", MethodRouter::new().get("user"))
            .unwrap();
        root.insert("/users/:name/avatar", MethodRouter::new().get("avatar"))
            .unwrap();

        let (_, params) = root.match_path("/users/7").unwrap();
        assert_eq!(params.get("userId"), Some("7"));

        let (methods, params) = root.match_path("/users/ann/avatar").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&"avatar"));
        assert_eq!(params.get("name"), Some("ann"));
        assert_eq!(params.get("userId"), None);
    }

    #[test]
    fn test_method_miss_falls_through_to_param() {
        let mut root = Node::root();
        root.insert("/items/me", MethodRouter::new().get("me")).unwrap();
        root.insert("/items/:id", MethodRouter::new().post("update"))
            .unwrap();

        let (value, params) = root.match_method(&Method::POST, "/items/me").unwrap();
        assert_eq!(*value, "update");
        assert_eq!(params.get("id"), Some("me"));

        let (value, params) = root.match_method(&Method::GET, "/items/me").unwrap();
        assert_eq!(*value, "me");
        assert!(params.is_empty());
        assert!(root.match_method(&Method::DELETE, "/items/me").is_none());
    }

    #[test]
    fn test_method_miss_tries_next_param_name() {
        let mut root = Node::root();
        root.insert("/users/:id", MethodRouter::new().get("get")).unwrap();
        root.insert("/users/:userId", MethodRouter::new().post("create"))
            .unwrap();

        let (value, params) = root.match_method(&Method::POST, "/users/5").unwrap();
        assert_eq!(*value, "create");
        assert_eq!(params.get("userId"), Some("5"));
        assert_eq!(params.get("id"), None);
    }

    #[test]
    fn test_wildcard_name_conflict_rejected() {
        let mut root = Node::root();
        root.insert("/files/*path", MethodRouter::new().get("serve"))
            .unwrap();
        let err = root
            .insert("/files/*rest", MethodRouter::new().post("upload"))
            .unwrap_err();
        assert!(matches!(err, RouteError::WildcardConflict { ref existing, .. } if existing == "path"));

        let (methods, params) = root.match_path("/files/a/b").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&"serve"));
        assert_eq!(params.get("path"), Some("a/b"));
    }

    #[test]
    fn test_insert_counts_new_pairs() {
        let mut root = Node::root();
        assert_eq!(root.insert("/users", MethodRouter::new().get(1).post(2)).unwrap(), 2);
        assert_eq!(root.insert("/users", MethodRouter::new().get(3)).unwrap(), 0);
        assert_eq!(root.insert("/users/", MethodRouter::new().delete(4)).unwrap(), 1);

        let (methods, _) = root.match_path("/users").unwrap();
        assert_eq!(methods.handler(&Method::GET), Some(&3));
    }

    #[test]
    fn test_prefix_node_without_methods_does_not_match() {
        let mut root = Node::root();
        root.insert("/api/users", MethodRouter::new().get("users"))
            .unwrap();
        assert!(root.match_path("/api").is_none());
        assert!(root.match_path("/users").is_none());
    }
}
