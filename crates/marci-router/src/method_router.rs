//! HTTP method-based routing.
//!
//! [`MethodRouter`] maps HTTP methods to values for a single path. Setting a
//! method that is already present replaces the previous value.

use http::Method;

/// Maps HTTP methods to values for a single route.
///
/// # Example
///
/// ```rust
/// use marci_router::MethodRouter;
/// use http::Method;
///
/// let router = MethodRouter::new()
///     .get("listUsers")
///     .post("createUser")
///     .post("createUserV2");
///
/// assert_eq!(router.handler(&Method::GET), Some(&"listUsers"));
/// assert_eq!(router.handler(&Method::POST), Some(&"createUserV2"));
/// assert_eq!(router.handler(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<T> {
    get: Option<T>,
    post: Option<T>,
    put: Option<T>,
    delete: Option<T>,
    patch: Option<T>,
    head: Option<T>,
    options: Option<T>,
    trace: Option<T>,
    connect: Option<T>,
    /// Non-standard methods, in registration order.
    extensions: Vec<(Method, T)>,
}

impl<T> Default for MethodRouter<T> {
    fn default() -> Self {
        Self {
            get: None,
            post: None,
            put: None,
            delete: None,
            patch: None,
            head: None,
            options: None,
            trace: None,
            connect: None,
            extensions: Vec::new(),
        }
    }
}

impl<T> MethodRouter<T> {
    /// Creates a new empty method router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a GET handler.
    #[must_use]
    pub fn get(self, value: T) -> Self {
        self.method(&Method::GET, value)
    }

    /// Registers a POST handler.
    #[must_use]
    pub fn post(self, value: T) -> Self {
        self.method(&Method::POST, value)
    }

    /// Registers a PUT handler.
    #[must_use]
    pub fn put(self, value: T) -> Self {
        self.method(&Method::PUT, value)
    }

    /// Registers a DELETE handler.
    #[must_use]
    pub fn delete(self, value: T) -> Self {
        self.method(&Method::DELETE, value)
    }

    /// Registers a PATCH handler.
    #[must_use]
    pub fn patch(self, value: T) -> Self {
        self.method(&Method::PATCH, value)
    }

    /// Registers a handler for any method, including extension methods.
    #[must_use]
    pub fn method(mut self, method: &Method, value: T) -> Self {
        self.set(method, value);
        self
    }

    /// Stores `value` for `method`, returning the value it replaced.
    pub fn set(&mut self, method: &Method, value: T) -> Option<T> {
        if let Some(slot) = self.slot_mut(method) {
            return slot.replace(value);
        }
        if let Some(entry) = self.extensions.iter_mut().find(|(m, _)| m == method) {
            return Some(std::mem::replace(&mut entry.1, value));
        }
        self.extensions.push((method.clone(), value));
        None
    }

    /// Returns the value registered for `method`.
    #[must_use]
    pub fn handler(&self, method: &Method) -> Option<&T> {
        let slot = match *method {
            Method::GET => &self.get,
            Method::POST => &self.post,
            Method::PUT => &self.put,
            Method::DELETE => &self.delete,
            Method::PATCH => &self.patch,
            Method::HEAD => &self.head,
            Method::OPTIONS => &self.options,
            Method::TRACE => &self.trace,
            Method::CONNECT => &self.connect,
            _ => {
                return self
                    .extensions
                    .iter()
                    .find(|(m, _)| m == method)
                    .map(|(_, v)| v)
            }
        };
        slot.as_ref()
    }

    /// Moves every method of `other` into this router.
    ///
    /// Methods present in both keep the value from `other`. Returns how many
    /// methods were newly added.
    pub fn merge(&mut self, other: MethodRouter<T>) -> usize {
        let mut added = 0;
        for (method, value) in other.into_entries() {
            if self.set(&method, value).is_none() {
                added += 1;
            }
        }
        added
    }

    /// Returns true if any methods are registered.
    #[must_use]
    pub fn has_any_method(&self) -> bool {
        !self.allowed_methods().is_empty()
    }

    /// Returns the methods registered on this route.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        let standard = [
            (Method::GET, self.get.is_some()),
            (Method::POST, self.post.is_some()),
            (Method::PUT, self.put.is_some()),
            (Method::DELETE, self.delete.is_some()),
            (Method::PATCH, self.patch.is_some()),
            (Method::HEAD, self.head.is_some()),
            (Method::OPTIONS, self.options.is_some()),
            (Method::TRACE, self.trace.is_some()),
            (Method::CONNECT, self.connect.is_some()),
        ];
        standard
            .into_iter()
            .filter_map(|(m, present)| present.then_some(m))
            .chain(self.extensions.iter().map(|(m, _)| m.clone()))
            .collect()
    }

    fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<T>> {
        match *method {
            Method::GET => Some(&mut self.get),
            Method::POST => Some(&mut self.post),
            Method::PUT => Some(&mut self.put),
            Method::DELETE => Some(&mut self.delete),
            Method::PATCH => Some(&mut self.patch),
            Method::HEAD => Some(&mut self.head),
            Method::OPTIONS => Some(&mut self.options),
            Method::TRACE => Some(&mut self.trace),
            Method::CONNECT => Some(&mut self.connect),
            _ => None,
        }
    }

    fn into_entries(self) -> Vec<(Method, T)> {
        let standard = [
            (Method::GET, self.get),
            (Method::POST, self.post),
            (Method::PUT, self.put),
            (Method::DELETE, self.delete),
            (Method::PATCH, self.patch),
            (Method::HEAD, self.head),
            (Method::OPTIONS, self.options),
            (Method::TRACE, self.trace),
            (Method::CONNECT, self.connect),
        ];
        standard
            .into_iter()
            .filter_map(|(m, v)| v.map(|v| (m, v)))
            .chain(self.extensions)
            .collect()
    }
}
