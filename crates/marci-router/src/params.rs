//! Raw path captures.

use smallvec::SmallVec;

/// Captures stored without a heap allocation.
const INLINE_CAPTURES: usize = 4;

/// Path segments captured by `:name` and `*name` pattern segments.
///
/// Values are the request's path segments as they arrived. Turning `"42"`
/// into a number is the job of the route's params schema.
///
/// ```rust
/// use marci_router::Params;
///
/// let mut params = Params::new();
/// params.push("userId", "42");
///
/// assert_eq!(params.get("userId"), Some("42"));
/// assert_eq!(params.names().collect::<Vec<_>>(), ["userId"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    captures: SmallVec<[(String, String); INLINE_CAPTURES]>,
}

impl Params {
    /// No captures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a capture.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.captures.push((name.into(), value.into()));
    }

    /// The captured segment for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v.as_str()))
    }

    /// `true` for a pattern without captures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Forgets captures past `len`, undoing a branch the matcher backed out of.
    pub fn truncate(&mut self, len: usize) {
        self.captures.truncate(len);
    }

    /// Capture names in pattern order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.captures.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            captures: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let params: Params = [("orgId", "acme"), ("userId", "7")].into_iter().collect();

        assert_eq!(params.get("orgId"), Some("acme"));
        assert_eq!(params.get("userId"), Some("7"));
        assert_eq!(params.get("teamId"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_truncate_backs_out_a_branch() {
        let mut params = Params::new();
        params.push("orgId", "acme");
        let mark = params.len();
        params.push("userId", "7");

        params.truncate(mark);
        assert_eq!(params.names().collect::<Vec<_>>(), ["orgId"]);
    }

    #[test]
    fn test_pattern_order_is_kept() {
        let params: Params = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(params.iter().collect::<Vec<_>>(), [("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_many_captures() {
        let params: Params = (0..10).map(|i| (format!("p{i}"), i.to_string())).collect();
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("p7"), Some("7"));
        assert!(!params.is_empty());
    }
}
