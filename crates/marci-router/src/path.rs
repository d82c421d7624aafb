//! Route path normalization and pattern parsing.

use crate::RouteError;

/// Kind of a single pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal segment (e.g., "users")
    Static,
    /// Named parameter, written `:id` or `{id}`
    Param(String),
    /// Catch-all wildcard, written `*path`; must be the last segment
    Wildcard(String),
}

/// Normalizes a scope prefix.
///
/// A single trailing slash is dropped and a leading slash is added when
/// missing. The empty prefix and `"/"` both mean "no prefix".
///
/// ```rust
/// use marci_router::normalize_prefix;
///
/// assert_eq!(normalize_prefix("api/"), "/api");
/// assert_eq!(normalize_prefix("/"), "");
/// ```
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.strip_suffix('/').unwrap_or(prefix);
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Joins a parent prefix and a child prefix into the child's full prefix.
#[must_use]
pub fn join_prefix(parent: &str, child: &str) -> String {
    normalize_prefix(&format!("{}{}", parent, normalize_prefix(child)))
}

/// Builds the route-table key for `path` registered under `prefix`.
///
/// One trailing slash is stripped from `path`, `prefix` is prepended, and an
/// empty result becomes `"/"`.
///
/// ```rust
/// use marci_router::normalize_path;
///
/// assert_eq!(normalize_path("", "/users/"), "/users");
/// assert_eq!(normalize_path("", "/"), "/");
/// assert_eq!(normalize_path("/api", "/"), "/api");
/// assert_eq!(normalize_path("/api", "/users"), "/api/users");
/// ```
#[must_use]
pub fn normalize_path(prefix: &str, path: &str) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let joined = if trimmed.is_empty() || trimmed.starts_with('/') {
        format!("{prefix}{trimmed}")
    } else {
        format!("{prefix}/{trimmed}")
    };
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Splits a route pattern into typed segments.
pub(crate) fn parse_pattern(pattern: &str) -> Result<Vec<(String, SegmentKind)>, RouteError> {
    let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let last = raw.len().saturating_sub(1);
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            let kind = if let Some(name) = s.strip_prefix(':') {
                SegmentKind::Param(name.to_string())
            } else if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                SegmentKind::Param(name.to_string())
            } else if let Some(name) = s.strip_prefix('*') {
                if i != last {
                    return Err(RouteError::WildcardNotLast(pattern.to_string()));
                }
                SegmentKind::Wildcard(name.to_string())
            } else {
                SegmentKind::Static
            };
            if matches!(&kind, SegmentKind::Param(n) if n.is_empty()) {
                return Err(RouteError::EmptyParamName(pattern.to_string()));
            }
            Ok(((*s).to_string(), kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_path_strips_one_trailing_slash() {
        assert_eq!(normalize_path("", "/users/"), "/users");
        assert_eq!(normalize_path("", "/users"), "/users");
        assert_eq!(normalize_path("", "/users//"), "/users/");
    }

    #[test]
    fn test_normalize_path_root_and_empty() {
        assert_eq!(normalize_path("", "/"), "/");
        assert_eq!(normalize_path("", ""), "/");
        assert_eq!(normalize_path("/api", ""), "/api");
    }

    #[test]
    fn test_normalize_path_adds_missing_separator() {
        assert_eq!(normalize_path("/api", "users"), "/api/users");
        assert_eq!(normalize_path("", "users"), "/users");
    }

    #[test]
    fn test_join_prefix() {
        assert_eq!(join_prefix("", "/api"), "/api");
        assert_eq!(join_prefix("/api", "/v1/"), "/api/v1");
        assert_eq!(join_prefix("/api", ""), "/api");
        assert_eq!(join_prefix("", "v1"), "/v1");
    }

    #[test]
    fn test_parse_pattern_kinds() {
        let segments = parse_pattern("/users/:userId/files/{name}/*rest").unwrap();
        let kinds: Vec<_> = segments.into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Static,
                SegmentKind::Param("userId".to_string()),
                SegmentKind::Static,
                SegmentKind::Param("name".to_string()),
                SegmentKind::Wildcard("rest".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_pattern_rejects_inner_wildcard() {
        assert!(matches!(
            parse_pattern("/files/*path/meta"),
            Err(RouteError::WildcardNotLast(_))
        ));
    }

    #[test]
    fn test_parse_pattern_rejects_empty_param() {
        assert!(matches!(
            parse_pattern("/users/:"),
            Err(RouteError::EmptyParamName(_))
        ));
    }

    proptest! {
        #[test]
        fn trailing_slash_is_insignificant(segs in proptest::collection::vec("[a-z0-9]{1,8}", 0..5)) {
            let path = format!("/{}", segs.join("/"));
            let with_slash = format!("{path}/");
            prop_assert_eq!(normalize_path("", &path), normalize_path("", &with_slash));
        }

        #[test]
        fn normalized_paths_start_with_slash(
            prefix in "(/[a-z]{1,6}){0,2}",
            path in "/?([a-z]{1,6}/?){0,3}",
        ) {
            let normalized = normalize_path(&prefix, &path);
            prop_assert!(normalized.starts_with('/'));
            prop_assert!(normalized.starts_with(&prefix));
        }
    }
}
