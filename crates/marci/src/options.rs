//! Per-route schema options and their compiled form.

use http::Method;
use marci_schema::{SchemaItem, Validator};

use crate::error::BuildError;

/// Schema descriptors attached to a route.
///
/// A missing descriptor means the value is passed through unvalidated.
///
/// ```rust
/// use marci::{schema, RouteOptions};
/// use serde_json::json;
///
/// let options = RouteOptions::new()
///     .params(schema(json!({ "userId": "number" })))
///     .query(schema(json!({ "page": "integer?" })));
/// assert!(options.body_schema().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    params: Option<SchemaItem>,
    query: Option<SchemaItem>,
    body: Option<SchemaItem>,
}

impl RouteOptions {
    /// No schemas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path params schema.
    #[must_use]
    pub fn params(mut self, schema: SchemaItem) -> Self {
        self.params = Some(schema);
        self
    }

    /// Sets the query schema.
    #[must_use]
    pub fn query(mut self, schema: SchemaItem) -> Self {
        self.query = Some(schema);
        self
    }

    /// Sets the body schema.
    #[must_use]
    pub fn body(mut self, schema: SchemaItem) -> Self {
        self.body = Some(schema);
        self
    }

    /// Path params schema, if any.
    #[must_use]
    pub fn params_schema(&self) -> Option<&SchemaItem> {
        self.params.as_ref()
    }

    /// Query schema, if any.
    #[must_use]
    pub fn query_schema(&self) -> Option<&SchemaItem> {
        self.query.as_ref()
    }

    /// Body schema, if any.
    #[must_use]
    pub fn body_schema(&self) -> Option<&SchemaItem> {
        self.body.as_ref()
    }

    /// Interprets a positional schema list.
    ///
    /// | len | GET              | other methods           |
    /// |-----|------------------|-------------------------|
    /// | 0   | none             | none                    |
    /// | 1   | params           | params                  |
    /// | 2   | params, query    | params, body            |
    /// | 3   | rejected         | params, body, query     |
    ///
    /// Anything longer is rejected. The error carries an empty path; the
    /// caller fills it in.
    pub fn from_schema_list(method: &Method, schemas: Vec<SchemaItem>) -> Result<Self, BuildError> {
        let count = schemas.len();
        let is_get = method == Method::GET;
        let mut it = schemas.into_iter();

        let options = match (count, is_get) {
            (0, _) => Self::new(),
            (1, _) => Self {
                params: it.next(),
                ..Self::default()
            },
            (2, true) => Self {
                params: it.next(),
                query: it.next(),
                ..Self::default()
            },
            (2, false) => Self {
                params: it.next(),
                body: it.next(),
                ..Self::default()
            },
            (3, false) => Self {
                params: it.next(),
                body: it.next(),
                query: it.next(),
            },
            _ => {
                return Err(BuildError::SchemaList {
                    method: method.clone(),
                    path: String::new(),
                    count,
                })
            }
        };
        Ok(options)
    }
}

/// Validators compiled once at registration.
#[derive(Debug, Default)]
pub(crate) struct RouteSpec {
    pub(crate) params: Option<Validator>,
    pub(crate) query: Option<Validator>,
    pub(crate) body: Option<Validator>,
}

impl RouteSpec {
    /// Compiles every descriptor. A params descriptor made only of string
    /// fields compiles to no validator, keeping the raw path strings.
    pub(crate) fn compile(
        method: &Method,
        path: &str,
        options: &RouteOptions,
    ) -> Result<Self, BuildError> {
        let compile = |part: &'static str, item: Option<&SchemaItem>| {
            item.map(SchemaItem::compile)
                .transpose()
                .map_err(|source| BuildError::Schema {
                    method: method.clone(),
                    path: path.to_owned(),
                    part,
                    source,
                })
        };

        let params = options.params.as_ref().filter(|item| !item.is_default_params());
        Ok(Self {
            params: compile("params", params)?,
            query: compile("query", options.query.as_ref())?,
            body: compile("body", options.body.as_ref())?,
        })
    }
}
