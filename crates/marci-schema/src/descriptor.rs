//! Compact schema descriptors.
//!
//! A descriptor is plain JSON. Three shorthand forms cover most routes:
//!
//! - a type name: `"string"`, `"number"`, `"integer"`, `"boolean"`, `"null"`,
//!   `"any"`; a `?` suffix makes the field optional, `??` optional and nullable
//! - a property map: `{"name": "string", "age": "integer?"}`
//! - a one-element array: `["string"]` is an array of strings
//!
//! The full form is an object with a `type` key and keyword constraints:
//! `{"type": "string", "minLength": 1}`. An object whose `type` value is one
//! of the known type names is always read as the full form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{display_path, SchemaError};
use crate::validator::{Property, Schema, SchemaKind, Validator};

const TYPE_NAMES: &[&str] = &[
    "string", "number", "integer", "boolean", "null", "any", "object", "array", "literal", "union",
];

/// An uncompiled schema descriptor.
///
/// # Example
///
/// ```rust
/// use marci_schema::schema;
/// use serde_json::json;
///
/// let params = schema(json!({ "userId": "number" }));
/// let validator = params.compile().unwrap();
/// assert!(validator.check(&json!({ "userId": 42 })));
/// assert!(!params.is_default_params());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaItem(Value);

/// Wraps a JSON descriptor as a [`SchemaItem`].
#[must_use]
pub fn schema(descriptor: Value) -> SchemaItem {
    SchemaItem(descriptor)
}

impl SchemaItem {
    /// Returns the raw descriptor.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Compiles this descriptor into a reusable validator.
    pub fn compile(&self) -> Result<Validator, SchemaError> {
        compile(self)
    }

    /// Whether a params descriptor adds nothing over raw path strings.
    ///
    /// True when the descriptor is not an object, or every value in it is
    /// `"string"`, `"string?"` or `"string??"`. Such params skip validation.
    #[must_use]
    pub fn is_default_params(&self) -> bool {
        let Value::Object(fields) = &self.0 else {
            return true;
        };
        fields
            .values()
            .all(|v| matches!(v.as_str(), Some("string" | "string?" | "string??")))
    }
}

impl From<Value> for SchemaItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Compiles a descriptor into a [`Validator`].
pub fn compile(item: &SchemaItem) -> Result<Validator, SchemaError> {
    let (root, _optional) = parse_node(&item.0, "")?;
    Ok(Validator::new(root))
}

/// Parses one descriptor node, returning its schema and whether it is optional.
fn parse_node(value: &Value, path: &str) -> Result<(Schema, bool), SchemaError> {
    match value {
        Value::String(name) => parse_type_name(name, path),
        Value::Array(items) => match items.as_slice() {
            [item] => {
                let (items, _) = parse_node(item, &format!("{path}/0"))?;
                Ok((
                    Schema::new(SchemaKind::Array {
                        items: Box::new(items),
                        min_items: None,
                        max_items: None,
                    }),
                    false,
                ))
            }
            _ => Err(SchemaError::invalid(
                path,
                "array shorthand takes exactly one item descriptor",
            )),
        },
        Value::Object(map) => match map.get("type").and_then(Value::as_str) {
            Some(name) if TYPE_NAMES.contains(&name) => parse_full(name, map, path),
            _ => Ok((Schema::new(parse_properties(map, path)?), false)),
        },
        other => Err(SchemaError::invalid(
            path,
            format!("unexpected descriptor {other}"),
        )),
    }
}

fn parse_type_name(raw: &str, path: &str) -> Result<(Schema, bool), SchemaError> {
    let (name, optional, nullable) = if let Some(name) = raw.strip_suffix("??") {
        (name, true, true)
    } else if let Some(name) = raw.strip_suffix('?') {
        (name, true, false)
    } else {
        (raw, false, false)
    };
    let kind = match name {
        "string" => SchemaKind::String {
            min_length: None,
            max_length: None,
            pattern: None,
        },
        "number" => SchemaKind::Number {
            minimum: None,
            maximum: None,
        },
        "integer" => SchemaKind::Integer {
            minimum: None,
            maximum: None,
        },
        "boolean" => SchemaKind::Boolean,
        "null" => SchemaKind::Null,
        "any" => SchemaKind::Any,
        "object" => SchemaKind::Object {
            properties: Vec::new(),
        },
        other => {
            return Err(SchemaError::UnknownType {
                path: display_path(path),
                name: other.to_string(),
            })
        }
    };
    Ok((Schema { kind, nullable }, optional))
}

fn parse_properties(map: &Map<String, Value>, path: &str) -> Result<SchemaKind, SchemaError> {
    let properties = map
        .iter()
        .map(|(name, descriptor)| {
            let (schema, optional) = parse_node(descriptor, &format!("{path}/{name}"))?;
            Ok(Property {
                name: name.clone(),
                schema,
                optional,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;
    Ok(SchemaKind::Object { properties })
}

fn parse_full(name: &str, map: &Map<String, Value>, path: &str) -> Result<(Schema, bool), SchemaError> {
    let optional = flag(map, "optional", path)?;
    let nullable = flag(map, "nullable", path)?;

    let kind = match name {
        "string" => SchemaKind::String {
            min_length: usize_keyword(map, "minLength", path)?,
            max_length: usize_keyword(map, "maxLength", path)?,
            pattern: match map.get("pattern") {
                None => None,
                Some(Value::String(p)) => {
                    Some(Regex::new(p).map_err(|source| SchemaError::Pattern {
                        path: display_path(path),
                        source,
                    })?)
                }
                Some(_) => return Err(SchemaError::invalid(path, "`pattern` must be a string")),
            },
        },
        "number" => SchemaKind::Number {
            minimum: f64_keyword(map, "minimum", path)?,
            maximum: f64_keyword(map, "maximum", path)?,
        },
        "integer" => SchemaKind::Integer {
            minimum: f64_keyword(map, "minimum", path)?,
            maximum: f64_keyword(map, "maximum", path)?,
        },
        "boolean" => SchemaKind::Boolean,
        "null" => SchemaKind::Null,
        "any" => SchemaKind::Any,
        "literal" => SchemaKind::Literal(
            map.get("value")
                .cloned()
                .ok_or_else(|| SchemaError::invalid(path, "`literal` needs a `value`"))?,
        ),
        "union" => {
            let variants = map
                .get("anyOf")
                .and_then(Value::as_array)
                .ok_or_else(|| SchemaError::invalid(path, "`union` needs an `anyOf` array"))?;
            SchemaKind::Union(
                variants
                    .iter()
                    .enumerate()
                    .map(|(i, v)| parse_node(v, &format!("{path}/anyOf/{i}")).map(|(s, _)| s))
                    .collect::<Result<_, _>>()?,
            )
        }
        "array" => {
            let items = match map.get("items") {
                Some(items) => parse_node(items, &format!("{path}/items"))?.0,
                None => Schema::new(SchemaKind::Any),
            };
            SchemaKind::Array {
                items: Box::new(items),
                min_items: usize_keyword(map, "minItems", path)?,
                max_items: usize_keyword(map, "maxItems", path)?,
            }
        }
        "object" => match map.get("properties") {
            None => SchemaKind::Object {
                properties: Vec::new(),
            },
            Some(Value::Object(props)) => parse_properties(props, &format!("{path}/properties"))?,
            Some(_) => return Err(SchemaError::invalid(path, "`properties` must be an object")),
        },
        other => {
            return Err(SchemaError::UnknownType {
                path: display_path(path),
                name: other.to_string(),
            })
        }
    };
    Ok((Schema { kind, nullable }, optional))
}

fn flag(map: &Map<String, Value>, key: &str, path: &str) -> Result<bool, SchemaError> {
    match map.get(key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchemaError::invalid(path, format!("`{key}` must be a boolean"))),
    }
}

fn usize_keyword(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<usize>, SchemaError> {
    match map.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| SchemaError::invalid(path, format!("`{key}` must be a non-negative integer"))),
    }
}

fn f64_keyword(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<f64>, SchemaError> {
    match map.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| SchemaError::invalid(path, format!("`{key}` must be a number"))),
    }
}
