//! Compiled schemas and validation.

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::error::FieldError;

/// A compiled schema node.
#[derive(Debug, Clone)]
pub struct Schema {
    /// The type and its constraints.
    pub kind: SchemaKind,
    /// Whether `null` is also accepted.
    pub nullable: bool,
}

/// Type-specific part of a [`Schema`].
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// String with optional length bounds and pattern.
    String {
        /// Minimum length in characters.
        min_length: Option<usize>,
        /// Maximum length in characters.
        max_length: Option<usize>,
        /// Regular expression the value must match.
        pattern: Option<Regex>,
    },
    /// Any JSON number.
    Number {
        /// Inclusive lower bound.
        minimum: Option<f64>,
        /// Inclusive upper bound.
        maximum: Option<f64>,
    },
    /// A number without fractional part.
    Integer {
        /// Inclusive lower bound.
        minimum: Option<f64>,
        /// Inclusive upper bound.
        maximum: Option<f64>,
    },
    /// `true` or `false`.
    Boolean,
    /// `null` only.
    Null,
    /// Accepts anything.
    Any,
    /// Exactly this value.
    Literal(Value),
    /// Array whose items all match one schema.
    Array {
        /// Item schema.
        items: Box<Schema>,
        /// Minimum item count.
        min_items: Option<usize>,
        /// Maximum item count.
        max_items: Option<usize>,
    },
    /// Object with declared properties, in declaration order.
    Object {
        /// Declared properties.
        properties: Vec<Property>,
    },
    /// Matches if any variant matches.
    Union(Vec<Schema>),
}

/// A declared object property.
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Schema of its value.
    pub schema: Schema,
    /// Whether the property may be absent.
    pub optional: bool,
}

impl Schema {
    pub(crate) fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }
}

/// A compiled, reusable validator.
///
/// # Example
///
/// ```rust
/// use marci_schema::schema;
/// use serde_json::json;
///
/// let validator = schema(json!({ "name": { "type": "string", "minLength": 1 } }))
///     .compile()
///     .unwrap();
///
/// assert!(validator.check(&json!({ "name": "Ann" })));
///
/// let err = validator.first_error(&json!({ "name": 7 })).unwrap();
/// assert_eq!(err.path, "/name");
/// assert_eq!(err.message, "Expected string");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    root: Schema,
}

impl Validator {
    pub(crate) fn new(root: Schema) -> Self {
        Self { root }
    }

    /// Returns the compiled root schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.root
    }

    /// Returns true if `value` satisfies the schema.
    #[must_use]
    pub fn check(&self, value: &Value) -> bool {
        self.first_error(value).is_none()
    }

    /// Returns the first violation, walking depth first in declaration order.
    ///
    /// Missing required properties of an object are reported before any
    /// problem inside the properties that are present.
    #[must_use]
    pub fn first_error(&self, value: &Value) -> Option<FieldError> {
        validate_at_path(&self.root, value, "").err()
    }

    /// Converts, cleans, then validates `value`.
    ///
    /// Strings are converted to the declared scalar type where they parse
    /// (`"42"` becomes `42` for a number, `"true"` becomes `true` for a
    /// boolean), and undeclared object properties are dropped. Used for path
    /// params and query strings, whose raw values are always strings.
    pub fn parse(&self, value: Value) -> Result<Value, FieldError> {
        let mut value = convert(&self.root, value);
        clean(&self.root, &mut value);
        validate_at_path(&self.root, &value, "")?;
        Ok(value)
    }
}

fn validate_at_path(schema: &Schema, value: &Value, path: &str) -> Result<(), FieldError> {
    if value.is_null() && schema.nullable {
        return Ok(());
    }
    let fail = |message: String| Err(FieldError::new(path, message));

    match &schema.kind {
        SchemaKind::Any => Ok(()),

        SchemaKind::Null => {
            if value.is_null() {
                Ok(())
            } else {
                fail("Expected null".into())
            }
        }

        SchemaKind::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                fail("Expected boolean".into())
            }
        }

        SchemaKind::String {
            min_length,
            max_length,
            pattern,
        } => {
            let Some(s) = value.as_str() else {
                return fail("Expected string".into());
            };
            let len = s.chars().count();
            if let Some(min) = min_length {
                if len < *min {
                    return fail(format!("Expected string length greater or equal to {min}"));
                }
            }
            if let Some(max) = max_length {
                if len > *max {
                    return fail(format!("Expected string length less or equal to {max}"));
                }
            }
            if let Some(re) = pattern {
                if !re.is_match(s) {
                    return fail(format!("Expected string to match '{}'", re.as_str()));
                }
            }
            Ok(())
        }

        SchemaKind::Number { minimum, maximum } => {
            let Some(n) = value.as_f64() else {
                return fail("Expected number".into());
            };
            check_bounds(n, *minimum, *maximum, path)
        }

        SchemaKind::Integer { minimum, maximum } => {
            let Some(n) = value.as_f64().filter(|n| n.fract() == 0.0) else {
                return fail("Expected integer".into());
            };
            check_bounds(n, *minimum, *maximum, path)
        }

        SchemaKind::Literal(expected) => {
            if value == expected {
                Ok(())
            } else {
                fail(format!("Expected {expected}"))
            }
        }

        SchemaKind::Array {
            items,
            min_items,
            max_items,
        } => {
            let Some(arr) = value.as_array() else {
                return fail("Expected array".into());
            };
            if let Some(min) = min_items {
                if arr.len() < *min {
                    return fail(format!("Expected array length to be greater or equal to {min}"));
                }
            }
            if let Some(max) = max_items {
                if arr.len() > *max {
                    return fail(format!("Expected array length to be less or equal to {max}"));
                }
            }
            for (idx, item) in arr.iter().enumerate() {
                validate_at_path(items, item, &format!("{path}/{idx}"))?;
            }
            Ok(())
        }

        SchemaKind::Object { properties } => {
            let Some(obj) = value.as_object() else {
                return fail("Expected object".into());
            };
            for prop in properties.iter().filter(|p| !p.optional) {
                if !obj.contains_key(&prop.name) {
                    return Err(FieldError::new(
                        child_path(path, &prop.name),
                        "Expected required property",
                    ));
                }
            }
            for prop in properties {
                if let Some(prop_value) = obj.get(&prop.name) {
                    validate_at_path(&prop.schema, prop_value, &child_path(path, &prop.name))?;
                }
            }
            Ok(())
        }

        SchemaKind::Union(variants) => {
            if variants
                .iter()
                .any(|v| validate_at_path(v, value, path).is_ok())
            {
                Ok(())
            } else {
                fail("Expected union value".into())
            }
        }
    }
}

fn check_bounds(n: f64, minimum: Option<f64>, maximum: Option<f64>, path: &str) -> Result<(), FieldError> {
    if let Some(min) = minimum {
        if n < min {
            return Err(FieldError::new(
                path,
                format!("Expected number to be greater or equal to {min}"),
            ));
        }
    }
    if let Some(max) = maximum {
        if n > max {
            return Err(FieldError::new(
                path,
                format!("Expected number to be less or equal to {max}"),
            ));
        }
    }
    Ok(())
}

/// Appends an escaped JSON pointer token.
fn child_path(path: &str, key: &str) -> String {
    format!("{path}/{}", key.replace('~', "~0").replace('/', "~1"))
}

fn convert(schema: &Schema, value: Value) -> Value {
    if schema.nullable && value.as_str() == Some("null") {
        return Value::Null;
    }
    match (&schema.kind, value) {
        (SchemaKind::Number { .. }, Value::String(s)) => parse_number(&s).unwrap_or(Value::String(s)),
        (SchemaKind::Integer { .. }, Value::String(s)) => s
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or(Value::String(s)),
        (SchemaKind::Boolean, Value::String(s)) => match s.as_str() {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => Value::String(s),
        },
        (SchemaKind::Null, Value::String(s)) if s == "null" => Value::Null,
        (SchemaKind::Array { items, .. }, Value::Array(arr)) => {
            Value::Array(arr.into_iter().map(|v| convert(items, v)).collect())
        }
        (SchemaKind::Object { properties }, Value::Object(obj)) => {
            let converted: Map<String, Value> = obj
                .into_iter()
                .map(|(k, v)| {
                    let v = match properties.iter().find(|p| p.name == k) {
                        Some(prop) => convert(&prop.schema, v),
                        None => v,
                    };
                    (k, v)
                })
                .collect();
            Value::Object(converted)
        }
        (_, value) => value,
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(Value::from(n));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn clean(schema: &Schema, value: &mut Value) {
    match (&schema.kind, value) {
        (SchemaKind::Object { properties }, Value::Object(obj)) => {
            obj.retain(|k, _| properties.iter().any(|p| &p.name == k));
            for prop in properties {
                if let Some(v) = obj.get_mut(&prop.name) {
                    clean(&prop.schema, v);
                }
            }
        }
        (SchemaKind::Array { items, .. }, Value::Array(arr)) => {
            for item in arr {
                clean(items, item);
            }
        }
        _ => {}
    }
}
