//! Compact schema descriptors and validators for Marci.
//!
//! Routes describe the shape of their params, query and body with a small
//! JSON grammar (see [`SchemaItem`]). Descriptors are compiled once, at route
//! registration, into a [`Validator`] that checks values, reports the first
//! failing field, or coerces raw string input into typed values.
//!
//! ```rust
//! use marci_schema::{schema, validation_error_body};
//! use serde_json::json;
//!
//! let body = schema(json!({ "name": { "type": "string" } })).compile().unwrap();
//! let err = body.first_error(&json!({})).unwrap();
//!
//! assert_eq!(
//!     validation_error_body(&err, Some("body")),
//!     r#"{"cause":"Validation error","where":"body","fields":{"name":{"message":"Expected required property"}}}"#
//! );
//! ```

mod descriptor;
mod error;
mod validator;

pub use descriptor::{compile, schema, SchemaItem};
pub use error::{validation_error_body, FieldError, SchemaError};
pub use validator::{Property, Schema, SchemaKind, Validator};
