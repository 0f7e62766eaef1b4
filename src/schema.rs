//! The validation contract and its built-in JSON Schema implementation.
//!
//! A [`Schema`] answers one question per request body: *does this value have
//! the declared shape, and if so, what does it look like with everything
//! undeclared removed?* The middleware in [`crate::middleware`] is a thin
//! adapter around that answer — all validation semantics live here.
//!
//! The built-in implementation, [`JsonSchema`], delegates to the
//! [`jsonschema`] crate. Its behavior is fixed, not configurable:
//!
//! - **every** violated constraint is reported, not just the first;
//! - undeclared fields are permitted on input and stripped from the output;
//! - schemas are compiled once, at construction, so a malformed schema fails
//!   the route registration rather than the requests behind it.

use serde_json::Value;

use crate::error::Error;

// ── Violations ────────────────────────────────────────────────────────────────

/// The ordered list of ways a request body failed its schema.
///
/// One human-readable message per violated constraint, in the order the
/// checking procedure reported them. Wording is owned by the schema
/// implementation; callers should treat messages as opaque text for the
/// client that sent the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Violations {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

impl IntoIterator for Violations {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ── Rejection ─────────────────────────────────────────────────────────────────

/// Why a [`Schema`] refused a body.
///
/// The two variants travel very different roads:
///
/// - [`Invalid`](Rejection::Invalid) is caused by the client and answered
///   with `400 {"errors": [..]}` — it never escalates past the middleware.
/// - [`Fault`](Rejection::Fault) means the checking procedure itself broke.
///   That is not the client's doing, so the middleware answers `500` and
///   logs it rather than dressing it up as a validation failure.
///
/// [`JsonSchema`] never returns `Fault` — compilation happens up front in
/// [`JsonSchema::new`]. The variant exists for custom [`Schema`]
/// implementations whose checking can fail at request time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The body violates the schema in the listed ways.
    Invalid(Violations),
    /// The checking procedure failed for a reason unrelated to the body.
    Fault(String),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// A decidable description of the accepted shape of a request body.
///
/// The contract: given a body, either return the **normalized** value (same
/// logical content, undeclared fields removed) or every violation at once.
/// Implementations must be pure per call — the same body always yields the
/// same outcome, and nothing is retained between calls. The compiled schema
/// is shared immutably across concurrent requests.
pub trait Schema: Send + Sync + 'static {
    /// Checks `body` and returns the normalized value or the full list of
    /// violations.
    fn check(&self, body: &Value) -> Result<Value, Rejection>;
}

// ── JsonSchema ────────────────────────────────────────────────────────────────

/// A [`Schema`] backed by a compiled JSON Schema.
///
/// ```rust
/// use serde_json::json;
/// use vet::{JsonSchema, Schema};
///
/// let schema = JsonSchema::new(json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": { "name": { "type": "string" } }
/// })).unwrap();
///
/// let body = json!({ "name": "Al", "debug": true });
/// assert_eq!(schema.check(&body).unwrap(), json!({ "name": "Al" }));
/// ```
#[derive(Debug)]
pub struct JsonSchema {
    raw: Value,
    compiled: jsonschema::Validator,
}

impl JsonSchema {
    /// Compiles `schema`. Call this once per route, at registration time —
    /// a schema that does not compile is a deployment bug, and surfacing it
    /// here keeps request-time checking infallible.
    pub fn new(schema: Value) -> Result<Self, Error> {
        let compiled =
            jsonschema::validator_for(&schema).map_err(|e| Error::Schema(e.to_string()))?;
        Ok(Self { raw: schema, compiled })
    }
}

impl Schema for JsonSchema {
    fn check(&self, body: &Value) -> Result<Value, Rejection> {
        // Strip first, validate the stripped value. Undeclared fields can
        // then neither raise violations (even under
        // `additionalProperties: false`) nor survive into the output.
        let normalized = strip(&self.raw, body);

        let messages: Vec<String> = self
            .compiled
            .iter_errors(&normalized)
            .map(|e| violation(&e))
            .collect();

        if messages.is_empty() {
            Ok(normalized)
        } else {
            Err(Rejection::Invalid(Violations(messages)))
        }
    }
}

/// Removes object members not named in the schema's `properties`, recursing
/// into declared sub-objects and array `items`.
///
/// A schema node without `properties` declares nothing about member names, so
/// the value below it passes through untouched.
fn strip(schema: &Value, value: &Value) -> Value {
    if let (Some(props), Some(members)) = (
        schema.get("properties").and_then(Value::as_object),
        value.as_object(),
    ) {
        let kept: serde_json::Map<String, Value> = members
            .iter()
            .filter_map(|(name, member)| {
                props.get(name).map(|sub| (name.clone(), strip(sub, member)))
            })
            .collect();
        return Value::Object(kept);
    }

    if let (Some(items), Some(elems)) = (schema.get("items"), value.as_array()) {
        return Value::Array(elems.iter().map(|e| strip(items, e)).collect());
    }

    value.clone()
}

/// One violation message. The library's wording, prefixed with the dotted
/// path of the offending member so every message names its field.
fn violation(err: &jsonschema::ValidationError<'_>) -> String {
    let pointer = err.instance_path.to_string();
    if pointer.is_empty() {
        // Root-level errors (`required`, a mistyped root) already name the
        // member or describe the whole body.
        err.to_string()
    } else {
        let path = pointer.trim_start_matches('/').replace('/', ".");
        format!("\"{path}\": {err}")
    }
}
