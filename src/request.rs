//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

/// An incoming HTTP request with its body already collected.
///
/// Handlers receive the request by value — each request owns its body and
/// shares nothing with concurrent requests.
pub struct Request {
    pub(crate) parts: http::request::Parts,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    /// Set by the validation middleware: the body after schema checking,
    /// with undeclared fields stripped. `None` on unvalidated routes.
    pub(crate) json: Option<Value>,
}

impl Request {
    pub(crate) fn new(
        parts: http::request::Parts,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { parts, body, params, json: None }
    }

    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// The raw body bytes as received from the client.
    ///
    /// On routes behind [`middleware::validate`](crate::middleware::validate)
    /// you almost always want [`json`](Request::json) instead — the raw bytes
    /// still contain whatever undeclared fields the client sent.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The validated, normalized request body.
    ///
    /// `Some` only behind the validation middleware: the value has passed the
    /// route's schema and carries exactly the declared fields.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Attaches the normalized body. The middleware applies the validated
    /// value explicitly here rather than mutating the raw bytes in place.
    pub(crate) fn with_json(mut self, value: Value) -> Self {
        self.json = Some(value);
        self
    }
}
