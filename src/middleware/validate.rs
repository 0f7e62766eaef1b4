//! The request-body validation stage.

use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::schema::{Rejection, Schema, Violations};

/// Builds the validation middleware for one schema.
///
/// The schema is compiled and owned by the route; one [`Validate`] can wrap
/// any number of handlers that share the same body shape.
///
/// ```rust,no_run
/// use serde_json::json;
/// use vet::{JsonSchema, Router, middleware};
/// # async fn create_user(_req: vet::Request) -> vet::Response { vet::Response::text("") }
///
/// let schema = JsonSchema::new(json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": { "name": { "type": "string" } }
/// })).unwrap();
///
/// let app = Router::new()
///     .post("/users", middleware::validate(schema).wrap(create_user));
/// ```
pub fn validate<S: Schema>(schema: S) -> Validate<S> {
    Validate { schema: Arc::new(schema) }
}

/// A configured validation stage, ready to wrap route handlers.
///
/// Obtain via [`validate`]. Stateless between requests — the only thing it
/// holds is the shared, immutable schema.
pub struct Validate<S> {
    schema: Arc<S>,
}

impl<S: Schema> Validate<S> {
    /// Wraps `next` so it only runs on bodies the schema accepts.
    ///
    /// Per request:
    ///
    /// - body parses and passes the schema → `next` runs exactly once, with
    ///   the normalized value available as [`Request::json`];
    /// - body violates the schema → terminal `400 {"errors": [..]}` listing
    ///   every violation, `next` never runs;
    /// - the schema's checking procedure itself faults → terminal `500`,
    ///   never a dressed-up `400`.
    pub fn wrap(&self, next: impl Handler) -> impl Handler {
        let schema = Arc::clone(&self.schema);
        let next = next.into_boxed_handler();
        move |req: Request| {
            let schema = Arc::clone(&schema);
            let next = Arc::clone(&next);
            async move { run(schema, next, req).await }
        }
    }
}

async fn run<S: Schema>(schema: Arc<S>, next: BoxedHandler, req: Request) -> Response {
    let body = match parse_body(req.body()) {
        Ok(v) => v,
        Err(msg) => {
            debug!(path = req.path(), "request body rejected: not JSON");
            return Response::invalid(&Violations::from(vec![msg]));
        }
    };

    match schema.check(&body) {
        // The normalized value is applied to the request explicitly; the raw
        // bytes stay untouched.
        Ok(normalized) => next.call(req.with_json(normalized)).await,
        Err(Rejection::Invalid(violations)) => {
            debug!(
                path = req.path(),
                violations = violations.len(),
                "request body rejected"
            );
            Response::invalid(&violations)
        }
        Err(Rejection::Fault(reason)) => {
            // Not the client's fault; do not report it as one.
            error!(path = req.path(), %reason, "schema checking fault");
            Response::status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// An absent body validates like an empty object, so schemas with required
/// members report each of them individually.
fn parse_body(bytes: &[u8]) -> Result<Value, String> {
    if bytes.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| format!("request body is not valid JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::schema::JsonSchema;

    fn user_schema() -> JsonSchema {
        JsonSchema::new(json!({
            "type": "object",
            "required": ["name", "age"],
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            }
        }))
        .unwrap()
    }

    fn request(body: &str) -> Request {
        let (parts, ()) = http::Request::builder()
            .method(http::Method::POST)
            .uri("/users")
            .header("content-type", "application/json")
            .body(())
            .unwrap()
            .into_parts();
        Request::new(parts, Bytes::from(body.to_owned()), HashMap::new())
    }

    async fn send(stage: impl Handler, body: &str) -> Response {
        stage.into_boxed_handler().call(request(body)).await
    }

    /// A handler that counts its invocations and records the body it saw.
    fn probe(
        calls: &Arc<AtomicUsize>,
        seen: &Arc<Mutex<Option<Value>>>,
    ) -> impl Handler {
        let calls = Arc::clone(calls);
        let seen = Arc::clone(seen);
        move |req: Request| {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock().unwrap() = req.json().cloned();
                Response::status(StatusCode::CREATED)
            }
        }
    }

    fn errors_of(res: &Response) -> Vec<String> {
        let payload: Value = serde_json::from_slice(&res.body).unwrap();
        payload["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e.as_str().unwrap().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn conformant_body_runs_next_once_with_normalized_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(user_schema()).wrap(probe(&calls, &seen));
        let res = send(stage, r#"{"name":"Al","age":30,"extra":true}"#).await;

        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            seen.lock().unwrap().take().unwrap(),
            json!({ "name": "Al", "age": 30 })
        );
    }

    #[tokio::test]
    async fn violating_body_short_circuits_with_every_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(user_schema()).wrap(probe(&calls, &seen));
        let res = send(stage, r#"{"age":"thirty"}"#).await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let errors = errors_of(&res);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|m| m.contains("name")));
        assert!(errors.iter().any(|m| m.contains("age")));
    }

    #[tokio::test]
    async fn empty_body_reports_each_missing_required_field() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(user_schema()).wrap(probe(&calls, &seen));
        let res = send(stage, "").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(errors_of(&res).len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_answered_as_client_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(user_schema()).wrap(probe(&calls, &seen));
        let res = send(stage, "{not json").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(errors_of(&res).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn already_normalized_body_passes_through_identically() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(user_schema()).wrap(probe(&calls, &seen));
        let res = send(stage, r#"{"name":"Al","age":30}"#).await;

        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(
            seen.lock().unwrap().take().unwrap(),
            json!({ "name": "Al", "age": 30 })
        );
    }

    #[tokio::test]
    async fn schema_fault_surfaces_as_server_error() {
        struct Faulty;
        impl Schema for Faulty {
            fn check(&self, _body: &Value) -> Result<Value, Rejection> {
                Err(Rejection::Fault("reference resolver offline".to_owned()))
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(Faulty).wrap(probe(&calls, &seen));
        let res = send(stage, r#"{"name":"Al","age":30}"#).await;

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.body.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn one_stage_wraps_many_routes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let stage = validate(user_schema());
        let create = stage.wrap(probe(&calls, &seen));
        let update = stage.wrap(probe(&calls, &seen));

        send(create, r#"{"name":"Al","age":30}"#).await;
        send(update, r#"{"name":"Bo","age":31}"#).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
