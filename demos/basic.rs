//! Minimal vet example — a validated JSON endpoint next to a plain one.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -X POST http://localhost:3000/users \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"alice","age":30,"debug":true}'
//!        → 201, handler saw {"name":"alice","age":30}
//!   curl -X POST http://localhost:3000/users \
//!        -H 'content-type: application/json' \
//!        -d '{"age":"thirty"}'
//!        → 400 {"errors":[...]} — every violation, not just the first
//!   curl http://localhost:3000/users/42

use http::StatusCode;
use serde_json::json;
use vet::{JsonSchema, Request, Response, Router, Server, middleware};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let user_schema = JsonSchema::new(json!({
        "type": "object",
        "required": ["name", "age"],
        "properties": {
            "name": { "type": "string" },
            "age":  { "type": "number" }
        }
    }))
    .expect("user schema");

    let app = Router::new()
        .post("/users", middleware::validate(user_schema).wrap(create_user))
        .get("/users/{id}", get_user);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// POST /users — behind the gate. req.json() is the normalized body: it has
// passed the schema and carries only declared fields.
async fn create_user(req: Request) -> Response {
    let user = req.json().expect("validated route");
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(serde_json::to_vec(user).unwrap_or_default())
}

// GET /users/{id} — no body, no schema, no gate.
async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}
