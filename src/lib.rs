//! # vet
//!
//! Schema-driven JSON request-body validation middleware for hyper services.
//! One gate. Nothing else.
//!
//! ## The contract
//!
//! Your schema owns the shape. Your handlers own the logic. vet owns the
//! gate between them:
//!
//! - a body that passes its route's schema reaches the handler **normalized**
//!   — undeclared fields stripped, exactly the declared shape, read via
//!   [`Request::json`];
//! - a body that fails is answered with `400 {"errors": [..]}` listing
//!   **every** violation at once, and the handler never runs;
//! - a schema whose own checking procedure faults is answered `500` — a
//!   server bug is not reported as a client mistake.
//!
//! Those behaviors are constants, not configuration. There is nothing to
//! tune and therefore nothing to get wrong per route.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use serde_json::json;
//! use vet::{JsonSchema, Request, Response, Router, Server, middleware};
//!
//! #[tokio::main]
//! async fn main() {
//!     let schema = JsonSchema::new(json!({
//!         "type": "object",
//!         "required": ["name", "age"],
//!         "properties": {
//!             "name": { "type": "string" },
//!             "age":  { "type": "number" }
//!         }
//!     }))
//!     .expect("user schema");
//!
//!     let app = Router::new()
//!         .post("/users", middleware::validate(schema).wrap(create_user));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     // Behind the gate: the body passed the schema and carries only
//!     // declared fields.
//!     let user = req.json().expect("validated route");
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .json(serde_json::to_vec(user).unwrap_or_default())
//! }
//! ```
//!
//! ## Bring your own schema library
//!
//! [`JsonSchema`] plugs the [`jsonschema`] crate in behind the [`Schema`]
//! contract. Anything that can say "normalized value or list of violations"
//! can stand in the same spot — implement [`Schema`] and hand it to
//! [`middleware::validate`].

mod error;
mod handler;
mod request;
mod response;
mod router;
mod schema;
mod server;

pub mod middleware;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use schema::{JsonSchema, Rejection, Schema, Violations};
pub use server::Server;
