//! Middleware layer.
//!
//! Middleware intercepts a request before the route handler runs and either
//! passes control on or answers in the handler's place. vet ships exactly
//! one middleware, because it has exactly one job: [`validate`], the
//! request-body gate.
//!
//! A wrapped handler only ever sees bodies its schema accepted — and sees
//! them normalized, with undeclared fields already stripped. Everything else
//! is answered at the gate with `400 {"errors": [..]}`, every violation
//! listed, and never reaches the handler.

mod validate;

pub use validate::{Validate, validate};
