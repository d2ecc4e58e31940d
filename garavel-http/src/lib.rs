//! Garavel HTTP services
//!
//! In-memory [`Request`], [`Response`], [`JsonResponse`] and [`Router`]
//! services, the [`facades`] that share them process-wide, and the helper
//! functions [`request`], [`response`], [`json_response`], [`router`],
//! [`dump`] and [`dd`].
//!
//! ```rust
//! use garavel_facades::Facade;
//! use garavel_http::{facades, request};
//! use garavel_support::Value;
//!
//! let req = request().unwrap();
//! req.capture("GET", "/users?page=2").unwrap();
//!
//! assert_eq!(req.input("page"), Some(Value::Float(2.0)));
//! assert_eq!(
//!     facades::Request::call("path", &[]).unwrap(),
//!     Value::from("/users")
//! );
//! ```

pub mod error;
pub mod facades;
pub mod helpers;
pub mod json_response;
pub mod request;
pub mod response;
pub mod router;

pub use error::{HttpError, Result};
pub use helpers::{dd, dump, json_response, request, response, router};
pub use json_response::JsonResponse;
pub use request::{Request, parse_query};
pub use response::Response;
pub use router::{Route, RouteMatch, Router};
