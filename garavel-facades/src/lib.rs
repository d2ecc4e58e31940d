//! Garavel facades
//!
//! Static handles over shared services. A [`Facade`] names one service; the
//! first time it is used the [`Registry`] builds the service with `Default`
//! and every later use gets the same instance.
//!
//! ```rust
//! use garavel_facades::{Registry, Result, Service};
//! use garavel_support::Value;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Greeter;
//!
//! impl Service for Greeter {
//!     fn methods(&self) -> &'static [&'static str] {
//!         &["greet"]
//!     }
//!
//!     fn call(&self, _method: &str, _args: &[Value]) -> Result<Value> {
//!         Ok(Value::from("hello"))
//!     }
//! }
//!
//! let registry = Registry::new();
//! let a = registry.resolve::<Greeter>("greeter").unwrap();
//! let b = registry.resolve::<Greeter>("greeter").unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! assert_eq!(registry.invoke("greeter", "greet", &[]).unwrap(), Value::from("hello"));
//! assert!(registry.invoke("greeter", "shout", &[]).is_err());
//! ```

pub mod error;
pub mod facade;
pub mod registry;
pub mod service;

pub use error::{FacadeError, Result};
pub use facade::Facade;
pub use registry::{Registry, registry};
pub use service::{Args, Service};
