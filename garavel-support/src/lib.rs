//! Garavel support library
//!
//! Loosely typed [`Value`]s and ordered [`Array`]s, the string helpers in
//! [`text`], the array helpers in [`arr`], and the [`Normalizer`] that turns
//! stringly input into typed values.
//!
//! ```rust
//! use garavel_support::{arr, array, text, Value};
//!
//! let query = array! { "page" => "3", "debug" => "false", "ids" => "4|5" };
//! let typed = arr::normalize(query);
//!
//! assert_eq!(typed.get(&"page".into()), Some(&Value::Float(3.0)));
//! assert_eq!(typed.get(&"debug".into()), Some(&Value::Bool(false)));
//! assert_eq!(text::splitter("4|5"), Some('|'));
//! ```

mod value;

pub mod arr;
pub mod config;
pub mod error;
pub mod text;

pub use arr::Normalizer;
pub use config::{NormalizeConfig, PipeDetection};
pub use error::{Result, SupportError};
pub use value::{Array, Key, Value};
