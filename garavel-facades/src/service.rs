// Service capability trait and argument helpers

use crate::{FacadeError, Result};
use garavel_support::{Array, Value};
use std::any::Any;

/// A shareable object that can sit behind a facade.
///
/// Services expose their operations twice: as ordinary typed methods for
/// callers holding the concrete type, and through [`Service::call`] for
/// callers that only know a method name. `methods` lists what `call`
/// understands.
pub trait Service: Any + Send + Sync {
    /// Method names accepted by [`Service::call`].
    fn methods(&self) -> &'static [&'static str];

    fn supports(&self, method: &str) -> bool {
        self.methods().contains(&method)
    }

    /// Dispatch `method` with loosely typed arguments.
    fn call(&self, method: &str, args: &[Value]) -> Result<Value>;
}

/// Positional argument access for [`Service::call`] implementations.
///
/// ```rust
/// use garavel_facades::Args;
/// use garavel_support::Value;
///
/// let values = [Value::from("/users"), Value::from(3)];
/// let args = Args::new("visit", &values);
/// assert_eq!(args.str(0).unwrap(), "/users");
/// assert_eq!(args.int(1).unwrap(), 3);
/// assert!(args.str(2).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    method: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(method: &'a str, values: &'a [Value]) -> Self {
        Self { method, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fail unless exactly `count` arguments were passed.
    pub fn expect(&self, count: usize) -> Result<()> {
        if self.values.len() == count {
            Ok(())
        } else {
            Err(FacadeError::invalid_arguments(
                self.method,
                format!("expected {count} argument(s), got {}", self.values.len()),
            ))
        }
    }

    pub fn value(&self, index: usize) -> Result<&'a Value> {
        self.values.get(index).ok_or_else(|| {
            FacadeError::invalid_arguments(self.method, format!("missing argument {index}"))
        })
    }

    pub fn str(&self, index: usize) -> Result<&'a str> {
        let value = self.value(index)?;
        value.as_str().ok_or_else(|| self.wrong_type(index, "string", value))
    }

    pub fn int(&self, index: usize) -> Result<i64> {
        let value = self.value(index)?;
        match value {
            Value::Int(i) => Ok(*i),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
            other => Err(self.wrong_type(index, "int", other)),
        }
    }

    pub fn array(&self, index: usize) -> Result<&'a Array> {
        let value = self.value(index)?;
        value.as_array().ok_or_else(|| self.wrong_type(index, "array", value))
    }

    fn wrong_type(&self, index: usize, expected: &str, got: &Value) -> FacadeError {
        FacadeError::invalid_arguments(
            self.method,
            format!("argument {index} must be {expected}, got {}", got.type_name()),
        )
    }
}
