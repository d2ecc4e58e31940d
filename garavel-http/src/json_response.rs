// JSON response payload

use crate::response::check_status;
use crate::{HttpError, Result};
use garavel_facades::{Args, FacadeError, Service};
use garavel_support::Value;
use parking_lot::RwLock;

pub const CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
struct JsonState {
    status: u16,
    data: Value,
}

impl Default for JsonState {
    fn default() -> Self {
        Self {
            status: 200,
            data: Value::Null,
        }
    }
}

/// A response whose body is a serialized [`Value`].
///
/// Lists serialize as JSON arrays and keyed arrays as objects.
#[derive(Debug, Default)]
pub struct JsonResponse {
    state: RwLock<JsonState>,
}

impl JsonResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A 200 response carrying `data`.
    pub fn with_data(data: impl Into<Value>) -> Self {
        let response = Self::new();
        response.set_data(data);
        response
    }

    pub fn data(&self) -> Value {
        self.state.read().data.clone()
    }

    pub fn set_data(&self, data: impl Into<Value>) {
        self.state.write().data = data.into();
    }

    pub fn status(&self) -> u16 {
        self.state.read().status
    }

    pub fn set_status(&self, code: i64) -> Result<()> {
        self.state.write().status = check_status(code)?;
        Ok(())
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// The serialized body.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.state.read().data)
            .map_err(|e| HttpError::Serialization(e.to_string()))
    }

    pub fn reset(&self) {
        *self.state.write() = JsonState::default();
    }
}

impl Service for JsonResponse {
    fn methods(&self) -> &'static [&'static str] {
        &[
            "data",
            "set_data",
            "status",
            "set_status",
            "content_type",
            "to_json",
            "reset",
        ]
    }

    fn call(&self, method: &str, args: &[Value]) -> garavel_facades::Result<Value> {
        let args = Args::new(method, args);
        match method {
            "data" => Ok(self.data()),
            "set_data" => {
                self.set_data(args.value(0)?.clone());
                Ok(Value::Null)
            }
            "status" => Ok(Value::Int(self.status().into())),
            "set_status" => {
                self.set_status(args.int(0)?)?;
                Ok(Value::Null)
            }
            "content_type" => Ok(Value::from(self.content_type())),
            "to_json" => Ok(Value::from(self.to_json()?)),
            "reset" => {
                self.reset();
                Ok(Value::Null)
            }
            other => Err(FacadeError::unknown_method("json_response", other)),
        }
    }
}
