// Outgoing response state

use crate::{HttpError, Result};
use garavel_facades::{Args, FacadeError, Service};
use garavel_support::{Array, Key, Value};
use parking_lot::RwLock;

#[derive(Debug, Clone)]
struct ResponseState {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Default for ResponseState {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

/// Status, headers and body being prepared for the client.
#[derive(Debug, Default)]
pub struct Response {
    state: RwLock<ResponseState>,
}

pub(crate) fn check_status(code: i64) -> Result<u16> {
    u16::try_from(code)
        .ok()
        .filter(|code| (100..=599).contains(code))
        .ok_or(HttpError::InvalidStatus(code))
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> u16 {
        self.state.read().status
    }

    /// Set the status code; only 100-599 is accepted.
    pub fn set_status(&self, code: i64) -> Result<()> {
        self.state.write().status = check_status(code)?;
        Ok(())
    }

    /// Header lookup, case-insensitive.
    pub fn header(&self, name: &str) -> Option<String> {
        self.state
            .read()
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    /// Set a header, replacing any existing one with the same name.
    pub fn set_header(&self, name: &str, value: &str) {
        let mut state = self.state.write();
        match state.headers.iter().position(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(index) => state.headers[index].1 = value.to_string(),
            None => state.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Headers in the order they were first set.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.state.read().headers.clone()
    }

    pub fn body(&self) -> String {
        self.state.read().body.clone()
    }

    pub fn set_body(&self, body: &str) {
        self.state.write().body = body.to_string();
    }

    pub fn reset(&self) {
        *self.state.write() = ResponseState::default();
    }
}

impl Service for Response {
    fn methods(&self) -> &'static [&'static str] {
        &[
            "status",
            "set_status",
            "header",
            "set_header",
            "headers",
            "body",
            "set_body",
            "reset",
        ]
    }

    fn call(&self, method: &str, args: &[Value]) -> garavel_facades::Result<Value> {
        let args = Args::new(method, args);
        match method {
            "status" => Ok(Value::Int(self.status().into())),
            "set_status" => {
                self.set_status(args.int(0)?)?;
                Ok(Value::Null)
            }
            "header" => Ok(Value::from(self.header(args.str(0)?))),
            "set_header" => {
                args.expect(2)?;
                self.set_header(args.str(0)?, args.str(1)?);
                Ok(Value::Null)
            }
            "headers" => Ok(Value::from(
                self.headers()
                    .into_iter()
                    .map(|(k, v)| (Key::from(k), Value::from(v)))
                    .collect::<Array>(),
            )),
            "body" => Ok(Value::from(self.body())),
            "set_body" => {
                self.set_body(args.str(0)?);
                Ok(Value::Null)
            }
            "reset" => {
                self.reset();
                Ok(Value::Null)
            }
            other => Err(FacadeError::unknown_method("response", other)),
        }
    }
}
