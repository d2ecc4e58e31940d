// Incoming request state

use crate::{HttpError, Result};
use garavel_facades::{Args, FacadeError, Service};
use garavel_log::{debug, trace};
use garavel_support::{Array, Key, Value, arr, text};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct RequestState {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    input: Array,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            headers: HashMap::new(),
            input: Array::new(),
        }
    }
}

/// The current request: method, path, headers and raw input.
///
/// Input is stored as received and normalized on the way out by
/// [`Request::all`] and [`Request::input`].
#[derive(Debug, Default)]
pub struct Request {
    state: RwLock<RequestState>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace method, path and input from a request line target such as
    /// `/users?page=2&tags[]=a`.
    pub fn capture(&self, method: &str, uri: &str) -> Result<()> {
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        let input = parse_query(query)?;

        let mut state = self.state.write();
        state.method = method.to_ascii_uppercase();
        state.path = text::start_with(path, "/", false);
        state.input = input;
        debug!("captured {} {}", state.method, state.path);
        Ok(())
    }

    /// Add input on top of what is there; existing keys are overwritten.
    pub fn merge(&self, input: Array) {
        let mut state = self.state.write();
        for (key, value) in input {
            state.input.insert(key, value);
        }
    }

    pub fn method(&self) -> String {
        self.state.read().method.clone()
    }

    pub fn path(&self) -> String {
        self.state.read().path.clone()
    }

    /// Header lookup, case-insensitive.
    pub fn header(&self, name: &str) -> Option<String> {
        self.state.read().headers.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn set_header(&self, name: &str, value: &str) {
        self.state
            .write()
            .headers
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    /// Input exactly as captured.
    pub fn raw(&self) -> Array {
        self.state.read().input.clone()
    }

    /// Normalized input.
    pub fn all(&self) -> Array {
        arr::normalize(self.raw())
    }

    /// One normalized input value.
    pub fn input(&self, key: &str) -> Option<Value> {
        let key = Key::from(key);
        let raw = self.state.read().input.get(&key).cloned()?;
        let normalized = arr::normalize(Array::from(vec![raw]));
        normalized.values().next().cloned()
    }

    pub fn reset(&self) {
        *self.state.write() = RequestState::default();
    }
}

/// Parse a query string into an array.
///
/// `name[]=x` appends to a list under `name` and `name[key]=x` sets `key`
/// inside it; one level of nesting is supported.
pub fn parse_query(query: &str) -> Result<Array> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).map_err(|e| HttpError::InvalidQuery(e.to_string()))?;
    trace!("parsed {} query pair(s)", pairs.len());

    let mut input = Array::new();
    for (name, value) in pairs {
        let nested = name
            .split_once('[')
            .and_then(|(base, rest)| rest.strip_suffix(']').map(|inner| (base, inner)));

        let Some((base, inner)) = nested else {
            input.insert(name, value);
            continue;
        };

        let key = Key::from(base);
        if !matches!(input.get(&key), Some(Value::Array(_))) {
            input.insert(key.clone(), Array::new());
        }
        if let Some(list) = input.get_mut(&key).and_then(Value::as_array_mut) {
            if inner.is_empty() {
                list.push(value);
            } else {
                list.insert(inner, value);
            }
        }
    }
    Ok(input)
}

impl Service for Request {
    fn methods(&self) -> &'static [&'static str] {
        &[
            "capture",
            "merge",
            "method",
            "path",
            "header",
            "set_header",
            "raw",
            "all",
            "input",
            "reset",
        ]
    }

    fn call(&self, method: &str, args: &[Value]) -> garavel_facades::Result<Value> {
        let args = Args::new(method, args);
        match method {
            "capture" => {
                args.expect(2)?;
                self.capture(args.str(0)?, args.str(1)?)?;
                Ok(Value::Null)
            }
            "merge" => {
                self.merge(args.array(0)?.clone());
                Ok(Value::Null)
            }
            "method" => Ok(Value::from(self.method())),
            "path" => Ok(Value::from(self.path())),
            "header" => Ok(Value::from(self.header(args.str(0)?))),
            "set_header" => {
                args.expect(2)?;
                self.set_header(args.str(0)?, args.str(1)?);
                Ok(Value::Null)
            }
            "raw" => Ok(Value::from(self.raw())),
            "all" => Ok(Value::from(self.all())),
            "input" => Ok(self.input(args.str(0)?).unwrap_or_default()),
            "reset" => {
                self.reset();
                Ok(Value::Null)
            }
            other => Err(FacadeError::unknown_method("request", other)),
        }
    }
}
