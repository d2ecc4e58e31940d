// Global helper functions

use crate::facades;
use crate::{JsonResponse, Request, Response, Router};
use garavel_facades::{Facade, Result};
use garavel_log::debug;
use garavel_support::Value;
use std::sync::Arc;

/// The shared request.
pub fn request() -> Result<Arc<Request>> {
    facades::Request::instance()
}

/// The shared response.
pub fn response() -> Result<Arc<Response>> {
    facades::Response::instance()
}

/// The shared JSON response.
pub fn json_response() -> Result<Arc<JsonResponse>> {
    facades::JsonResponse::instance()
}

/// The shared router.
pub fn router() -> Result<Arc<Router>> {
    facades::Route::instance()
}

/// Render `value` as pretty JSON (falling back to its string form) and log
/// it at debug level.
pub fn dump(value: &Value) -> String {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    debug!("dump: {}", rendered);
    rendered
}

/// Dump `value` to stderr and exit with status 1.
pub fn dd(value: &Value) -> ! {
    eprintln!("{}", dump(value));
    std::process::exit(1)
}
