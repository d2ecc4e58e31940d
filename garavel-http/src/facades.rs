//! Facades over the HTTP services.
//!
//! Each one resolves its service from the process-wide registry under the
//! service's type name.

use garavel_facades::facade;

facade!(
    /// The shared [`crate::Request`].
    pub struct Request => crate::request::Request
);

facade!(
    /// The shared [`crate::Response`].
    pub struct Response => crate::response::Response
);

facade!(
    /// The shared [`crate::JsonResponse`].
    pub struct JsonResponse => crate::json_response::JsonResponse
);

facade!(
    /// The shared [`crate::Router`].
    pub struct Route => crate::router::Router
);
