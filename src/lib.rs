// Garavel - support library for the Garavel framework
//
// Loosely typed values with normalization, string and array helpers, and
// static facades over lazily built shared services.

pub use garavel_facades::{
    Args, Facade, FacadeError, Registry, Service, facade, registry,
};
pub use garavel_http::{
    HttpError, JsonResponse, Request, Response, Route, RouteMatch, Router, dd, dump, facades,
    json_response, parse_query, request, response, router,
};
pub use garavel_support::{
    Array, Key, NormalizeConfig, Normalizer, PipeDetection, SupportError, Value, arr, array,
    config, text,
};

pub use garavel_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Array, Facade, FacadeError, Key, Normalizer, Registry, Service, Value, arr, array,
        facade, facades, request, response, text,
    };
}
