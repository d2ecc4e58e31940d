// Route table

use garavel_facades::{Args, FacadeError, Service};
use garavel_log::{debug, trace};
use garavel_support::{Array, Value, array, text};
use parking_lot::RwLock;

/// A registered route. `{name}` segments in the pattern capture one path
/// segment each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: String,
    pub pattern: String,
    pub name: String,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub name: String,
    pub params: Array,
}

impl RouteMatch {
    fn into_value(self) -> Value {
        Value::from(array! {
            "name" => self.name,
            "params" => self.params,
        })
    }
}

/// Leading slash, no trailing slash, no empty segments.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    text::start_with(&segments.join("/"), "/", false)
}

fn match_pattern(pattern: &str, path: &str) -> Option<Array> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = Array::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        match expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => {
                params.insert(param, *actual);
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

/// Ordered route table; the first registered match wins.
#[derive(Debug, Default)]
pub struct Router {
    routes: RwLock<Vec<Route>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` for `method` (`ANY` matches every method).
    pub fn add(&self, method: &str, pattern: &str, name: &str) {
        let route = Route {
            method: method.to_ascii_uppercase(),
            pattern: normalize_path(pattern),
            name: name.to_string(),
        };
        debug!("route {} {} -> {}", route.method, route.pattern, route.name);
        self.routes.write().push(route);
    }

    pub fn get(&self, pattern: &str, name: &str) {
        self.add("GET", pattern, name);
    }

    pub fn post(&self, pattern: &str, name: &str) {
        self.add("POST", pattern, name);
    }

    pub fn any(&self, pattern: &str, name: &str) {
        self.add("ANY", pattern, name);
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.read().clone()
    }

    /// Find the route for `method` and `path`.
    pub fn resolve(&self, method: &str, path: &str) -> Option<RouteMatch> {
        let method = method.to_ascii_uppercase();
        let path = normalize_path(path);
        let found = self
            .routes
            .read()
            .iter()
            .filter(|route| route.method == method || route.method == "ANY")
            .find_map(|route| {
                match_pattern(&route.pattern, &path).map(|params| RouteMatch {
                    name: route.name.clone(),
                    params,
                })
            });
        trace!("{} {} matched {:?}", method, path, found.as_ref().map(|m| &m.name));
        found
    }

    pub fn reset(&self) {
        self.routes.write().clear();
    }
}

impl Service for Router {
    fn methods(&self) -> &'static [&'static str] {
        &["add", "get", "post", "any", "resolve", "routes", "reset"]
    }

    fn call(&self, method: &str, args: &[Value]) -> garavel_facades::Result<Value> {
        let args = Args::new(method, args);
        match method {
            "add" => {
                args.expect(3)?;
                self.add(args.str(0)?, args.str(1)?, args.str(2)?);
                Ok(Value::Null)
            }
            "get" | "post" | "any" => {
                args.expect(2)?;
                self.add(method, args.str(0)?, args.str(1)?);
                Ok(Value::Null)
            }
            "resolve" => {
                args.expect(2)?;
                Ok(self
                    .resolve(args.str(0)?, args.str(1)?)
                    .map_or(Value::Null, RouteMatch::into_value))
            }
            "routes" => Ok(Value::from(
                self.routes()
                    .into_iter()
                    .map(|route| {
                        Value::from(array! {
                            "method" => route.method,
                            "pattern" => route.pattern,
                            "name" => route.name,
                        })
                    })
                    .collect::<Vec<_>>(),
            )),
            "reset" => {
                self.reset();
                Ok(Value::Null)
            }
            other => Err(FacadeError::unknown_method("router", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("users/"), "/users");
        assert_eq!(normalize_path("//users//{id}/"), "/users/{id}");
    }

    #[test]
    fn test_static_and_param_routes() {
        let router = Router::new();
        router.get("/users", "users.index");
        router.get("/users/{id}", "users.show");
        router.post("/users", "users.store");

        assert_eq!(router.resolve("GET", "/users").unwrap().name, "users.index");
        assert_eq!(router.resolve("post", "/users/").unwrap().name, "users.store");

        let show = router.resolve("GET", "/users/42").unwrap();
        assert_eq!(show.name, "users.show");
        assert_eq!(show.params, array! { "id" => "42" });

        assert!(router.resolve("DELETE", "/users/42").is_none());
        assert!(router.resolve("GET", "/posts").is_none());
    }

    #[test]
    fn test_first_match_wins_and_any() {
        let router = Router::new();
        router.get("/items/new", "items.create");
        router.get("/items/{id}", "items.show");
        router.any("/health", "health");

        assert_eq!(router.resolve("GET", "/items/new").unwrap().name, "items.create");
        assert_eq!(router.resolve("GET", "/items/0").unwrap().name, "items.show");
        assert_eq!(router.resolve("HEAD", "/health").unwrap().name, "health");
    }

    #[test]
    fn test_call_dispatch() {
        let router = Router::new();
        router
            .call("get", &[Value::from("/posts/{slug}"), Value::from("posts.show")])
            .unwrap();

        let found = router
            .call("resolve", &[Value::from("GET"), Value::from("/posts/hello")])
            .unwrap();
        assert_eq!(
            found,
            Value::from(array! {
                "name" => "posts.show",
                "params" => Value::from(array! { "slug" => "hello" }),
            })
        );

        let missing = router
            .call("resolve", &[Value::from("GET"), Value::from("/nope")])
            .unwrap();
        assert_eq!(missing, Value::Null);

        assert_eq!(router.routes().len(), 1);
        router.call("reset", &[]).unwrap();
        assert!(router.routes().is_empty());
    }
}
