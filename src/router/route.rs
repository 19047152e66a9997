//! Leaf route declarations and deterministic name derivation.

use crate::http::{Method, MethodSet};
use crate::pattern::placeholder_name;

/// A single endpoint declaration: URL fragment, methods, handler and middleware.
///
/// The handler `H` and middleware `M` are opaque to the router; they are cloned into the
/// compiled [`RouteTable`](super::RouteTable) and handed back on dispatch.
///
/// # Examples
///
/// ```rust
/// use routetree::{Method, Route};
///
/// let route: Route<&str, ()> = Route::new("/users/{id}", "show_user")
///     .method(Method::Get)
///     .method(Method::Delete)
///     .name("users.show")
///     .description("Fetch or delete one user");
///
/// assert_eq!(route.methods(), [Method::Get, Method::Delete]);
/// assert_eq!(route.get_name(), Some("users.show"));
/// ```
#[derive(Debug, Clone)]
pub struct Route<H, M> {
    url: String,
    handler: H,
    methods: Vec<Method>,
    middleware: Vec<M>,
    name: Option<String>,
    description: Option<String>,
}

impl<H, M> Route<H, M> {
    /// Create a route with no methods, middleware, or name.
    ///
    /// At least one method must be added before the route is compiled.
    pub fn new(url: impl Into<String>, handler: H) -> Self {
        Self {
            url: url.into(),
            handler,
            methods: Vec::new(),
            middleware: Vec::new(),
            name: None,
            description: None,
        }
    }

    /// A `GET` route that also declares `HEAD`.
    ///
    /// Both methods appear in the derived name, e.g. `get.head.users`.
    pub fn get(url: impl Into<String>, handler: H) -> Self {
        Self::new(url, handler).with_methods([Method::Get, Method::Head])
    }

    pub fn post(url: impl Into<String>, handler: H) -> Self {
        Self::new(url, handler).method(Method::Post)
    }

    pub fn put(url: impl Into<String>, handler: H) -> Self {
        Self::new(url, handler).method(Method::Put)
    }

    pub fn patch(url: impl Into<String>, handler: H) -> Self {
        Self::new(url, handler).method(Method::Patch)
    }

    pub fn delete(url: impl Into<String>, handler: H) -> Self {
        Self::new(url, handler).method(Method::Delete)
    }

    pub fn options(url: impl Into<String>, handler: H) -> Self {
        Self::new(url, handler).method(Method::Options)
    }

    /// Declare one more accepted method. Repeats are ignored.
    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    /// Declare several methods, keeping their order.
    pub fn with_methods(self, methods: impl IntoIterator<Item = Method>) -> Self {
        methods.into_iter().fold(self, Self::method)
    }

    /// Append middleware that runs after any inherited from enclosing groups.
    pub fn middleware(mut self, middleware: M) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn with_middleware(mut self, middleware: impl IntoIterator<Item = M>) -> Self {
        self.middleware.extend(middleware);
        self
    }

    /// Set an explicit name, replacing the derived one.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The URL fragment as declared, before any group prefix is applied.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Declared methods in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn get_middleware(&self) -> &[M] {
        &self.middleware
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Methods this route answers: the declared ones, plus `HEAD` whenever `GET` is
    /// declared.
    pub fn accepted_methods(&self) -> MethodSet {
        let mut set: MethodSet = self.methods.iter().copied().collect();
        if set.contains(Method::Get) {
            set.insert(Method::Head);
        }
        set
    }
}

/// Derive a route name from its declared methods and resolved URL.
///
/// The name is the lowercased method list joined by `.`, followed by each non-empty path
/// segment. A segment that is a single placeholder `{x}` becomes `p_x`. A URL with no
/// segments uses `default`.
///
/// # Examples
///
/// ```
/// use routetree::{Method, derive_name};
///
/// assert_eq!(derive_name(&[Method::Patch], "/user/{id}"), "patch.user.p_id");
/// assert_eq!(derive_name(&[Method::Get, Method::Head], "/"), "get.head.default");
/// ```
pub fn derive_name(methods: &[Method], resolved_url: &str) -> String {
    let methods = methods
        .iter()
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(".");

    let segments: Vec<String> = resolved_url
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| match placeholder_name(segment) {
            Some(param) => format!("p_{param}"),
            None => segment.to_owned(),
        })
        .collect();

    if segments.is_empty() {
        format!("{methods}.default")
    } else {
        format!("{methods}.{}", segments.join("."))
    }
}
