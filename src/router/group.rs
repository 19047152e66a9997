//! Route groups — nested prefixes and shared middleware.
//!
//! A [`RouteGroup`] is an ordered list of [`Node`]s, each either a leaf [`Route`] or
//! another group. Groups have no identity of their own: they exist only to contribute a
//! prefix and middleware to everything beneath them when the tree is compiled into a
//! [`RouteTable`](super::RouteTable).
//!
//! ```text
//! RouteGroup "user"            [auth]
//! ├── Route  "/"               GET      → /user
//! └── RouteGroup "{id}/contact" [audit]
//!     └── Route "/{contact_id}" PATCH   → /user/{id}/contact/{contact_id}  [auth, audit]
//! ```

use super::route::Route;

/// One child of a [`RouteGroup`].
#[derive(Debug, Clone)]
pub enum Node<H, M> {
    Route(Route<H, M>),
    Group(RouteGroup<H, M>),
}

impl<H, M> From<Route<H, M>> for Node<H, M> {
    fn from(route: Route<H, M>) -> Self {
        Node::Route(route)
    }
}

impl<H, M> From<RouteGroup<H, M>> for Node<H, M> {
    fn from(group: RouteGroup<H, M>) -> Self {
        Node::Group(group)
    }
}

/// A composite declaration: ordered children under a shared prefix and middleware.
///
/// Children keep their insertion order, which becomes dispatch priority after
/// compilation.
///
/// # Examples
///
/// ```rust
/// use routetree::{Route, RouteGroup};
///
/// let api: RouteGroup<&str, &str> = RouteGroup::new()
///     .prefix("api")
///     .middleware("cors")
///     .route(Route::get("/health", "health"))
///     .group(
///         RouteGroup::new()
///             .prefix("v1")
///             .route(Route::post("/users", "create_user")),
///     );
///
/// assert_eq!(api.get_prefix(), "api");
/// assert_eq!(api.children().len(), 2);
/// assert_eq!(api.route_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteGroup<H, M> {
    prefix: String,
    middleware: Vec<M>,
    children: Vec<Node<H, M>>,
}

impl<H, M> Default for RouteGroup<H, M> {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            middleware: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl<H, M> RouteGroup<H, M> {
    /// Create an empty group with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix joined (with a `/`) in front of every descendant.
    ///
    /// The prefix is stored as given; slash collapsing happens during compilation, so
    /// `"user"`, `"/user"` and `"/user/"` are equivalent.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Add middleware that wraps every descendant route.
    pub fn middleware(mut self, middleware: M) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn with_middleware(mut self, middleware: impl IntoIterator<Item = M>) -> Self {
        self.middleware.extend(middleware);
        self
    }

    /// Append a leaf route.
    pub fn route(mut self, route: Route<H, M>) -> Self {
        self.add_route(route);
        self
    }

    /// Append a nested group.
    pub fn group(mut self, group: RouteGroup<H, M>) -> Self {
        self.add_group(group);
        self
    }

    /// Append a route or group.
    pub fn child(mut self, child: impl Into<Node<H, M>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn add_route(&mut self, route: Route<H, M>) {
        self.children.push(Node::Route(route));
    }

    pub fn add_group(&mut self, group: RouteGroup<H, M>) {
        self.children.push(Node::Group(group));
    }

    pub fn add_middleware(&mut self, middleware: M) {
        self.middleware.push(middleware);
    }

    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get_middleware(&self) -> &[M] {
        &self.middleware
    }

    pub fn children(&self) -> &[Node<H, M>] {
        &self.children
    }

    /// Number of leaf routes in this group and all nested groups.
    pub fn route_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Route(_) => 1,
                Node::Group(group) => group.route_count(),
            })
            .sum()
    }
}
