//! Request dispatch — select the first route that accepts a method and matches a path.

use tracing::trace;

use super::table::{ResolvedRoute, RouteTable};
use crate::http::{Method, MethodSet};
use crate::pattern::PathParams;

/// The outcome of [`RouteTable::dispatch`].
///
/// `NotFound` and `MethodNotAllowed` are ordinary routing results, not errors.
#[derive(Debug)]
pub enum Dispatch<'a, H, M> {
    /// A route accepted the method and its pattern matched the path.
    Matched(RouteMatch<'a, H, M>),
    /// No route's pattern matches the path, whatever the method.
    NotFound,
    /// At least one pattern matched the path but none of those routes accept the method.
    MethodNotAllowed {
        /// Union of the methods accepted by every route whose pattern matched.
        allowed: MethodSet,
    },
}

impl<'a, H, M> Dispatch<'a, H, M> {
    /// HTTP status code the response layer should use for this outcome: `200`, `404` or
    /// `405`.
    pub fn status_code(&self) -> u16 {
        match self {
            Dispatch::Matched(_) => 200,
            Dispatch::NotFound => 404,
            Dispatch::MethodNotAllowed { .. } => 405,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Dispatch::Matched(_))
    }

    pub fn into_match(self) -> Option<RouteMatch<'a, H, M>> {
        match self {
            Dispatch::Matched(found) => Some(found),
            _ => None,
        }
    }
}

/// A successful dispatch: the selected route plus the captured path parameters.
#[derive(Debug)]
pub struct RouteMatch<'a, H, M> {
    route: &'a ResolvedRoute<H, M>,
    params: PathParams,
}

impl<'a, H, M> RouteMatch<'a, H, M> {
    pub fn route(&self) -> &'a ResolvedRoute<H, M> {
        self.route
    }

    pub fn handler(&self) -> &'a H {
        self.route.handler()
    }

    /// The merged middleware chain, outermost first.
    pub fn middleware(&self) -> &'a [M] {
        self.route.middleware()
    }

    pub fn name(&self) -> &'a str {
        self.route.name()
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn into_params(self) -> PathParams {
        self.params
    }
}

impl<H, M> RouteTable<H, M> {
    /// Find the route for `method` and `path`.
    ///
    /// Routes are tried in declaration order and the first one that both accepts `method`
    /// and matches `path` wins, so more specific routes must be declared before general
    /// ones that could match the same path. `path` should not include a query string.
    ///
    /// # Arguments
    ///
    /// - `method` — The request method.
    /// - `path` — The request path, e.g. `"/items/42"`.
    ///
    /// # Returns
    ///
    /// [`Dispatch::Matched`] with the captured parameters, [`Dispatch::MethodNotAllowed`]
    /// when only the method is wrong, or [`Dispatch::NotFound`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use routetree::{Dispatch, Method, Route, RouteGroup, RouteTable};
    ///
    /// let tree: RouteGroup<&str, ()> = RouteGroup::new()
    ///     .prefix("items")
    ///     .route(Route::new("/{id}", "item").with_methods([Method::Get, Method::Head, Method::Delete]));
    /// let table = RouteTable::compile(&tree).unwrap();
    ///
    /// match table.dispatch(Method::Get, "/items/42") {
    ///     Dispatch::Matched(found) => {
    ///         assert_eq!(*found.handler(), "item");
    ///         assert_eq!(found.params().get("id"), Some("42"));
    ///     }
    ///     other => panic!("unexpected {other:?}"),
    /// }
    ///
    /// match table.dispatch(Method::Post, "/items/42") {
    ///     Dispatch::MethodNotAllowed { allowed } => {
    ///         assert_eq!(allowed.allow_header(), "GET, HEAD, DELETE");
    ///     }
    ///     other => panic!("unexpected {other:?}"),
    /// }
    /// ```
    pub fn dispatch(&self, method: Method, path: &str) -> Dispatch<'_, H, M> {
        let mut allowed = MethodSet::new();

        for route in &self.routes {
            if route.accepts(method) {
                if let Some(params) = route.pattern().matches(path) {
                    trace!(%method, path, route = route.name(), "route matched");
                    return Dispatch::Matched(RouteMatch { route, params });
                }
            } else if route.pattern().is_match(path) {
                allowed.extend_from(route.methods());
            }
        }

        if allowed.is_empty() {
            trace!(%method, path, "no route matched");
            Dispatch::NotFound
        } else {
            trace!(%method, path, %allowed, "method not allowed");
            Dispatch::MethodNotAllowed { allowed }
        }
    }
}
