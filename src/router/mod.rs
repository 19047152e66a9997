//! Request routing — declare a tree of routes, compile it once, dispatch against it.
//!
//! Endpoints are declared as a tree: [`RouteGroup`]s carry a URL prefix and middleware,
//! and leaf [`Route`]s carry a URL fragment, methods, a handler and their own
//! middleware. [`RouteTable::compile`] flattens the tree into an ordered list of
//! [`ResolvedRoute`]s, and [`RouteTable::dispatch`] picks the first route that accepts
//! the request method and matches the path.
//!
//! | Declared under prefix | Fragment         | Resolved URL                      | Derived name                            |
//! |-----------------------|------------------|-----------------------------------|-----------------------------------------|
//! | `user`                | `/` (GET)        | `/user/`                          | `get.head.user`                         |
//! | `user` / `{id}`       | `/` (PATCH)      | `/user/{id}/`                     | `patch.user.p_id`                       |
//! | `user` / `{id}/contact` | `/{contact_id}` (DELETE) | `/user/{id}/contact/{contact_id}` | `delete.user.p_id.contact.p_contact_id` |
//!
//! Handlers and middleware are opaque type parameters: the router clones them into the
//! table and returns them on a match, but never calls them.
//!
//! # Examples
//!
//! ```rust
//! use routetree::{Dispatch, Method, Route, RouteGroup, RouteTable};
//!
//! let tree: RouteGroup<&str, &str> = RouteGroup::new()
//!     .middleware("request-log")
//!     .route(Route::get("/", "index"))
//!     .group(
//!         RouteGroup::new()
//!             .prefix("user")
//!             .middleware("auth")
//!             .route(Route::patch("/{id}", "update_user")),
//!     );
//!
//! let table = RouteTable::compile(&tree).unwrap();
//!
//! let Dispatch::Matched(found) = table.dispatch(Method::Patch, "/user/42") else {
//!     panic!("expected a match");
//! };
//! assert_eq!(found.name(), "patch.user.p_id");
//! assert_eq!(found.middleware(), ["request-log", "auth"]);
//! assert_eq!(found.params().get("id"), Some("42"));
//!
//! assert!(matches!(table.dispatch(Method::Get, "/missing"), Dispatch::NotFound));
//! ```

use thiserror::Error;

use crate::http::Method;
use crate::pattern::PatternError;

pub mod dispatch;
pub mod group;
pub mod route;
pub mod table;

pub use dispatch::{Dispatch, RouteMatch};
pub use group::{Node, RouteGroup};
pub use route::{Route, derive_name};
pub use table::{ResolvedRoute, RouteInfo, RouteTable};

/// Errors produced while compiling a route tree or building URLs from it.
///
/// Compilation errors are fatal to startup: an application should refuse to serve with a
/// table that failed to compile.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route template {url:?}: {source}")]
    InvalidPattern {
        url: String,
        #[source]
        source: PatternError,
    },

    #[error("route {url:?} declares no HTTP methods")]
    EmptyMethods { url: String },

    #[error("route name {name:?} is used by both {first_url:?} and {url:?}")]
    DuplicateName {
        name: String,
        first_url: String,
        url: String,
    },

    #[error("{method} {url:?} is shadowed by the earlier route {first_url:?}")]
    DuplicateRoute {
        method: Method,
        first_url: String,
        url: String,
    },

    #[error("no route named {name:?}")]
    UnknownRoute { name: String },

    #[error("cannot build URL for route {name:?}: {source}")]
    Expand {
        name: String,
        #[source]
        source: PatternError,
    },
}
