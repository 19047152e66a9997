//! # routetree
//!
//! Declare HTTP endpoints as a nested tree of groups and routes, compile the tree once at
//! startup into a flat route table, and dispatch requests against it.
//!
//! ## Quick Start
//!
//! ```rust
//! use routetree::{Dispatch, Method, Route, RouteGroup, RouteTable, RouterConfig};
//!
//! let tree: RouteGroup<&str, &str> = RouteGroup::new()
//!     .prefix("api")
//!     .middleware("auth")
//!     .route(Route::get("/items", "list_items"))
//!     .route(Route::post("/items", "create_item"))
//!     .route(Route::delete("/items/{id}", "delete_item"));
//!
//! let table = RouteTable::compile_with(&tree, &RouterConfig::strict()).unwrap();
//!
//! match table.dispatch(Method::Delete, "/api/items/7") {
//!     Dispatch::Matched(found) => {
//!         assert_eq!(*found.handler(), "delete_item");
//!         assert_eq!(found.params().get("id"), Some("7"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! assert_eq!(table.dispatch(Method::Put, "/api/items").status_code(), 405);
//! assert_eq!(table.url_for("delete.api.items.p_id", [("id", "9")]).unwrap(), "/api/items/9");
//! ```

pub mod config;
pub mod http;
pub mod pattern;
pub mod router;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use config::{ConfigError, RouterConfig};
pub use http::{Method, MethodSet, UnknownMethod};
pub use pattern::{PathParams, Pattern, PatternError};
pub use router::{
    Dispatch, Node, ResolvedRoute, Route, RouteError, RouteGroup, RouteInfo, RouteMatch,
    RouteTable, derive_name,
};
