//! Route-table compilation — flatten a [`RouteGroup`] tree into ordered, resolved routes.
//!
//! Compilation is a pure fold over a borrowed tree. Prefixes and middleware are carried
//! down as traversal state rather than written back into the declarations, so compiling
//! the same tree twice yields the same table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::RouteError;
use super::group::{Node, RouteGroup};
use super::route::{Route, derive_name};
use crate::config::RouterConfig;
use crate::http::{Method, MethodSet};
use crate::pattern::{PathParams, Pattern, collapse_slashes};

/// A fully resolved route: final URL, compiled pattern, name and middleware chain.
///
/// Built only by [`RouteTable::compile`]; every field is fixed afterwards, so the pattern
/// always corresponds to the URL it was compiled from.
#[derive(Debug, Clone)]
pub struct ResolvedRoute<H, M> {
    name: String,
    url: String,
    pattern: Pattern,
    declared: Vec<Method>,
    methods: MethodSet,
    handler: H,
    middleware: Vec<M>,
    description: Option<String>,
}

impl<H: Clone, M: Clone> ResolvedRoute<H, M> {
    // Resolve `route` under the accumulated `prefix` and inherited middleware chain.
    fn resolve(route: &Route<H, M>, prefix: &str, inherited: &[M]) -> Result<Self, RouteError> {
        let url = collapse_slashes(&format!("{prefix}/{}", route.url()));

        if route.methods().is_empty() {
            return Err(RouteError::EmptyMethods { url });
        }

        let pattern = Pattern::compile(&url).map_err(|e| RouteError::InvalidPattern {
            url: url.clone(),
            source: e,
        })?;

        let name = match route.get_name() {
            Some(name) => name.to_owned(),
            None => derive_name(route.methods(), &url),
        };

        let mut middleware = Vec::with_capacity(inherited.len() + route.get_middleware().len());
        middleware.extend_from_slice(inherited);
        middleware.extend_from_slice(route.get_middleware());

        Ok(Self {
            name,
            url,
            pattern,
            declared: route.methods().to_vec(),
            methods: route.accepted_methods(),
            handler: route.handler().clone(),
            middleware,
            description: route.get_description().map(str::to_owned),
        })
    }
}

impl<H, M> ResolvedRoute<H, M> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved URL template: every ancestor prefix plus the route's own fragment.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Methods as declared, in declaration order.
    pub fn declared_methods(&self) -> &[Method] {
        &self.declared
    }

    /// Methods this route answers, including the `HEAD` implied by `GET`.
    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    pub fn accepts(&self, method: Method) -> bool {
        self.methods.contains(method)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Middleware chain, outermost group first and the route's own entries last.
    pub fn middleware(&self) -> &[M] {
        &self.middleware
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// A serializable summary of this route.
    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            name: self.name.clone(),
            url: self.url.clone(),
            pattern: self.pattern.as_str().to_owned(),
            methods: self.methods,
            description: self.description.clone(),
            middleware: self.middleware.len(),
        }
    }
}

/// Serializable description of one compiled route, as produced by
/// [`RouteTable::describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub name: String,
    pub url: String,
    pub pattern: String,
    pub methods: MethodSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Length of the merged middleware chain.
    pub middleware: usize,
}

/// The flat, ordered route table produced from a route tree.
///
/// Routes appear in pre-order declaration order, which is also dispatch priority. The
/// table has no mutating methods; share it behind an [`Arc`](std::sync::Arc) and call
/// [`dispatch`](RouteTable::dispatch) from any number of threads.
///
/// # Examples
///
/// ```rust
/// use routetree::{Route, RouteGroup, RouteTable};
///
/// let tree: RouteGroup<&str, &str> = RouteGroup::new()
///     .prefix("user")
///     .middleware("auth")
///     .group(
///         RouteGroup::new()
///             .prefix("{id}/contact")
///             .route(Route::patch("/{contact_id}", "update_contact")),
///     );
///
/// let table = RouteTable::compile(&tree).unwrap();
/// let route = table.get("patch.user.p_id.contact.p_contact_id").unwrap();
/// assert_eq!(route.url(), "/user/{id}/contact/{contact_id}");
/// assert_eq!(route.middleware(), ["auth"]);
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H, M> {
    pub(super) routes: Vec<ResolvedRoute<H, M>>,
    names: HashMap<String, usize>,
}

impl<H: Clone, M: Clone> RouteTable<H, M> {
    /// Compile `root` with the default (lenient) [`RouterConfig`].
    ///
    /// # Errors
    ///
    /// See [`compile_with`](Self::compile_with).
    pub fn compile(root: &RouteGroup<H, M>) -> Result<Self, RouteError> {
        Self::compile_with(root, &RouterConfig::default())
    }

    /// Flatten `root` into a route table.
    ///
    /// The root's own prefix and middleware apply to every route. Traversal is
    /// depth-first and left-to-right; a nested group's prefix is joined to its parent's
    /// with `/` (repeated slashes collapsed), and its middleware is appended after the
    /// parent's.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPattern`] — a resolved URL is not a valid template.
    /// - [`RouteError::EmptyMethods`] — a route declares no methods.
    /// - [`RouteError::DuplicateName`] / [`RouteError::DuplicateRoute`] — only when
    ///   `config.strict` is set; otherwise duplicates are logged and the first wins.
    pub fn compile_with(root: &RouteGroup<H, M>, config: &RouterConfig) -> Result<Self, RouteError> {
        let mut routes = Vec::with_capacity(root.route_count());
        let prefix = collapse_slashes(&format!("/{}", root.get_prefix()));
        flatten(root, &prefix, root.get_middleware(), &mut routes)?;

        let names = index_routes(&routes, config)?;

        info!(
            routes = routes.len(),
            strict = config.strict,
            "route table compiled"
        );

        Ok(Self { routes, names })
    }
}

impl<H, M> RouteTable<H, M> {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over routes in dispatch order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedRoute<H, M>> {
        self.routes.iter()
    }

    /// Look up a route by name. With duplicate names, the first declaration is returned.
    pub fn get(&self, name: &str) -> Option<&ResolvedRoute<H, M>> {
        self.names.get(name).map(|&index| &self.routes[index])
    }

    /// Build a concrete URL for the named route by substituting placeholder values.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownRoute`] — no route has this name.
    /// - [`RouteError::Expand`] — a placeholder value is missing or could not be matched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use routetree::{Route, RouteGroup, RouteTable};
    ///
    /// let tree: RouteGroup<(), ()> = RouteGroup::new()
    ///     .prefix("user")
    ///     .route(Route::get("/{id}", ()).name("user.show"));
    /// let table = RouteTable::compile(&tree).unwrap();
    ///
    /// assert_eq!(table.url_for("user.show", [("id", "42")]).unwrap(), "/user/42");
    /// assert!(table.url_for("user.show", []).is_err());
    /// ```
    pub fn url_for<'v>(
        &self,
        name: &str,
        params: impl IntoIterator<Item = (&'v str, &'v str)>,
    ) -> Result<String, RouteError> {
        let route = self.get(name).ok_or_else(|| RouteError::UnknownRoute {
            name: name.to_owned(),
        })?;
        let values: PathParams = params.into_iter().collect();
        route
            .pattern
            .expand(&values)
            .map_err(|e| RouteError::Expand {
                name: name.to_owned(),
                source: e,
            })
    }

    /// Summaries of every route, in dispatch order.
    pub fn describe(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(ResolvedRoute::info).collect()
    }

    /// Render [`describe`](Self::describe) as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.describe())
    }
}

impl<'a, H, M> IntoIterator for &'a RouteTable<H, M> {
    type Item = &'a ResolvedRoute<H, M>;
    type IntoIter = std::slice::Iter<'a, ResolvedRoute<H, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

// Pre-order walk; `prefix` and `inherited` describe the path from the root to `group`.
fn flatten<H: Clone, M: Clone>(
    group: &RouteGroup<H, M>,
    prefix: &str,
    inherited: &[M],
    out: &mut Vec<ResolvedRoute<H, M>>,
) -> Result<(), RouteError> {
    for child in group.children() {
        match child {
            Node::Route(route) => {
                let resolved = ResolvedRoute::resolve(route, prefix, inherited)?;
                debug!(
                    name = %resolved.name,
                    url = %resolved.url,
                    methods = %resolved.methods,
                    "route compiled"
                );
                out.push(resolved);
            }
            Node::Group(nested) => {
                let nested_prefix = collapse_slashes(&format!("{prefix}/{}", nested.get_prefix()));
                let mut chain = Vec::with_capacity(inherited.len() + nested.get_middleware().len());
                chain.extend_from_slice(inherited);
                chain.extend_from_slice(nested.get_middleware());
                flatten(nested, &nested_prefix, &chain, out)?;
            }
        }
    }
    Ok(())
}

// Build the name index and check for routes shadowed by an earlier declaration.
fn index_routes<H, M>(
    routes: &[ResolvedRoute<H, M>],
    config: &RouterConfig,
) -> Result<HashMap<String, usize>, RouteError> {
    let mut names = HashMap::with_capacity(routes.len());
    let mut claimed: HashMap<(Method, &str), usize> = HashMap::new();

    for (index, route) in routes.iter().enumerate() {
        match names.entry(route.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(first) => {
                let first_url = routes[*first.get()].url.clone();
                if config.strict {
                    return Err(RouteError::DuplicateName {
                        name: route.name.clone(),
                        first_url,
                        url: route.url.clone(),
                    });
                }
                warn!(name = %route.name, first = %first_url, url = %route.url, "duplicate route name");
            }
        }

        for method in route.methods.iter() {
            match claimed.entry((method, route.pattern.as_str())) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(first) => {
                    let first_url = routes[*first.get()].url.clone();
                    if config.strict {
                        return Err(RouteError::DuplicateRoute {
                            method,
                            first_url,
                            url: route.url.clone(),
                        });
                    }
                    warn!(%method, first = %first_url, url = %route.url, "route shadowed by earlier declaration");
                }
            }
        }
    }

    Ok(names)
}
