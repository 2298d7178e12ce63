//! The route tree and its matching algorithm.

use std::{fmt, rc::Rc};

use hashrouter_history::{Address, Location};
use tracing::{debug, trace};

use crate::{
    components::{Body, Markup},
    prelude::{
        Context, Handler, Route, RouteHandler, RouterConfig, RouterError, RouterService,
        Specificity, View,
    },
};

/// The result of matching a path against a [`Router`].
pub struct Match<V> {
    /// The best specificity among the nested routers and local routes, [`None`] if nothing
    /// matched.
    pub specificity: Option<Specificity>,

    /// The content to display.
    pub content: Option<View<V>>,

    /// The context the content was rendered with.
    pub context: Option<Context<V>>,
}

impl<V> Default for Match<V> {
    fn default() -> Self {
        Self {
            specificity: None,
            content: None,
            context: None,
        }
    }
}

impl<V> fmt::Debug for Match<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("specificity", &self.specificity)
            .field("has_content", &self.content.is_some())
            .field("context", &self.context)
            .finish()
    }
}

/// A node of the route tree.
///
/// A router holds its own routes, any number of nested routers created by
/// [`group`](Router::group), and for nested routers an optional root route wrapping everything
/// matched below it.
///
/// # Matching
/// Nested routers are matched first, then the local routes. Both compete in a single ranking: the
/// highest [`Specificity`] wins and on a tie the earliest registration is kept. The root route of
/// a group, if it matches, wraps whatever content won below it. When nothing below it matched, the
/// group competes with the specificity of its root pattern.
///
/// # Panics
/// Registering an invalid pattern panics. Use [`Router::try_handle`] or
/// [`Pattern::compile`](crate::prelude::Pattern::compile) to validate patterns at runtime.
pub struct Router<V> {
    config: Rc<RouterConfig<V>>,
    prefix: String,
    root: Option<Route<V>>,
    routes: Vec<Route<V>>,
    routers: Vec<Router<V>>,
}

impl<V> Default for Router<V> {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl<V> Router<V> {
    /// Create an empty top-level router.
    pub fn new(config: RouterConfig<V>) -> Self {
        Self {
            config: Rc::new(config),
            prefix: String::new(),
            root: None,
            routes: Vec::new(),
            routers: Vec::new(),
        }
    }

    /// The configuration of the router tree.
    pub fn config(&self) -> &RouterConfig<V> {
        &self.config
    }

    /// The pattern prefix every route registered on this router receives.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The routes registered directly on this router.
    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    /// The nested routers.
    pub fn routers(&self) -> &[Router<V>] {
        &self.routers
    }

    /// The root route wrapping this router's content, if any.
    pub fn root(&self) -> Option<&Route<V>> {
        self.root.as_ref()
    }

    /// Register `handler` for `pattern`.
    pub fn handle(&mut self, pattern: &str, handler: impl Handler<V> + 'static) -> &mut Self {
        let route = self.route(pattern, RouteHandler::handler(handler));
        self.routes.push(route);
        self
    }

    /// Register the function `f` for `pattern`.
    pub fn handle_func(
        &mut self,
        pattern: &str,
        f: impl Fn(&Context<V>) -> View<V> + 'static,
    ) -> &mut Self {
        let route = self.route(pattern, RouteHandler::func(f));
        self.routes.push(route);
        self
    }

    /// Register `handler` for `pattern`, returning an error instead of panicking.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidPattern`] if the prefixed pattern does not compile.
    pub fn try_handle(
        &mut self,
        pattern: &str,
        handler: RouteHandler<V>,
    ) -> Result<&mut Self, RouterError> {
        let route = Route::new(&self.canonical(pattern), handler)?;
        self.routes.push(route);
        Ok(self)
    }

    /// Register a group of routes below `pattern`, wrapped by `handler`.
    ///
    /// `build` receives the nested router. Patterns registered on it are relative to `pattern`.
    ///
    /// ```rust
    /// # use hashrouter::prelude::*;
    /// struct Layout;
    ///
    /// impl Handler<String> for Layout {
    ///     fn on_route(&mut self, ctx: &Context<String>) -> View<String> {
    ///         let inner = ctx.children.as_deref().map(String::as_str).unwrap_or("");
    ///         View::new(format!("<main>{inner}</main>"))
    ///     }
    /// }
    ///
    /// let mut router: Router<String> = Router::default();
    /// router.group("/users", Layout, |users| {
    ///     users.handle_func("/:userID", |ctx| {
    ///         View::new(format!("user {}", ctx.params.get("userID").unwrap_or_default()))
    ///     });
    /// });
    ///
    /// let content = router.resolve("/users/7").content.unwrap();
    /// assert_eq!(*content, "<main>user 7</main>");
    /// ```
    pub fn group(
        &mut self,
        pattern: &str,
        handler: impl Handler<V> + 'static,
        build: impl FnOnce(&mut Router<V>),
    ) -> &mut Self {
        self.add_group(pattern, Some(RouteHandler::handler(handler)), build)
    }

    /// Register a group of routes below `pattern`, wrapped by the function `f`.
    pub fn group_func(
        &mut self,
        pattern: &str,
        f: impl Fn(&Context<V>) -> View<V> + 'static,
        build: impl FnOnce(&mut Router<V>),
    ) -> &mut Self {
        self.add_group(pattern, Some(RouteHandler::func(f)), build)
    }

    /// Register a group of routes below `pattern` without a wrapping handler.
    pub fn nest(&mut self, pattern: &str, build: impl FnOnce(&mut Router<V>)) -> &mut Self {
        self.add_group(pattern, None, build)
    }

    fn add_group(
        &mut self,
        pattern: &str,
        root: Option<RouteHandler<V>>,
        build: impl FnOnce(&mut Router<V>),
    ) -> &mut Self {
        let mut router = Router {
            config: self.config.clone(),
            prefix: qualified(self.canonical(pattern)),
            root: root.map(|handler| self.route(pattern, handler)),
            routes: Vec::new(),
            routers: Vec::new(),
        };
        build(&mut router);
        self.routers.push(router);
        self
    }

    fn route(&self, pattern: &str, handler: RouteHandler<V>) -> Route<V> {
        Route::new(&self.canonical(pattern), handler).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The fully qualified pattern for `pattern` registered at this level.
    fn canonical(&self, pattern: &str) -> String {
        format!("{}{pattern}", self.prefix)
    }

    /// Match `path` against the whole tree below this router and render the winning routes.
    ///
    /// An unparsable path matches nothing.
    pub fn resolve(&mut self, path: &str) -> Match<V> {
        match Address::parse(path) {
            Ok(address) => self.resolve_address(&address),
            Err(e) => {
                debug!("not resolving `{path}`: {e}");
                Match::default()
            }
        }
    }

    fn resolve_address(&mut self, address: &Address) -> Match<V> {
        let mut best: Option<Specificity> = None;
        let mut children = None;
        let mut child_context: Option<Context<V>> = None;

        for router in &mut self.routers {
            let Match {
                specificity,
                content,
                context,
            } = router.resolve_address(address);
            if let Some(score) = specificity {
                if outranks(score, best) {
                    best = Some(score);
                    children = content;
                    child_context = context;
                }
            }
        }

        let mut winner = None;
        for (index, route) in self.routes.iter().enumerate() {
            if let Some((score, ctx)) = route.match_address(address) {
                if outranks(score, best) {
                    best = Some(score);
                    winner = Some((index, ctx));
                }
            }
        }

        let (content, context) = match winner {
            Some((index, mut ctx)) => {
                if let Some(child) = &child_context {
                    ctx.params.extend_from(&child.params);
                }
                ctx.children = children;
                let route = &mut self.routes[index];
                trace!(pattern = %route.pattern(), "local route won");
                (Some(route.render(&mut ctx)), Some(ctx))
            }
            None => (children, child_context),
        };

        if let Some(root) = &mut self.root {
            if let Some((score, mut ctx)) = root.match_address(address) {
                if let Some(inner) = &context {
                    ctx.params.merge_missing(&inner.params);
                }
                ctx.children = content;
                let view = root.render(&mut ctx);
                // a group with no matching route still ranks as its own index
                return Match {
                    specificity: best.or(Some(score)),
                    content: Some(view),
                    context: Some(ctx),
                };
            }
        }

        Match {
            specificity: best,
            content,
            context,
        }
    }
}

impl<V: 'static> Router<V> {
    /// Start dispatching on `location`, without a top-level container.
    ///
    /// If `location` has no fragment yet, it is first redirected to the configured default path.
    ///
    /// # Errors
    /// Returns [`RouterError::Address`] if the default path is not a valid address.
    pub fn start(self, location: Rc<dyn Location>) -> Result<RouterService<V>, RouterError> {
        RouterService::start(self, location)
    }
}

impl<V: Markup + 'static> Router<V> {
    /// Wrap everything in the [`Body`] container and start dispatching on `location`.
    ///
    /// # Errors
    /// Returns [`RouterError::Address`] if the default path is not a valid address.
    pub fn body(mut self, location: Rc<dyn Location>) -> Result<RouterService<V>, RouterError> {
        let body = Body::new(self.config.container_id.clone());
        self.root = Some(self.route("", RouteHandler::handler(body)));
        self.start(location)
    }
}

impl<V> fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("prefix", &self.prefix)
            .field("root", &self.root)
            .field("routes", &self.routes)
            .field("routers", &self.routers)
            .finish()
    }
}

fn outranks(score: Specificity, best: Option<Specificity>) -> bool {
    best.map_or(true, |best| score > best)
}

// a prefix of exactly `/` adds nothing to nested patterns
fn qualified(prefix: String) -> String {
    if prefix == "/" {
        String::new()
    } else {
        prefix
    }
}
