use std::fmt;

use hashrouter_history::Address;
use tracing::{debug, trace};

use crate::prelude::{Context, Pattern, RouteHandler, RouterError, Specificity, View};

/// A compiled pattern bound to a handler.
///
/// A route remembers the context and content of its last dispatch. As long as neither the
/// parameters nor the nested content change, dispatching it again returns that content without
/// calling the handler.
pub struct Route<V> {
    pattern: Pattern,
    handler: RouteHandler<V>,
    last: Option<(Context<V>, View<V>)>,
}

impl<V> Route<V> {
    /// Create a route for `pattern`.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str, handler: RouteHandler<V>) -> Result<Self, RouterError> {
        let pattern = pattern.strip_suffix('/').unwrap_or(pattern);
        Ok(Self::with_pattern(Pattern::compile(pattern)?, handler))
    }

    /// Create a route from an already compiled pattern.
    pub fn with_pattern(pattern: Pattern, handler: RouteHandler<V>) -> Self {
        Self {
            pattern,
            handler,
            last: None,
        }
    }

    /// The pattern of this route.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The context of the last dispatch that reached the handler.
    pub fn last_context(&self) -> Option<&Context<V>> {
        self.last.as_ref().map(|(ctx, _)| ctx)
    }

    /// Match `path`, which may carry a query string.
    ///
    /// On success the returned context holds the query parameters followed by the captured
    /// parameters, and the matched path with a trailing `/`. An unparsable path never matches.
    pub fn match_path(&self, path: &str) -> Option<(Specificity, Context<V>)> {
        match Address::parse(path) {
            Ok(address) => self.match_address(&address),
            Err(e) => {
                debug!("not matching `{path}`: {e}");
                None
            }
        }
    }

    pub(crate) fn match_address(&self, address: &Address) -> Option<(Specificity, Context<V>)> {
        let path = address.canonical_path();
        let captures = self.pattern.captures(&path)?;

        let mut params = address.query().clone();
        for (name, value) in captures {
            params.append(name, value);
        }
        trace!(pattern = %self.pattern, %path, "route matched");

        Some((self.pattern.specificity(), Context::new(path, params)))
    }

    /// Produce the content of this route for `ctx`.
    ///
    /// Returns the previous content unchanged if the route was dispatched before with the same
    /// children (by identity) and the same encoded parameters. Otherwise `ctx.should_update` is
    /// set to whether there was a previous dispatch, and the handler is invoked.
    pub fn render(&mut self, ctx: &mut Context<V>) -> View<V> {
        if let Some((last, view)) = &self.last {
            if View::same(last.children.as_ref(), ctx.children.as_ref())
                && last.params.encode() == ctx.params.encode()
            {
                debug!(pattern = %self.pattern, "reusing last content");
                return view.clone();
            }
        }

        ctx.should_update = self.last.is_some();
        let view = self.handler.call(ctx);
        self.last = Some((ctx.clone(), view.clone()));
        view
    }
}

impl<V> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .field("dispatched", &self.last.is_some())
            .finish()
    }
}
