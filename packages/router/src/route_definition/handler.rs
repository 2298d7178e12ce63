use std::fmt;

use crate::prelude::{Context, View};

/// A stateful route handler.
///
/// The router calls [`Handler::on_route`] whenever the route is dispatched and anything relevant
/// to it changed. The handler may keep its own view state and decide, based on
/// [`Context::should_update`], whether to rebuild it.
pub trait Handler<V> {
    /// React to a navigation and produce the content of the route.
    fn on_route(&mut self, ctx: &Context<V>) -> View<V>;
}

/// An inline function producing the content of a route.
pub type HandlerFunc<V> = Box<dyn Fn(&Context<V>) -> View<V>>;

/// The handler of a route: either a stateful [`Handler`] or a [`HandlerFunc`].
pub enum RouteHandler<V> {
    /// A stateful handler object.
    Handler(Box<dyn Handler<V>>),
    /// A plain function.
    Func(HandlerFunc<V>),
}

impl<V> RouteHandler<V> {
    /// Wrap a stateful handler.
    pub fn handler(handler: impl Handler<V> + 'static) -> Self {
        Self::Handler(Box::new(handler))
    }

    /// Wrap a handler function.
    pub fn func(f: impl Fn(&Context<V>) -> View<V> + 'static) -> Self {
        Self::Func(Box::new(f))
    }

    pub(crate) fn call(&mut self, ctx: &Context<V>) -> View<V> {
        match self {
            Self::Handler(handler) => handler.on_route(ctx),
            Self::Func(f) => f(ctx),
        }
    }
}

impl<V> fmt::Debug for RouteHandler<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("RouteHandler::Handler"),
            Self::Func(_) => f.write_str("RouteHandler::Func"),
        }
    }
}
