use crate::{
    components::Markup,
    prelude::{Context, Handler, View},
};

/// The top-level container installed by [`Router::body`](crate::prelude::Router::body).
///
/// Renders [`Markup::body`] around whatever the route tree produced.
#[derive(Debug, Clone)]
pub struct Body {
    id: String,
}

impl Body {
    /// Create a container with the element id `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The element id of the container.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<V: Markup> Handler<V> for Body {
    fn on_route(&mut self, ctx: &Context<V>) -> View<V> {
        View::new(V::body(&self.id, ctx.children.clone()))
    }
}
