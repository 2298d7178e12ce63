use crate::{components::Link, prelude::View};

/// The integration of a rendering runtime with the router's built-in components.
///
/// The router decides what to render, never how. Host UI types implement this trait so the
/// [`Body`](super::Body) container and [`Link`]s can be expressed in their own node type.
pub trait Markup: Sized {
    /// Build the top-level container with the id `id` around `children`.
    fn body(id: &str, children: Option<View<Self>>) -> Self;

    /// Build an anchor around `content` that calls [`Link::activate`] when the user activates
    /// it.
    fn anchor(link: Link, content: View<Self>) -> Self;
}
