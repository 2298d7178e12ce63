use std::{fmt, ops::Deref, rc::Rc};

use hashrouter_history::Params;

/// A shared handle to a renderable produced by a handler.
///
/// The router never looks inside a view. It only compares views by identity, to find out whether
/// the content below a route is still the content it rendered last time.
pub struct View<V: ?Sized>(Rc<V>);

impl<V> View<V> {
    /// Wrap a freshly built renderable.
    pub fn new(value: V) -> Self {
        Self(Rc::new(value))
    }
}

impl<V: ?Sized> View<V> {
    /// Whether both handles point to the same renderable.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Whether both optional views are absent or point to the same renderable.
    pub fn same(a: Option<&Self>, b: Option<&Self>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => Self::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The underlying reference counted value.
    pub fn as_rc(&self) -> &Rc<V> {
        &self.0
    }
}

impl<V: ?Sized> Clone for View<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: ?Sized> Deref for View<V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V: ?Sized> From<Rc<V>> for View<V> {
    fn from(value: Rc<V>) -> Self {
        Self(value)
    }
}

impl<V: ?Sized + fmt::Debug> fmt::Debug for View<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("View").field(&&*self.0).finish()
    }
}

/// Information about the current match, handed to route handlers.
pub struct Context<V: ?Sized> {
    /// The matched path, always ending with a `/`.
    pub path: String,

    /// Parameters captured by named segments, and the query parameters of the address.
    pub params: Params,

    /// The content rendered by a more deeply nested route, if any.
    ///
    /// Handlers wrapping nested routes should place it inside their own content.
    pub children: Option<View<V>>,

    /// `false` the first time the route is dispatched, `true` on every later dispatch.
    ///
    /// A stateful handler should rebuild its content when this is set and it wants the change to
    /// show up.
    pub should_update: bool,
}

impl<V: ?Sized> Context<V> {
    /// Create a context for `path` with `params`, no children and no pending update.
    pub fn new(path: impl Into<String>, params: Params) -> Self {
        Self {
            path: path.into(),
            params,
            children: None,
            should_update: false,
        }
    }
}

impl<V: ?Sized> Clone for Context<V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            params: self.params.clone(),
            children: self.children.clone(),
            should_update: self.should_update,
        }
    }
}

impl<V: ?Sized> fmt::Debug for Context<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("has_children", &self.children.is_some())
            .field("should_update", &self.should_update)
            .finish()
    }
}
