//! The dispatch entry point driving a [`Router`] from a [`Location`].

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use hashrouter_history::{Location, Params, Subscription};
use tracing::{debug, warn};

use crate::{
    components::{link_with_params, Markup},
    prelude::{Context, Match, Router, RouterError, View},
};

/// The core of the router.
///
/// This combines a [`Router`] tree and a [`Location`]. It dispatches once at startup and again
/// every time the location reports a change, and keeps the content of the latest dispatch.
///
/// The service is a cheap handle, clones share the same state. The location only holds a weak
/// reference to it, dropping every handle unsubscribes from the location.
///
/// A handler may navigate while it is being dispatched, for example to redirect. The change is
/// picked up once the running dispatch completes, and the tree is resolved again for the new
/// path.
pub struct RouterService<V> {
    inner: Rc<ServiceInner<V>>,
}

struct ServiceInner<V> {
    router: RefCell<Router<V>>,
    location: Rc<dyn Location>,
    content: RefCell<Option<View<V>>>,
    context: RefCell<Option<Context<V>>>,
    pending: Cell<bool>,
    _subscription: Subscription,
}

/// How often a single dispatch follows navigations made by its own handlers.
const MAX_REDIRECTS: usize = 16;

impl<V: 'static> RouterService<V> {
    pub(crate) fn start(
        router: Router<V>,
        location: Rc<dyn Location>,
    ) -> Result<Self, RouterError> {
        if location.current_path().is_empty() {
            let default_path = router.config().default_path.clone();
            debug!(%default_path, "location has no fragment, redirecting");
            location.navigate(&default_path, &Params::new())?;
        }

        let inner = Rc::new_cyclic(|weak: &Weak<ServiceInner<V>>| {
            let weak = weak.clone();
            let subscription = location.on_change(Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.update();
                }
            }));

            ServiceInner {
                router: RefCell::new(router),
                location: location.clone(),
                content: RefCell::new(None),
                context: RefCell::new(None),
                pending: Cell::new(false),
                _subscription: subscription,
            }
        });

        inner.update();
        Ok(Self { inner })
    }
}

impl<V> RouterService<V> {
    /// Dispatch the current location again and return the new content.
    pub fn update(&self) -> Option<View<V>> {
        self.inner.update()
    }

    /// The content of the latest dispatch.
    pub fn current(&self) -> Option<View<V>> {
        self.inner.content.borrow().clone()
    }

    /// The context the latest content was rendered with.
    pub fn context(&self) -> Option<Context<V>> {
        self.inner.context.borrow().clone()
    }

    /// The location this service dispatches on.
    pub fn location(&self) -> &Rc<dyn Location> {
        &self.inner.location
    }

    /// The path portion of the current location.
    pub fn current_path_only(&self) -> String {
        self.inner.location.current_path_only()
    }

    /// Go to `path`.
    ///
    /// # Errors
    /// Returns [`RouterError::Address`] if `path` is not a valid address.
    pub fn go(&self, path: &str) -> Result<(), RouterError> {
        self.navigate(path, &Params::new())
    }

    /// Go to `path` with `params` as query parameters.
    ///
    /// # Errors
    /// Returns [`RouterError::Address`] if `path` is not a valid address.
    pub fn navigate(&self, path: &str, params: &Params) -> Result<(), RouterError> {
        Ok(self.inner.location.navigate(path, params)?)
    }
}

impl<V: Markup> RouterService<V> {
    /// Wrap `content` in a link to `path` on this service's location.
    pub fn link(&self, path: &str, content: View<V>) -> View<V> {
        self.link_with_params(path, Params::new(), content)
    }

    /// Wrap `content` in a link to `path` with `params` on this service's location.
    pub fn link_with_params(&self, path: &str, params: Params, content: View<V>) -> View<V> {
        link_with_params(&self.inner.location, path, params, content)
    }
}

impl<V> Clone for RouterService<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> fmt::Debug for RouterService<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterService")
            .field("router", &self.inner.router)
            .field("context", &self.inner.context)
            .finish()
    }
}

impl<V> ServiceInner<V> {
    fn update(&self) -> Option<View<V>> {
        let Ok(mut router) = self.router.try_borrow_mut() else {
            debug!("location changed during a dispatch, resolving again afterwards");
            self.pending.set(true);
            return self.content.borrow().clone();
        };

        for redirect in 0.. {
            self.pending.set(false);
            let path = self.location.current_path();
            debug!(%path, "dispatching");

            let Match {
                content, context, ..
            } = router.resolve(&path);
            *self.content.borrow_mut() = content;
            *self.context.borrow_mut() = context;

            if !self.pending.get() {
                break;
            }
            if redirect == MAX_REDIRECTS {
                warn!(%path, "giving up after {MAX_REDIRECTS} redirects");
                self.pending.set(false);
                break;
            }
        }

        let on_update = router.config().on_update.clone();
        drop(router);

        let content = self.content.borrow().clone();
        if let Some(on_update) = on_update {
            on_update(content.as_ref());
        }
        content
    }
}
