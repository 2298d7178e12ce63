use std::{fmt, rc::Rc};

use hashrouter_history::{Address, AddressError, Location, Params};
use tracing::warn;

use crate::{components::Markup, prelude::View};

/// A navigation target that can be attached to a renderable.
///
/// The rendering runtime calls [`Link::activate`] when the user clicks the anchor built by
/// [`Markup::anchor`].
#[derive(Clone)]
pub struct Link {
    location: Rc<dyn Location>,
    path: String,
    params: Params,
}

impl Link {
    /// Create a link to `path` on `location`.
    pub fn new(location: Rc<dyn Location>, path: impl Into<String>) -> Self {
        Self {
            location,
            path: path.into(),
            params: Params::new(),
        }
    }

    /// Attach query parameters to the link.
    #[must_use]
    pub fn with_params(self, params: Params) -> Self {
        Self { params, ..self }
    }

    /// The target path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters of the target.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The `href` of the target fragment, including the leading `#`.
    ///
    /// A target that is not a valid address is rendered as written.
    pub fn href(&self) -> String {
        match Address::parse(&self.path) {
            Ok(address) => format!("#{}", address.with_params(&self.params)),
            Err(e) => {
                warn!("link target `{}` is not a valid address: {e}", self.path);
                format!("#{}", self.path)
            }
        }
    }

    /// Navigate to the target.
    ///
    /// # Errors
    /// Returns an [`AddressError`] if the target is not a valid address.
    pub fn activate(&self) -> Result<(), AddressError> {
        self.location.navigate(&self.path, &self.params)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("path", &self.path)
            .field("params", &self.params)
            .finish()
    }
}

/// Wrap `content` in an anchor navigating to `path` on `location`.
pub fn link<V: Markup>(location: &Rc<dyn Location>, path: &str, content: View<V>) -> View<V> {
    link_with_params(location, path, Params::new(), content)
}

/// Wrap `content` in an anchor navigating to `path` with `params` on `location`.
pub fn link_with_params<V: Markup>(
    location: &Rc<dyn Location>,
    path: &str,
    params: Params,
    content: View<V>,
) -> View<V> {
    let link = Link::new(location.clone(), path).with_params(params);
    View::new(V::anchor(link, content))
}
