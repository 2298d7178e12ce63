use std::{fmt, rc::Rc};

use crate::prelude::View;

/// A function called after every dispatch with the new content.
pub type UpdateCallback<V> = Rc<dyn Fn(Option<&View<V>>)>;

/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust
/// # use hashrouter::prelude::*;
/// let cfg = RouterConfig::<String>::default()
///     .default_path("/home")
///     .on_update(|content| {
///         if let Some(content) = content {
///             println!("mounting {}", **content);
///         }
///     });
/// let router = Router::new(cfg);
/// assert_eq!(router.config().default_path_str(), "/home");
/// ```
pub struct RouterConfig<V> {
    pub(crate) default_path: String,
    pub(crate) container_id: String,
    pub(crate) on_update: Option<UpdateCallback<V>>,
}

impl<V> Default for RouterConfig<V> {
    fn default() -> Self {
        Self {
            default_path: String::from("/"),
            container_id: String::from("Body"),
            on_update: None,
        }
    }
}

impl<V> RouterConfig<V> {
    /// The path to redirect to when the location has no fragment at startup.
    ///
    /// Defaults to `/`.
    pub fn default_path(self, path: impl Into<String>) -> Self {
        Self {
            default_path: path.into(),
            ..self
        }
    }

    /// The id given to the top-level container installed by [`Router::body`].
    ///
    /// Defaults to `Body`.
    ///
    /// [`Router::body`]: crate::prelude::Router::body
    pub fn container_id(self, id: impl Into<String>) -> Self {
        Self {
            container_id: id.into(),
            ..self
        }
    }

    /// A function to be called whenever the routing is updated.
    ///
    /// The callback receives the content of the new dispatch, which is the place to hand it to the
    /// rendering runtime. It is called once per dispatch, including the first one.
    ///
    /// Defaults to [`None`].
    pub fn on_update(self, callback: impl Fn(Option<&View<V>>) + 'static) -> Self {
        Self {
            on_update: Some(Rc::new(callback)),
            ..self
        }
    }

    /// The configured default path.
    pub fn default_path_str(&self) -> &str {
        &self.default_path
    }

    /// The configured container id.
    pub fn container_id_str(&self) -> &str {
        &self.container_id
    }
}

impl<V> fmt::Debug for RouterConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("default_path", &self.default_path)
            .field("container_id", &self.container_id)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}
