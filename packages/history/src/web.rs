use std::rc::Rc;

use gloo::{events::EventListener, utils::window};
use tracing::error;
use web_sys::Window;

use crate::{fragment_for, AddressError, Location, Params, Subscription};

/// A [`Location`] that integrates with a browser via `window.location.hash`.
///
/// Change notifications come from the `hashchange` event, so edits to the address bar and the
/// browser's back and forward buttons all reach the router.
pub struct HashLocation {
    window: Window,
}

impl Default for HashLocation {
    fn default() -> Self {
        Self { window: window() }
    }
}

impl HashLocation {
    /// Create a new [`HashLocation`] bound to the global `window`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Location for HashLocation {
    fn current_path(&self) -> String {
        let hash = match self.window.location().hash() {
            Ok(hash) => hash,
            Err(e) => {
                error!("failed to read the location hash: {e:?}");
                return String::new();
            }
        };

        hash.strip_prefix('#').unwrap_or(&hash).to_string()
    }

    fn navigate(&self, path: &str, params: &Params) -> Result<(), AddressError> {
        let fragment = fragment_for(path, params)?;
        if let Err(e) = self.window.location().set_hash(&fragment) {
            error!("failed to set the location hash to `{fragment}`: {e:?}");
        }
        Ok(())
    }

    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription {
        let listener = EventListener::new(&self.window, "hashchange", move |_| callback());
        Subscription::new(move || drop(listener))
    }
}
