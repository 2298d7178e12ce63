use std::{cell::RefCell, rc::Rc};

use crate::{fragment_for, AddressError, Location, Params, Subscription};

#[derive(Default)]
struct MemoryLocationState {
    fragment: String,
    next_listener: usize,
    listeners: Vec<(usize, Rc<dyn Fn()>)>,
}

/// A [`Location`] that stores the fragment in memory.
///
/// Listeners are called synchronously whenever the fragment changes. Writing the same fragment
/// twice notifies nobody, mirroring the `hashchange` event of a browser.
#[derive(Default)]
pub struct MemoryLocation {
    state: Rc<RefCell<MemoryLocationState>>,
}

impl MemoryLocation {
    /// Create a [`MemoryLocation`] starting at `path`.
    ///
    /// ```rust
    /// # use hashrouter_history::{Location, MemoryLocation};
    /// let location = MemoryLocation::with_initial_path("/about");
    /// assert_eq!(location.current_path(), "/about");
    /// ```
    pub fn with_initial_path(path: impl ToString) -> Self {
        let state = MemoryLocationState {
            fragment: path.to_string(),
            ..Default::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Replace the fragment as if the user edited the address bar.
    ///
    /// A leading `#` is stripped. No validation takes place, the router sees exactly what was
    /// written.
    pub fn set_fragment(&self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.replace(fragment.to_string());
    }

    /// The number of registered change callbacks.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn replace(&self, fragment: String) {
        let listeners: Vec<_> = {
            let mut write = self.state.borrow_mut();
            if write.fragment == fragment {
                return;
            }
            write.fragment = fragment;
            write
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect()
        };

        // the borrow is released, listeners are free to read the location again
        for listener in listeners {
            listener();
        }
    }
}

impl Location for MemoryLocation {
    fn current_path(&self) -> String {
        self.state.borrow().fragment.clone()
    }

    fn navigate(&self, path: &str, params: &Params) -> Result<(), AddressError> {
        let fragment = fragment_for(path, params)?;
        tracing::trace!(%fragment, "memory navigation");
        self.replace(fragment);
        Ok(())
    }

    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription {
        let id = {
            let mut write = self.state.borrow_mut();
            let id = write.next_listener;
            write.next_listener += 1;
            write.listeners.push((id, callback));
            id
        };

        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .borrow_mut()
                    .listeners
                    .retain(|(listener, _)| *listener != id);
            }
        })
    }
}
