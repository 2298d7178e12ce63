#![warn(missing_docs)]
//! Location fragment integration for `hashrouter`.
//!
//! The router relies on a [`Location`] to read the current address fragment, to write a new one
//! and to learn about changes made outside of the router (a user editing the address bar, the
//! back button, ...).
//!
//! To integrate the router with any kind of address storage, implement the [`Location`] trait.
//! This crate comes with an in-memory implementation, [`MemoryLocation`], and a browser
//! implementation, [`HashLocation`], behind the `web` feature.

use std::rc::Rc;

mod address;
pub use address::*;

mod memory;
pub use memory::*;

mod params;
pub use params::*;

mod subscription;
pub use subscription::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// An integration with some kind of addressable location fragment.
///
/// Implementations use interior mutability, a single instance is shared between the router and
/// every link that navigates through it.
pub trait Location {
    /// Get the path and query of the current fragment, without the leading `#`.
    ///
    /// Returns an empty string if there is no fragment at all.
    ///
    /// ```rust
    /// # use hashrouter_history::{Location, MemoryLocation, Params};
    /// let location = MemoryLocation::with_initial_path("/search?q=rust");
    /// assert_eq!(location.current_path(), "/search?q=rust");
    /// ```
    #[must_use]
    fn current_path(&self) -> String;

    /// Get the path portion of the current fragment, without the query.
    ///
    /// Falls back to the raw fragment if it cannot be parsed.
    ///
    /// ```rust
    /// # use hashrouter_history::{Location, MemoryLocation};
    /// let location = MemoryLocation::with_initial_path("/search?q=rust");
    /// assert_eq!(location.current_path_only(), "/search");
    /// ```
    #[must_use]
    fn current_path_only(&self) -> String {
        let current = self.current_path();
        match Address::parse(&current) {
            Ok(address) => address.path().to_string(),
            Err(_) => current,
        }
    }

    /// Go to another location.
    ///
    /// `path` may carry its own query, `params` are appended after it. The new fragment is
    /// `path?query` with the query in canonical form.
    ///
    /// ```rust
    /// # use hashrouter_history::{Location, MemoryLocation, Params};
    /// let location = MemoryLocation::default();
    /// location
    ///     .navigate("/users", &Params::parse("page=2"))
    ///     .unwrap();
    /// assert_eq!(location.current_path(), "/users?page=2");
    /// ```
    ///
    /// # Errors
    /// Returns an [`AddressError`] if `path` is not a valid address.
    fn navigate(&self, path: &str, params: &Params) -> Result<(), AddressError>;

    /// Provide the [`Location`] with an update callback.
    ///
    /// The callback is invoked without arguments every time the fragment changes, the router
    /// re-reads [`Location::current_path`] itself. It stays registered until the returned
    /// [`Subscription`] is dropped.
    ///
    /// ```rust
    /// # use std::{cell::Cell, rc::Rc};
    /// # use hashrouter_history::{Location, MemoryLocation};
    /// let location = MemoryLocation::default();
    /// let changes = Rc::new(Cell::new(0));
    /// let counter = changes.clone();
    /// let subscription = location.on_change(Rc::new(move || counter.set(counter.get() + 1)));
    ///
    /// location.set_fragment("/about");
    /// drop(subscription);
    /// location.set_fragment("/contact");
    /// assert_eq!(changes.get(), 1);
    /// ```
    fn on_change(&self, callback: Rc<dyn Fn()>) -> Subscription;
}

/// Build the fragment a navigation to `path` with `params` writes.
pub(crate) fn fragment_for(path: &str, params: &Params) -> Result<String, AddressError> {
    Ok(Address::parse(path)?.with_params(params).to_string())
}
