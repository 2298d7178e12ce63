#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod route_definition;
pub mod router;
pub mod service;

mod error;
mod router_cfg;

/// Components the router provides to the rendering runtime.
pub mod components {
    mod body;
    pub use body::*;

    mod link;
    pub use link::*;

    mod markup;
    pub use markup::*;
}

mod contexts {
    pub(crate) mod navigation;
    pub use navigation::*;
}

/// Location integrations, re-exported from `hashrouter-history`.
pub mod history {
    pub use hashrouter_history::*;
}

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::components::*;
    pub use crate::contexts::*;
    pub use crate::error::RouterError;
    pub use crate::history::*;
    pub use crate::route_definition::*;
    pub use crate::router::*;
    pub use crate::router_cfg::*;
    pub use crate::service::*;
}
