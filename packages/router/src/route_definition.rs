//! Several data types for defining what content to render for which path.

mod handler;
pub use handler::*;

mod pattern;
pub use pattern::*;

mod route;
pub use route::*;
