use hashrouter_history::AddressError;

/// An error raised by the router.
///
/// Both kinds are caller defects: an invalid pattern is a configuration mistake that surfaces at
/// registration, an invalid address a mistake in a navigation target.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// A route pattern could not be compiled.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern, including the prefix of its group.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A navigation target is not a valid address.
    #[error(transparent)]
    Address(#[from] AddressError),
}
