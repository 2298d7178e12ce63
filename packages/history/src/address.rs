use std::{fmt, str::FromStr};

use urlencoding::decode;

use crate::Params;

/// An error raised when an address cannot be parsed.
///
/// A malformed navigation target is a caller defect, the router never tries to recover from it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// A `%` is not followed by two hexadecimal digits.
    #[error("invalid percent escape in address `{0}`")]
    InvalidEscape(String),

    /// The address contains ASCII control characters.
    #[error("address `{0}` contains control characters")]
    ControlCharacter(String),

    /// The decoded path is not valid UTF-8.
    #[error("address `{0}` does not decode to valid UTF-8")]
    InvalidUtf8(String),
}

/// A parsed location fragment: a path and its query parameters.
///
/// A trailing `#fragment` is ignored, like a browser ignores it when resolving a URL.
///
/// ```rust
/// # use hashrouter_history::Address;
/// let address: Address = "/users/j%C3%B6rg?tab=info".parse().unwrap();
///
/// assert_eq!(address.path(), "/users/jörg");
/// assert_eq!(address.query().get("tab"), Some("info"));
/// assert_eq!(address.to_string(), "/users/j%C3%B6rg?tab=info");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    raw_path: String,
    path: String,
    query: Params,
}

impl Address {
    /// Parse `raw` as a path with an optional query string.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        if raw.chars().any(|c| c.is_ascii_control()) {
            return Err(AddressError::ControlCharacter(raw.to_string()));
        }
        if !valid_escapes(raw) {
            return Err(AddressError::InvalidEscape(raw.to_string()));
        }

        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (raw_path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = decode(raw_path)
            .map_err(|_| AddressError::InvalidUtf8(raw.to_string()))?
            .into_owned();

        Ok(Self {
            raw_path: raw_path.to_string(),
            path,
            query: Params::parse(query),
        })
    }

    /// The percent-decoded path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path as it was written, still percent-encoded.
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// The decoded path with exactly one trailing `/` appended when missing.
    ///
    /// An empty path canonicalizes to `/`.
    pub fn canonical_path(&self) -> String {
        let mut path = self.path.clone();
        if !path.ends_with('/') {
            path.push('/');
        }
        path
    }

    /// The query parameters.
    pub fn query(&self) -> &Params {
        &self.query
    }

    /// Append `params` after the query parameters of this address.
    #[must_use]
    pub fn with_params(mut self, params: &Params) -> Self {
        self.query.extend_from(params);
        self
    }

    /// Split into the decoded path and the query parameters.
    pub fn into_parts(self) -> (String, Params) {
        (self.path, self.query)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

fn valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = |b: Option<&u8>| b.is_some_and(u8::is_ascii_hexdigit);
            if !hex(bytes.get(i + 1)) || !hex(bytes.get(i + 2)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
