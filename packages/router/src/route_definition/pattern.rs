use std::{fmt, str::FromStr};

use hashrouter_history::Address;
use regex::Regex;

use crate::prelude::RouterError;

const LITERAL_WEIGHT: u32 = 3;
const PARAMETER_WEIGHT: u32 = 2;
const WILDCARD_WEIGHT: u32 = 1;

/// How specific a [`Pattern`] is. Higher values win.
///
/// Every literal segment weighs more than a parameter segment, which weighs more than the trailing
/// wildcard. The root pattern has a specificity of zero, a missing match is represented by
/// [`None`] rather than by any value of this type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(u32);

impl Specificity {
    /// The specificity of the root pattern, `/`.
    pub const ROOT: Self = Self(0);

    /// The raw score.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A compiled route template.
///
/// A template is a `/` separated list of segments:
/// - `:name` captures one non-empty segment as the parameter `name`,
/// - `*` optionally swallows the rest of the path and may only appear last,
/// - anything else must match literally (after percent-decoding).
///
/// The compiled expression is anchored at the start of the path only. A pattern therefore matches
/// every path it is a prefix of, and competing matches are ranked by [`Specificity`]. Paths are
/// expected to end with a `/`.
///
/// ```rust
/// # use hashrouter::prelude::*;
/// let pattern = Pattern::compile("/users/:userID/*").unwrap();
///
/// assert_eq!(pattern.as_str(), "^/users/(?P<userID>[^/]+)(?:/.*)?/");
/// assert!(pattern.is_match("/users/7/"));
/// assert!(pattern.is_match("/users/7/network/"));
/// assert!(!pattern.is_match("/users/"));
/// ```
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    names: Vec<String>,
    specificity: Specificity,
}

impl Pattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidPattern`] if `pattern` is not a valid path template: it
    /// contains a query, a fragment, whitespace or a malformed escape, a parameter name is not an
    /// identifier or is used twice, or a wildcard is not the last segment.
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason: String| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if let Some(c) = pattern
            .chars()
            .find(|c| matches!(c, '?' | '#') || c.is_whitespace())
        {
            return Err(invalid(format!("unexpected character {c:?}")));
        }
        let address = Address::parse(pattern).map_err(|e| invalid(e.to_string()))?;

        let segments: Vec<&str> = address
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let mut expression = String::from("^");
        let mut names: Vec<String> = Vec::new();
        let mut score = 0;

        for (index, segment) in segments.iter().enumerate() {
            if *segment == "*" {
                if index + 1 != segments.len() {
                    return Err(invalid("a wildcard must be the last segment".to_string()));
                }
                expression.push_str("(?:/.*)?");
                score += WILDCARD_WEIGHT;
            } else if let Some(name) = segment.strip_prefix(':') {
                if !is_identifier(name) {
                    return Err(invalid(format!("`{name}` is not a valid parameter name")));
                }
                if names.iter().any(|n| n == name) {
                    return Err(invalid(format!("parameter `{name}` is declared twice")));
                }
                expression.push_str(&format!("/(?P<{name}>[^/]+)"));
                names.push(name.to_string());
                score += PARAMETER_WEIGHT;
            } else {
                expression.push('/');
                expression.push_str(&regex::escape(segment));
                score += LITERAL_WEIGHT;
            }
        }

        // paths are matched with a trailing separator
        expression.push('/');

        let regex = Regex::new(&expression).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            names,
            specificity: Specificity(score),
        })
    }

    /// The template this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The parameter names, in order of appearance.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The ranking score of this pattern.
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Check whether `path` matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and return every parameter with its captured value.
    pub fn captures<'a>(&'a self, path: &'a str) -> Option<Vec<(&'a str, &'a str)>> {
        let captures = self.regex.captures(path)?;
        Some(
            self.names
                .iter()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|value| (name.as_str(), value.as_str()))
                })
                .collect(),
        )
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("expression", &self.regex.as_str())
            .field("specificity", &self.specificity)
            .finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Pattern {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
