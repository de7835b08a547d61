//! Build stages announced by progress events
use std::fmt;

use serde::Deserialize;

/// Name of a build stage as a present participle, e.g. "bundling"
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(transparent)]
pub struct Phase(String);

impl Phase {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Renders the phase capitalized, e.g. "Bundling"
impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}
