//! Ticker — normalized symbol identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange symbol, normalized to trimmed uppercase at construction.
///
/// Exchange-qualified symbols keep their suffix (`GOTO.JK`, `7203.T`); the
/// suffix drives currency inference when the provider has no better answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange suffix including the dot (`".JK"`), if present.
    pub fn suffix(&self) -> Option<&str> {
        self.0.rfind('.').map(|i| &self.0[i..])
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Ticker {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
