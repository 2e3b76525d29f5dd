//! Display tag identifier

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Six hex digit identifier printed on each tag, e.g. `061C95`
///
/// The digits are kept exactly as received so a decoded acknowledgement
/// re-encodes to the same characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayTagId(String);

impl DisplayTagId {
    /// Number of hex digits in a tag id
    pub const LEN: usize = 6;

    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.len() != Self::LEN || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Validation(format!(
                "display tag id must be {} hex digits, got {:?}",
                Self::LEN,
                id
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DisplayTagId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for DisplayTagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
