//! Typed identifier for stored students.
//!
//! Identifiers are assigned by the store on insert, so unlike most value
//! types here there is no way to mint a fresh one in-process.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Surrogate key of a [`Student`](crate::student::Student).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(i64);

impl StudentId {
    /// Wrap a raw key as handed back by the store.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw key.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
