//! Component tags.
//!
//! A tag is the 32-bit identifier naming a component's type - the first
//! field of every frame. Which tag means what is a catalog concern that
//! lives outside this crate; here tags are opaque values that are written,
//! read, and compared.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque 32-bit component type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(u32);

impl Tag {
    /// Tag from its raw 32-bit value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw 32-bit value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u32> for Tag {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
