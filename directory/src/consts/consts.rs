use std::fmt;

use serde::{Deserialize, Serialize};

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub u64);

impl PersonId {
    pub fn to_number(self) -> u64 {
        self.0
    }

    pub fn increment(&self) -> PersonId {
        PersonId(self.0 + 1)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaVersion(pub u32);

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// Values
pub const START_AT_ID: PersonId = PersonId(1);

/// Bumped whenever the snapshot layout changes, there is no migration between versions
pub const SCHEMA_VERSION: SchemaVersion = SchemaVersion(1);

pub const DEFAULT_PAGE_SIZE: usize = 4;
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination lists every page up to this count, above it pages are elided
pub const MAX_PAGES_WITHOUT_ELLIPSIS: usize = 7;

/// 5 MiB
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

pub const DEFAULT_AVATAR_URL: &str = "https://images.pexels.com/photos/1300402/pexels-photo-1300402.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop";

// Validation limits
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;
