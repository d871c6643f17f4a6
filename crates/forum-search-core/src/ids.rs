//! Typed identifiers for forum records.
//!
//! Forum content is addressed by plain integer ids in the host application.
//! Wrapping each kind in its own type keeps a group id from being passed
//! where a topic id is expected, which matters here because every id ends
//! up spliced into an index tag.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! forum_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its raw value.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw integer value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

forum_id!(
    /// Identifier of a forum topic.
    TopicId
);

forum_id!(
    /// Identifier of a single post inside a topic.
    PostId
);

forum_id!(
    /// Identifier of a forum group (a board holding topics).
    GroupId
);

forum_id!(
    /// Identifier of a forum section (a category holding groups).
    SectionId
);

forum_id!(
    /// Identifier of the user who authored a topic or post.
    UserId
);
