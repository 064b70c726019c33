use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares an opaque string id newtype.
///
/// Ids coming from the Content API are never interpreted; ids minted locally
/// carry a short prefix so they are recognisable in logs.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mints a fresh id, unique for the lifetime of the process.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

string_id!(
    /// Identifier of a node in the category forest.
    CategoryId,
    "cat"
);
string_id!(
    /// Identifier of a section, subsection or lesson in a course outline.
    CourseItemId,
    "item"
);
string_id!(
    /// Identifier of a content block, unique within its document.
    BlockId,
    "block"
);
