use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error for malformed identifier strings.
#[derive(Debug, Error)]
#[error("invalid identifier '{value}': {source}")]
pub struct IdParseError {
    pub value: String,
    #[source]
    pub source: uuid::Error,
}

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier (UUID v4, 128 bits of
            /// entropy - collision probability is cryptographically
            /// negligible).
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self).map_err(|source| IdParseError {
                    value: s.to_string(),
                    source,
                })
            }
        }
    };
}

uuid_id! {
    /// Identifies one specific answer instance.
    ResponseId
}

uuid_id! {
    /// Primary key into the audit store. Distinct from [`ResponseId`] so
    /// answer identity and audit identity can diverge in future layouts.
    AuditId
}
