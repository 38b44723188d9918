//! Identifier types for users, dashboards, folders, companies and groups
//!
//! All identifiers are opaque strings issued elsewhere (the identity provider for
//! user ids, the storage layer for dashboard and folder ids). They serialize as
//! bare JSON strings.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from any string-like value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume into the raw string
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_identifier!(
    /// User identifier issued by the identity provider. Immutable once issued.
    UserId
);

string_identifier!(
    /// Dashboard identifier
    DashboardId
);

string_identifier!(
    /// Folder identifier
    FolderId
);

string_identifier!(
    /// Company code, e.g. `STTH`
    CompanyCode
);

string_identifier!(
    /// Group name, e.g. `sales`
    GroupName
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn identifiers_serialize_as_plain_strings() {
        let uid = UserId::new("u1");
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"u1\"");

        let parsed: CompanyCode = serde_json::from_str("\"STTH\"").unwrap();
        assert_eq!(parsed.as_str(), "STTH");
    }

    #[test]
    fn identifiers_can_be_looked_up_by_str() {
        let groups: BTreeSet<GroupName> = ["sales", "ops"].into_iter().map(GroupName::from).collect();
        assert!(groups.contains("sales"));
        assert!(!groups.contains("finance"));
    }
}
