use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a store-assigned value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Opaque identifier of a permission assigned by the backing store.
    PermissionId
);
numeric_id!(
    /// Opaque identifier of a role assigned by the backing store.
    RoleId
);
numeric_id!(
    /// Opaque identifier of a directory user assigned by the backing store.
    UserId
);

#[cfg(test)]
mod tests {
    use super::{PermissionId, RoleId};

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let encoded = serde_json::to_string(&RoleId::new(7));
        assert_eq!(encoded.unwrap_or_default(), "7");
    }

    #[test]
    fn ids_order_by_value() {
        assert!(PermissionId::new(2) < PermissionId::new(10));
    }
}
