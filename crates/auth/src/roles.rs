//! Role model for RBAC decisions.

use serde::{Deserialize, Serialize};

/// Role of the authenticated subject.
///
/// A role is only ever derived from a decoded token claim; no other component
/// may assign one. Unknown or absent claims map to [`Role::Guest`]
/// (fail-closed) rather than failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    /// Unauthenticated, or authenticated with an unrecognized role claim.
    #[default]
    #[serde(rename = "GUEST")]
    Guest,

    #[serde(rename = "ROLE_USER")]
    User,

    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

// Fail-closed deserialization: any string that is not a recognized claim
// literal becomes `Guest`.
impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::ADMIN_CLAIM => Self::Admin,
            Self::USER_CLAIM => Self::User,
            _ => Self::Guest,
        }
    }
}

impl Role {
    /// Recognized role claim literals issued by the backend.
    pub const ADMIN_CLAIM: &'static str = "ROLE_ADMIN";
    pub const USER_CLAIM: &'static str = "ROLE_USER";

    /// Map a raw role claim to a role, failing closed to `Guest`.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(Self::ADMIN_CLAIM) => Self::Admin,
            Some(Self::USER_CLAIM) => Self::User,
            _ => Self::Guest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "GUEST",
            Self::User => Self::USER_CLAIM,
            Self::Admin => Self::ADMIN_CLAIM,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Guest)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recognized_claims_map_to_roles() {
        assert_eq!(Role::from_claim(Some("ROLE_ADMIN")), Role::Admin);
        assert_eq!(Role::from_claim(Some("ROLE_USER")), Role::User);
    }

    #[test]
    fn absent_or_unknown_claims_fail_closed() {
        assert_eq!(Role::from_claim(None), Role::Guest);
        assert_eq!(Role::from_claim(Some("ROLE_SUPERUSER")), Role::Guest);
        assert_eq!(Role::from_claim(Some("role_admin")), Role::Guest);
        assert_eq!(Role::from_claim(Some("")), Role::Guest);
    }

    #[test]
    fn serde_round_trips_the_claim_literals() {
        for role in [Role::Guest, Role::User, Role::Admin] {
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn unknown_persisted_role_deserializes_to_guest() {
        let role: Role = serde_json::from_str("\"ROLE_WAREHOUSE\"").unwrap();
        assert_eq!(role, Role::Guest);
    }

    proptest! {
        /// Only the two exact claim literals grant a non-guest role.
        #[test]
        fn arbitrary_claims_never_escalate(claim in "\\PC*") {
            let role = Role::from_claim(Some(&claim));
            if claim != Role::ADMIN_CLAIM && claim != Role::USER_CLAIM {
                prop_assert_eq!(role, Role::Guest);
            }
        }
    }
}
