use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried in an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Staff,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn as_set(self) -> RoleSet {
        match self {
            Self::Customer => RoleSet::CUSTOMER,
            Self::Staff => RoleSet::STAFF,
            Self::Admin => RoleSet::ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of roles allowed through an access policy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RoleSet: u8 {
        const CUSTOMER = 1 << 0;
        const STAFF = 1 << 1;
        const ADMIN = 1 << 2;

        const BACKOFFICE = Self::STAFF.bits() | Self::ADMIN.bits();
        const ALL = Self::CUSTOMER.bits() | Self::BACKOFFICE.bits();
    }
}

impl RoleSet {
    #[must_use]
    pub const fn allows(self, role: Role) -> bool {
        self.contains(role.as_set())
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        role.as_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoffice_admits_staff_and_admin_only() {
        assert!(RoleSet::BACKOFFICE.allows(Role::Staff));
        assert!(RoleSet::BACKOFFICE.allows(Role::Admin));
        assert!(!RoleSet::BACKOFFICE.allows(Role::Customer));
        assert!(!RoleSet::ADMIN.allows(Role::Staff));
    }
}
