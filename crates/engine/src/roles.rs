//! Role and capability model.
//!
//! A user's standing is the product of two independent axes: the
//! organization kind they belong to and their rank inside it. Call sites
//! never compare raw role strings; they fold the pair into a [`Role`] and
//! ask for a [`Capability`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Organization affiliation as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizerRole {
    Company,
    Supplier,
    NotHaveOrganizer,
}

impl OrganizerRole {
    /// Returns the canonical role string used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Supplier => "supplier",
            Self::NotHaveOrganizer => "not_have_organizer",
        }
    }
}

/// A user's standing within their organization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRank {
    Admin,
    Manager,
    Employee,
}

impl UserRank {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

/// Affiliation and rank folded into one tagged value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Company(UserRank),
    Supplier(UserRank),
    /// Registered but not yet attached to any organization.
    Unaffiliated(UserRank),
}

/// Actions the permission model can grant.
///
/// Anything not listed here is denied for everyone; there is no
/// "allow by default" path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    ManageSuppliers,
    AddEmployees,
    ViewSuppliers,
    ViewEmployees,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::ManageSuppliers,
        Capability::AddEmployees,
        Capability::ViewSuppliers,
        Capability::ViewEmployees,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManageSuppliers => "manage_suppliers",
            Self::AddEmployees => "add_employees",
            Self::ViewSuppliers => "view_suppliers",
            Self::ViewEmployees => "view_employees",
        }
    }
}

impl Role {
    /// Folds the backend's two role fields into one value.
    pub fn from_parts(organizer: OrganizerRole, rank: UserRank) -> Self {
        match organizer {
            OrganizerRole::Company => Role::Company(rank),
            OrganizerRole::Supplier => Role::Supplier(rank),
            OrganizerRole::NotHaveOrganizer => Role::Unaffiliated(rank),
        }
    }

    pub fn organizer_role(self) -> OrganizerRole {
        match self {
            Role::Company(_) => OrganizerRole::Company,
            Role::Supplier(_) => OrganizerRole::Supplier,
            Role::Unaffiliated(_) => OrganizerRole::NotHaveOrganizer,
        }
    }

    pub fn rank(self) -> UserRank {
        match self {
            Role::Company(rank) | Role::Supplier(rank) | Role::Unaffiliated(rank) => rank,
        }
    }

    /// Returns `true` when this role grants `capability`.
    ///
    /// The conditions mirror the dashboard's access rules: supplier
    /// management is reserved to company admins, the employee-facing
    /// capabilities only look at the rank axis.
    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageSuppliers => matches!(self, Role::Company(UserRank::Admin)),
            Capability::AddEmployees => self.rank() == UserRank::Admin,
            Capability::ViewSuppliers => matches!(self, Role::Company(_)),
            Capability::ViewEmployees => self.rank() == UserRank::Admin,
        }
    }

    /// The full capability set of this role. Deterministic and
    /// order-independent.
    pub fn permissions(self) -> BTreeSet<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.can(*capability))
            .collect()
    }

    /// Guard for company-side operations (creating supplies, the expense
    /// ledger).
    pub fn ensure_company(self, action: &str) -> ResultEngine<()> {
        match self {
            Role::Company(_) => Ok(()),
            _ => Err(EngineError::Forbidden(format!(
                "{action} is a company operation"
            ))),
        }
    }

    /// Guard for supplier-side operations (answering requests, advancing
    /// fulfillment, managing the catalog).
    pub fn ensure_supplier(self, action: &str) -> ResultEngine<()> {
        match self {
            Role::Supplier(_) => Ok(()),
            _ => Err(EngineError::Forbidden(format!(
                "{action} is a supplier operation"
            ))),
        }
    }

    /// Guard for capability-gated operations.
    pub fn ensure_capability(self, capability: Capability) -> ResultEngine<()> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(EngineError::Forbidden(format!(
                "requires the {} capability",
                capability.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_roles() -> Vec<Role> {
        let ranks = [UserRank::Admin, UserRank::Manager, UserRank::Employee];
        let mut roles = Vec::new();
        for rank in ranks {
            roles.push(Role::Company(rank));
            roles.push(Role::Supplier(rank));
            roles.push(Role::Unaffiliated(rank));
        }
        roles
    }

    #[test]
    fn permissions_total_over_every_role_pair() {
        for role in all_roles() {
            let permissions = role.permissions();
            for capability in Capability::ALL {
                assert_eq!(permissions.contains(&capability), role.can(capability));
            }
        }
    }

    #[test]
    fn company_admin_gets_the_full_set() {
        let permissions = Role::Company(UserRank::Admin).permissions();
        assert_eq!(permissions.len(), 4);
    }

    #[test]
    fn supplier_staff_get_nothing() {
        assert!(Role::Supplier(UserRank::Manager).permissions().is_empty());
        assert!(Role::Supplier(UserRank::Employee).permissions().is_empty());
    }

    #[test]
    fn supplier_admin_only_sees_employee_capabilities() {
        let permissions = Role::Supplier(UserRank::Admin).permissions();
        assert!(permissions.contains(&Capability::AddEmployees));
        assert!(permissions.contains(&Capability::ViewEmployees));
        assert!(!permissions.contains(&Capability::ManageSuppliers));
        assert!(!permissions.contains(&Capability::ViewSuppliers));
    }

    #[test]
    fn company_staff_view_but_do_not_manage_suppliers() {
        for rank in [UserRank::Manager, UserRank::Employee] {
            let role = Role::Company(rank);
            assert!(role.can(Capability::ViewSuppliers));
            assert!(!role.can(Capability::ManageSuppliers));
            assert!(!role.can(Capability::AddEmployees));
        }
    }

    #[test]
    fn role_round_trips_through_parts() {
        for role in all_roles() {
            assert_eq!(Role::from_parts(role.organizer_role(), role.rank()), role);
        }
    }
}
