// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The identity context every decision function takes.
//!
//! Who may approve, who may claim, and who may act for which employee
//! are pure functions of this value and the entity state. There is no
//! ambient session lookup anywhere in the decision logic.

/// Authorization role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Managers create and edit schedules, approve or reject
    /// releases and time off, and may act on behalf of any employee.
    Manager,
    /// Staff act only for their own linked employee record: release
    /// their own shifts, claim others', request time off.
    Staff,
}

impl Role {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }

    /// Parses a role from its string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manager" => Some(Self::Manager),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The user account ID.
    pub user_id: i64,
    /// The user's authorization role.
    pub role: Role,
    /// The employee record linked to this account, if any. Managers
    /// need not be employees.
    pub employee_id: Option<i64>,
}

impl Identity {
    /// Creates a new `Identity`.
    #[must_use]
    pub const fn new(user_id: i64, role: Role, employee_id: Option<i64>) -> Self {
        Self {
            user_id,
            role,
            employee_id,
        }
    }

    /// Returns whether this identity holds the manager role.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }

    /// Returns whether this identity may act on behalf of
    /// `employee_id`: managers may act for anyone, staff only for
    /// their own linked employee.
    #[must_use]
    pub fn acts_for(&self, employee_id: i64) -> bool {
        self.is_manager() || self.employee_id == Some(employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("manager"), Some(Role::Manager));
        assert_eq!(Role::parse("staff"), Some(Role::Staff));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_manager_acts_for_anyone() {
        let identity = Identity::new(1, Role::Manager, None);
        assert!(identity.acts_for(42));
    }

    #[test]
    fn test_staff_acts_only_for_linked_employee() {
        let identity = Identity::new(2, Role::Staff, Some(7));
        assert!(identity.acts_for(7));
        assert!(!identity.acts_for(8));

        let unlinked = Identity::new(3, Role::Staff, None);
        assert!(!unlinked.acts_for(7));
    }
}
