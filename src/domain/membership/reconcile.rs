//! Rebuilding department member sets from employee references

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::department::{Department, DepartmentId};
use crate::domain::employee::{Employee, EmployeeId};

/// Group employee ids by the department they point at
pub fn derive_memberships<'a>(
    employees: impl IntoIterator<Item = &'a Employee>,
) -> HashMap<DepartmentId, BTreeSet<EmployeeId>> {
    let mut memberships: HashMap<DepartmentId, BTreeSet<EmployeeId>> = HashMap::new();

    for employee in employees {
        if let Some(department) = employee.department() {
            memberships
                .entry(department.clone())
                .or_default()
                .insert(employee.id().clone());
        }
    }

    memberships
}

/// Difference between a department's stored member set and the derived one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipDrift {
    pub department_id: DepartmentId,
    pub department_name: String,
    /// Ids referencing the department but absent from its set
    pub missing: BTreeSet<EmployeeId>,
    /// Ids in the set whose employee points elsewhere or no longer exists
    pub stale: BTreeSet<EmployeeId>,
}

impl MembershipDrift {
    /// Compare a department against the expected member set
    pub fn detect(department: &Department, expected: &BTreeSet<EmployeeId>) -> Option<Self> {
        let stored = department.employees();

        if stored == expected {
            return None;
        }

        Some(Self {
            department_id: department.id().clone(),
            department_name: department.name().to_string(),
            missing: expected.difference(stored).cloned().collect(),
            stale: stored.difference(expected).cloned().collect(),
        })
    }
}

/// Outcome of a reconciliation sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub dry_run: bool,
    pub departments_checked: usize,
    pub employees_checked: usize,
    pub departments_repaired: usize,
    pub missing_members_added: usize,
    pub stale_members_removed: usize,
    /// Employees whose department reference pointed at a missing department
    pub dangling_references_cleared: usize,
    pub drift: Vec<MembershipDrift>,
    pub dangling: Vec<EmployeeId>,
}

impl ReconcileReport {
    pub fn is_consistent(&self) -> bool {
        self.drift.is_empty() && self.dangling.is_empty()
    }

    pub(crate) fn record_drift(&mut self, drift: MembershipDrift) {
        self.missing_members_added += drift.missing.len();
        self.stale_members_removed += drift.stale.len();
        self.departments_repaired += 1;
        self.drift.push(drift);
    }

    pub(crate) fn record_dangling(&mut self, employee: EmployeeId) {
        self.dangling_references_cleared += 1;
        self.dangling.push(employee);
    }
}
