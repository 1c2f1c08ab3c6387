//! Planning member set updates for a single employee

use crate::domain::department::DepartmentId;

/// Member set updates required after an employee's department reference moved
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MembershipChange {
    /// Department whose set must drop the employee
    pub remove_from: Option<DepartmentId>,
    /// Department whose set must gain the employee
    pub add_to: Option<DepartmentId>,
}

impl MembershipChange {
    /// Plan the set updates for a move from `old` to `new`.
    ///
    /// Unchanged references produce no work. Clearing the reference only
    /// removes; assigning from none only adds.
    pub fn plan(old: Option<&DepartmentId>, new: Option<&DepartmentId>) -> Self {
        if old == new {
            return Self::default();
        }

        Self {
            remove_from: old.cloned(),
            add_to: new.cloned(),
        }
    }

    /// Set updates for a freshly created employee
    pub fn joining(department: Option<&DepartmentId>) -> Self {
        Self::plan(None, department)
    }

    /// Set updates for an employee about to be deleted
    pub fn leaving(department: Option<&DepartmentId>) -> Self {
        Self::plan(department, None)
    }

    pub fn is_noop(&self) -> bool {
        self.remove_from.is_none() && self.add_to.is_none()
    }
}
