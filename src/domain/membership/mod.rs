//! Membership domain
//!
//! Pure rules for the Employee <-> Department link. An employee's
//! `department` field is the source of truth; a department's member set is
//! derived from it. The functions here compute what has to change and never
//! touch storage.

mod plan;
mod reconcile;

pub use plan::MembershipChange;
pub use reconcile::{derive_memberships, MembershipDrift, ReconcileReport};
