//! Membership consistency between employees and departments

mod manager;
mod reconciler;

pub use manager::MembershipManager;
pub use reconciler::Reconciler;
