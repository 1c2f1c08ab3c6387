//! Periodic background reconciliation of department member sets

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::manager::MembershipManager;

/// Background worker running the reconciliation sweep on a fixed interval
#[derive(Debug)]
pub struct Reconciler {
    manager: Arc<MembershipManager>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl Reconciler {
    pub fn new(
        manager: Arc<MembershipManager>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            manager,
            interval,
            shutdown,
        }
    }

    /// Spawn the worker onto the runtime
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Sweep every interval until the shutdown token is cancelled
    pub async fn run(self) {
        if self.interval.is_zero() {
            info!("Membership reconciler disabled");
            return;
        }

        info!(interval_secs = self.interval.as_secs(), "Membership reconciler started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    break;
                }
                _ = ticker.tick() => {
                    self.sweep().await;
                }
            }
        }

        info!("Membership reconciler stopped");
    }

    async fn sweep(&self) {
        match self.manager.reconcile(false).await {
            Ok(report) if report.is_consistent() => {
                debug!(
                    departments = report.departments_checked,
                    "Department member sets consistent"
                );
            }
            Ok(report) => {
                warn!(
                    repaired = report.departments_repaired,
                    added = report.missing_members_added,
                    removed = report.stale_members_removed,
                    dangling = report.dangling_references_cleared,
                    "Reconciler repaired membership drift"
                );
            }
            Err(e) => {
                error!(error = %e, "Membership reconciliation failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::department::{Department, DepartmentId};
    use crate::domain::employee::{Employee, EmployeeId, Role};
    use crate::infrastructure::department::StorageDepartmentRepository;
    use crate::infrastructure::employee::StorageEmployeeRepository;
    use crate::infrastructure::storage::InMemoryStorage;

    fn manager() -> Arc<MembershipManager> {
        Arc::new(MembershipManager::new(
            Arc::new(StorageEmployeeRepository::new(Arc::new(
                InMemoryStorage::<Employee>::new(),
            ))),
            Arc::new(StorageDepartmentRepository::new(Arc::new(
                InMemoryStorage::<Department>::new(),
            ))),
        ))
    }

    #[tokio::test]
    async fn test_reconciler_repairs_drift_and_stops() {
        let manager = manager();
        let ortho = manager
            .create_department(Department::new(DepartmentId::generate(), "Orthodontics").unwrap())
            .await
            .unwrap();
        let travis = manager
            .create_employee(Employee::new(
                EmployeeId::generate(),
                "Travis",
                "Combs",
                "travis.combs@dentist.com",
                "hash",
                Role::Employee,
                Some(ortho.id().clone()),
            ))
            .await
            .unwrap();

        manager
            .departments()
            .replace_members(ortho.id(), BTreeSet::new())
            .await
            .unwrap();

        let shutdown = CancellationToken::new();
        let handle =
            Reconciler::new(manager.clone(), Duration::from_millis(20), shutdown.clone()).spawn();

        tokio::time::sleep(Duration::from_millis(120)).await;
        shutdown.cancel();
        tokio_test::assert_ok!(handle.await);

        let stored = manager.departments().get(ortho.id()).await.unwrap().unwrap();
        assert!(stored.has_employee(travis.id()));
    }

    #[tokio::test]
    async fn test_reconciler_exits_promptly_on_shutdown() {
        let shutdown = CancellationToken::new();
        let handle = Reconciler::new(manager(), Duration::from_secs(3600), shutdown.clone()).spawn();

        shutdown.cancel();
        let joined = tokio::time::timeout(Duration::from_secs(1), handle).await;

        assert!(joined.is_ok());
    }
}
