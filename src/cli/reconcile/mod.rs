//! Reconcile command - one-off membership repair

use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;

#[derive(Debug, Clone, Default, Args)]
pub struct ReconcileArgs {
    /// Report drift without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(config: AppConfig, args: ReconcileArgs) -> anyhow::Result<()> {
    let state = crate::create_app_state_with_config(&config).await?;
    let report = state.membership.reconcile(args.dry_run).await?;

    if report.is_consistent() {
        info!(
            departments = report.departments_checked,
            employees = report.employees_checked,
            "Department member sets are consistent"
        );
    } else {
        warn!(
            departments_repaired = report.departments_repaired,
            dangling = report.dangling_references_cleared,
            dry_run = report.dry_run,
            "Membership drift found"
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
