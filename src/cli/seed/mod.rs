//! Seed command - replaces all data with the demo dataset

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::seed::{seed_demo_data, DEMO_PASSWORD};

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = crate::create_app_state_with_config(&config).await?;

    let summary = seed_demo_data(
        &state.membership,
        &state.department_service,
        &state.employee_service,
    )
    .await?;

    info!(
        departments = summary.departments,
        employees = summary.employees,
        "Demo data loaded; every account uses the password '{}'",
        DEMO_PASSWORD
    );

    Ok(())
}
