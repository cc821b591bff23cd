use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::economy::{EconomyConfigRepository, SeaOrmEconomyStore},
    error::AppError,
    service::economy::{EconomyService, InterestSummary},
};

/// Starts the bank interest scheduler
///
/// Every tick credits interest for every whole interval that elapsed since each
/// account's last accrual. Runs are idempotent, so the schedule only controls how
/// soon interest shows up, not how much is paid.
///
/// # Arguments
/// - `db`: Database connection
/// - `schedule`: Cron expression with seconds, e.g. `0 * * * * *`
pub async fn start_scheduler(db: DatabaseConnection, schedule: &str) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            match accrue_all_guilds(&db, Utc::now()).await {
                Ok(summary) if summary.accounts_updated > 0 || summary.skipped > 0 => {
                    tracing::info!(
                        "Interest run: {} accounts updated, {} paid, {} skipped",
                        summary.accounts_updated,
                        summary.total_interest,
                        summary.skipped
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Error accruing bank interest: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Bank interest scheduler started ({})", schedule);

    Ok(())
}

/// Accrues interest in every guild with a stored economy configuration.
///
/// A guild whose run fails is logged and left for the next tick; the other guilds
/// still accrue.
///
/// # Returns
/// - `Ok(InterestSummary)` - Totals across all guilds
/// - `Err(AppError)` - The list of guilds could not be read
pub async fn accrue_all_guilds(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<InterestSummary, AppError> {
    let store = SeaOrmEconomyStore::new(db);
    let service = EconomyService::new(&store);

    let mut total = InterestSummary::default();
    for guild_id in EconomyConfigRepository::new(db).guild_ids().await? {
        match service.accrue_interest(guild_id, now).await {
            Ok(summary) => {
                total.accounts_updated += summary.accounts_updated;
                total.total_interest = total.total_interest.saturating_add(summary.total_interest);
                total.skipped += summary.skipped;
            }
            Err(e) => tracing::error!("Failed to accrue interest for guild {}: {}", guild_id, e),
        }
    }

    Ok(total)
}
