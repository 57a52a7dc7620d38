//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The notification log grows with every registration, report, like and
//! comment; the retention sweep keeps it bounded. The same sweep is
//! exposed as `GET /cron/cleanup` for deployments that prefer an external
//! scheduler over the in-process one.

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::notifications::Notification;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Notification retention sweep - runs daily at 03:00
    let sweep_pool = pool.clone();
    let sweep_job = Job::new_async("0 0 3 * * *", move |_uuid, _lock| {
        let pool = sweep_pool.clone();
        Box::pin(async move {
            if let Err(e) = run_notification_sweep(&pool).await {
                tracing::error!("Notification retention sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (notification retention sweep daily at 03:00)");
    Ok(scheduler)
}

/// Delete notifications past the retention horizon.
pub async fn run_notification_sweep(pool: &PgPool) -> Result<u64> {
    let removed = Notification::delete_expired(pool).await?;
    if removed > 0 {
        tracing::info!(removed, "notification retention sweep removed expired rows");
    }
    Ok(removed)
}
