// Engine main entry point: loads settings, seeds the store and prints the family dashboard
use anyhow::Context;
use chrono::Utc;
use engine::config::EngineSettings;
use engine::services::FamilyService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = EngineSettings::from_env().context("Failed to load engine settings")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(member = %settings.current_member, "Starting Family Fund engine...");

    let now = Utc::now();
    let service = FamilyService::with_settings(settings, now).await?;

    let reconciled = service.reconcile_statuses(now.naive_utc()).await;
    info!(count = reconciled.len(), "Statuses reconciled against today's date");

    let dashboard = service.dashboard(now).await?;
    info!(
        active = dashboard.active_count,
        total = %dashboard.total_collected_text,
        "Family dashboard"
    );
    for project in &dashboard.projects {
        info!(
            id = %project.id,
            title = %project.title,
            status = %project.status_label,
            progress = %project.progress_text,
            collected = %project.collected_text,
            target = %project.target_text,
            deadline = %project.deadline_text,
            days = %project.days_left_text,
            "Project"
        );
    }

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
