//! routinely - Agenda Entry Point
//!
//! Loads the data store and prints today's agenda: every project's
//! due tasks, with a marker for the ones still overdue.

use std::sync::Arc;

use routinely::store::{mock, FilePreferences, MemoryPreferences, PreferenceBackend};
use routinely::{recurrence, Config, DataStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routinely=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let backend: Arc<dyn PreferenceBackend> = if config.mock_data {
        info!("Mock data mode: using seeded in-memory records");
        let backend = MemoryPreferences::new();
        mock::seed(&backend).await?;
        Arc::new(backend)
    } else {
        info!("Loading records from {}", config.data_dir.display());
        Arc::new(FilePreferences::new(&config.data_dir))
    };

    let store = DataStore::load(backend).await;

    // The reference date is read once here and threaded through; the
    // engine itself never looks at the clock.
    let today = chrono::Local::now().date_naive();
    println!("Agenda for {today}");

    for project in store.projects().await {
        let tasks = store.tasks_for_project(project.id()).await;
        let due: Vec<_> = tasks
            .iter()
            .filter(|task| recurrence::is_due(task, today))
            .collect();
        if due.is_empty() {
            continue;
        }

        println!("\n{}", project.name());
        for task in due {
            let marker = if recurrence::is_overdue(task, today) {
                "!"
            } else {
                " "
            };
            println!("  [{marker}] {}", task.name());
        }
    }

    let overdue_count = store
        .tasks()
        .await
        .iter()
        .filter(|task| recurrence::is_overdue(task, today))
        .count();
    println!("\n{overdue_count} task(s) need attention");

    Ok(())
}
