use std::io::Write as _;

use chrono::{Datelike, Utc};
use rota_core::config::load_config;
use rota_core::constants::DEFAULT_ANCHOR;
use rota_store::auth::Authorizer;
use rota_store::client::TasksClient;
use rota_sync::run::{load_schedule, sync_window};
use rota_sync::window::month_window;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .init();

    tracing::info!("Starting rota recurring-task sync");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let authorizer =
        Authorizer::from_files(&config.store.credentials_path, &config.store.token_path).await?;

    if !authorizer.is_authorized().await {
        let code = prompt_for_code(&authorizer)?;
        authorizer.exchange_code(code.trim()).await?;
    }

    let client = TasksClient::new(authorizer);

    tracing::info!(title = %config.store.list_title, "Searching for task list");
    let list = client.find_task_list(&config.store.list_title).await?;
    tracing::info!(id = %list.id, "Task list found");

    let schedule = load_schedule(&config.schedule.path, DEFAULT_ANCHOR)?;

    let now = Utc::now();
    let (start, end) = month_window(now.year(), now.month())?;

    let report = sync_window(&client, &list.id, &schedule, start, end).await?;

    tracing::info!(
        projected = report.projected,
        existing = report.existing,
        created = report.created,
        "Sync complete"
    );

    Ok(())
}

/// Prints the authorization URL and reads the pasted code from stdin.
fn prompt_for_code(authorizer: &Authorizer) -> anyhow::Result<String> {
    println!(
        "Authorize this app by visiting this url: {}",
        authorizer.authorization_url()?
    );
    print!("Enter the code from that page here: ");
    std::io::stdout().flush()?;

    let mut code = String::new();
    std::io::stdin().read_line(&mut code)?;
    Ok(code)
}
