use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use codedash::api::HttpBackend;
use codedash::config::AppConfig;
use codedash::screens::ProblemListScreen;
use codedash::services::LogNotifier;

/// Smoke driver: fetch and print the first page of problems against the
/// configured backend.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    info!(base_url = %config.api_base_url, "starting codedash");

    let backend = Arc::new(HttpBackend::new(&config));
    let notifier = Arc::new(LogNotifier);
    let mut screen = ProblemListScreen::new(
        backend,
        notifier,
        config.page_size,
        config.search_debounce,
    );

    screen.refresh().await;

    if let Some(error) = screen.error() {
        anyhow::bail!("could not load problems: {error}");
    }

    for row in screen.rows() {
        info!(
            title = %row.problem.title,
            difficulty = row.problem.difficulty.as_str(),
            solved = row.solved,
            "problem"
        );
    }
    info!(
        total = screen.total_problems_in_db(),
        pages = screen.total_pages(),
        "listing complete"
    );

    Ok(())
}
