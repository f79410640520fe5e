//! Daily Heartbeat Entry Point
//!
//! Collects the rooms to watch and runs one heartbeat session per room.
//! Uses `anyhow` for startup errors; session failures are reported through
//! `heartbeat::RunReport`.

mod settings;

use std::sync::Arc;

use heartbeat::{AuthCookies, CollectTargetsUseCase, HttpLiveApi, RunHeartbeatsUseCase};
use platform::client::{build_http_client, resolve_user_agent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily=info,heartbeat=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let config = Arc::new(settings.heartbeat);

    // Cookies are validated before any request goes out
    let cookies = Arc::new(AuthCookies::parse(settings.cookies).map_err(|e| {
        e.log();
        e
    })?);

    let client = build_http_client(&settings.http)?;
    let user_agent = resolve_user_agent(&client).await;
    tracing::info!(user_agent = %user_agent, "HTTP client ready");

    let api = Arc::new(HttpLiveApi::new(client, user_agent));

    let targets = CollectTargetsUseCase::new(api.clone(), config.clone())
        .collect(&cookies)
        .await
        .map_err(|e| {
            e.log();
            e
        })?;

    if targets.is_empty() {
        tracing::info!("No rooms to watch");
        return Ok(());
    }

    let report = RunHeartbeatsUseCase::new(api, config)
        .run(cookies, targets)
        .await;

    let succeeded = report.succeeded().count();
    let failed = report.failed().count();
    tracing::info!(succeeded, failed, "Heartbeat run finished");
    for outcome in report.failed() {
        tracing::warn!("{}", outcome.describe());
    }

    if !report.is_all_success() {
        anyhow::bail!("{} of {} room sessions failed", failed, succeeded + failed);
    }

    Ok(())
}
