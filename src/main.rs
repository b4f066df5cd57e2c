use std::error::Error;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; real env vars still apply.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,snippet_reconciler=debug"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    // One-shot mode: `insight-bridge 'vscode://insight.bridge/open-diff?...'`
    if let Some(uri) = std::env::args().nth(1) {
        info!(%uri, "one-shot bridge uri");
        let response = tokio::task::spawn_blocking(move || api::run_uri(&uri)).await??;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    api::start().await?;

    Ok(())
}
