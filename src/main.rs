use std::error::Error;

use ai_llm_service::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; a broken one is not.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }

    telemetry::init(telemetry::DEFAULT_FILTER)?;
    info!(version = env!("CARGO_PKG_VERSION"), "dishwise-backend starting");

    api::start().await?;

    Ok(())
}
