use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use txhistory::bootstrap::run;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!("txhistory error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
