//! Action entry point.

use approved_by::config::ActionContext;
use approved_by::error::AppError;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Done.");
}

async fn run() -> Result<(), AppError> {
    let context = ActionContext::from_env()?;
    approved_by::run(&context).await
}
