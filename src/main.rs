use clap::Parser;
use dotenv::dotenv;

use rolodex_api::prelude::{AppError, Cli, log_filter, run_app};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run_app(cli).await
}
