use anyhow::Result;
use habitual::commands::Cli;
use habitual::libs::logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    Cli::menu().await
}
