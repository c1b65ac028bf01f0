mod cli;
use log::debug;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Variables from .env never override the real environment
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {path:?}");
    }

    cli::run().await?;

    Ok(())
}
