use std::env;
use std::path::PathBuf;

use recipe_harvest::{run_batch, CozeClient, HarvestConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = HarvestConfig::load()?;

    // Names file and store path from the command line, falling back to config
    let args: Vec<String> = env::args().collect();
    let names_path = PathBuf::from(
        args.get(1)
            .cloned()
            .unwrap_or_else(|| config.store.names_file.clone()),
    );
    let store_path = PathBuf::from(
        args.get(2)
            .cloned()
            .unwrap_or_else(|| config.store.path.clone()),
    );

    let mut client = CozeClient::new(&config.api)?;
    // Fail before any network calls when no token is available
    client.ensure_token(false)?;

    run_batch(&client, &names_path, &store_path).await?;
    Ok(())
}
