use std::io::{self, Write};

use recipe_harvest::{BotReply, CozeClient, HarvestConfig, RecipeSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = HarvestConfig::load()?;
    let mut client = CozeClient::new(&config.api)?;
    client.ensure_token(true)?;

    print!("Recipe name to look up: ");
    io::stdout().flush()?;
    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    let name = name.trim();
    if name.is_empty() {
        println!("Nothing to look up.");
        return Ok(());
    }

    match client.fetch(name).await? {
        BotReply::Recipe(recipe) => println!("{recipe}"),
        BotReply::Text(text) => {
            println!("Raw reply:");
            println!("{text}");
        }
    }
    Ok(())
}
