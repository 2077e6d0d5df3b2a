pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

use std::path::Path;

pub use batch::{run_batch, BatchSummary};
pub use client::{CozeClient, RecipeSource};
pub use config::{ApiConfig, HarvestConfig, StoreConfig};
pub use error::HarvestError;
pub use model::{BotReply, Recipe, RecipeStep};
pub use store::{append_recipe, resolve_next_id, Sheet, Workbook, RECIPES_SHEET};

/// Fetch one recipe from the configured bot.
///
/// Loads configuration, resolves the token non-interactively, and issues
/// a single query.
pub async fn fetch_recipe(name: &str) -> Result<BotReply, HarvestError> {
    let config = HarvestConfig::load()?;
    let mut client = CozeClient::new(&config.api)?;
    client.ensure_token(false)?;
    client.fetch(name).await
}

/// Fetch one recipe and append it to the workbook at `store_path`,
/// returning the id it was stored under.
pub async fn harvest_recipe(name: &str, store_path: &Path) -> Result<u64, HarvestError> {
    let recipe = match fetch_recipe(name).await? {
        BotReply::Recipe(recipe) => recipe,
        BotReply::Text(text) => return Err(HarvestError::UnstructuredReply(text)),
    };

    let missing = recipe.missing_required();
    if !missing.is_empty() {
        return Err(HarvestError::MissingFields(missing.join(", ")));
    }

    let id = resolve_next_id(store_path) + 1;
    append_recipe(&recipe, store_path, id)?;
    Ok(id)
}
