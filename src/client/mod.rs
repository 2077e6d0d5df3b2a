mod coze;

pub use coze::CozeClient;

use async_trait::async_trait;

use crate::error::HarvestError;
use crate::model::BotReply;

/// Upstream source of recipe data, keyed by recipe name.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short source name for logging (e.g. "coze")
    fn source_name(&self) -> &str;

    /// Ask the source for one recipe by name.
    async fn fetch(&self, name: &str) -> Result<BotReply, HarvestError>;
}
