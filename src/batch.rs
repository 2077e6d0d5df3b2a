use std::path::Path;

use log::{info, warn};
use tokio::fs;

use crate::client::RecipeSource;
use crate::error::HarvestError;
use crate::model::BotReply;
use crate::store::{append_recipe, resolve_next_id};

/// Outcome counts for one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Names read from the input file
    pub total: usize,
    /// Rows appended to the store
    pub saved: usize,
    /// Items skipped before the appender (failed fetch, raw-text reply,
    /// or missing required fields)
    pub skipped: usize,
    /// Items whose append failed
    pub failed: usize,
}

/// Read recipe names from `names_path` (one per line, blank lines
/// ignored) and archive each into the workbook at `store_path`.
///
/// Identifiers continue from the store's last recorded id: item N of the
/// batch gets `last + N`, counting skipped items too, so a re-run over a
/// partly-failed list never reuses an id. Every per-item failure is
/// logged and skipped; the batch always runs to the end of the list.
pub async fn run_batch<S: RecipeSource>(
    source: &S,
    names_path: &Path,
    store_path: &Path,
) -> Result<BatchSummary, HarvestError> {
    let text = fs::read_to_string(names_path).await?;
    let names: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut summary = BatchSummary {
        total: names.len(),
        ..Default::default()
    };
    if names.is_empty() {
        println!("No recipe names found in {}", names_path.display());
        return Ok(summary);
    }

    let last_id = resolve_next_id(store_path);
    info!("last id in {}: {last_id}", store_path.display());

    for (index, name) in names.iter().enumerate() {
        println!("{}", "-".repeat(50));
        println!("[{}/{}] {}", index + 1, summary.total, name);

        let reply = match source.fetch(name).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("fetching '{name}' from {} failed: {e}", source.source_name());
                summary.skipped += 1;
                continue;
            }
        };

        let recipe = match reply {
            BotReply::Recipe(recipe) => recipe,
            BotReply::Text(text) => {
                warn!("'{name}' came back as plain text, not recipe data: {text}");
                summary.skipped += 1;
                continue;
            }
        };

        let missing = recipe.missing_required();
        if !missing.is_empty() {
            warn!("'{name}' is missing required fields: {}", missing.join(", "));
            summary.skipped += 1;
            continue;
        }

        let id = last_id + index as u64 + 1;
        match append_recipe(&recipe, store_path, id) {
            Ok(()) => {
                println!("Saved '{}' with id {id}", recipe.name);
                summary.saved += 1;
            }
            Err(e) => {
                warn!("saving '{}' failed: {e}", recipe.name);
                summary.failed += 1;
            }
        }
    }

    println!();
    println!(
        "Done: {} saved, {} skipped, {} failed (of {})",
        summary.saved, summary.skipped, summary.failed, summary.total
    );
    Ok(summary)
}
