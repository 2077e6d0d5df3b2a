use std::collections::HashMap;
use std::path::Path;

use chrono::Local;
use log::{debug, warn};

use crate::error::HarvestError;
use crate::model::{scalar_text, Recipe};

use super::schema::RECIPES_SCHEMA;
use super::workbook::Workbook;

/// Sheet holding one row per archived recipe.
pub const RECIPES_SHEET: &str = "recipes";

/// Last identifier recorded in the store, from its current state.
///
/// Scans the recipes sheet's id column from the bottom, skipping blank
/// cells. A missing file, missing sheet, or header-only sheet yields 0.
/// So does any read failure: the batch resumes numbering best-effort
/// rather than refusing to run.
pub fn resolve_next_id(path: &Path) -> u64 {
    match last_id(path) {
        Ok(id) => id,
        Err(e) => {
            warn!(
                "could not read last id from {}: {e}; starting from 0",
                path.display()
            );
            0
        }
    }
}

fn last_id(path: &Path) -> Result<u64, HarvestError> {
    if !path.exists() {
        return Ok(0);
    }
    let workbook = Workbook::load(path)?;
    let sheet = match workbook.sheet(RECIPES_SHEET) {
        Some(sheet) => sheet,
        None => return Ok(0),
    };
    let id_col = match sheet.column("id") {
        Some(col) => col,
        None => return Ok(0),
    };
    for row in (0..sheet.data_rows()).rev() {
        let cell = sheet.cell(row, id_col);
        if cell.is_empty() {
            continue;
        }
        return cell
            .parse::<u64>()
            .map_err(|_| HarvestError::Store(format!("id cell {cell:?} is not an integer")));
    }
    Ok(0)
}

/// Append one recipe as a new bottom row, stamping `id` and the current
/// wall-clock timestamps.
///
/// The sheet header is migrated to [`RECIPES_SCHEMA`] first, so stores
/// written under an older layout pick up new columns here. The row is
/// built positionally against the migrated header; columns the recipe has
/// no value for get an empty cell. The whole file is rewritten on success.
pub fn append_recipe(recipe: &Recipe, path: &Path, id: u64) -> Result<(), HarvestError> {
    let mut workbook = Workbook::load_or_new(path)?;
    let sheet = workbook.sheet_or_insert(RECIPES_SHEET);
    RECIPES_SCHEMA.migrate(sheet);

    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let fields = field_map(recipe, id, &now)?;
    let row: Vec<String> = sheet
        .header()
        .iter()
        .map(|column| fields.get(column.as_str()).cloned().unwrap_or_default())
        .collect();

    debug!("appending row for '{}' with id {id}", recipe.name);
    sheet.push_row(row);
    workbook.save(path)
}

/// Flatten a recipe into cell text keyed by column name. Composite fields
/// are JSON-encoded since the store has no nested cells.
fn field_map(
    recipe: &Recipe,
    id: u64,
    now: &str,
) -> Result<HashMap<&'static str, String>, HarvestError> {
    let mut fields = HashMap::new();
    fields.insert("id", id.to_string());
    fields.insert("name", recipe.name.clone());
    fields.insert("cook_time", scalar_text(recipe.cook_time.as_ref()));
    fields.insert("calories", scalar_text(recipe.calories.as_ref()));
    fields.insert("image", recipe.image.clone().unwrap_or_default());
    fields.insert("description", recipe.description.clone().unwrap_or_default());
    fields.insert("steps", serde_json::to_string(&recipe.steps)?);
    fields.insert("tools", serde_json::to_string(&recipe.tools)?);
    fields.insert("prep_steps", serde_json::to_string(&recipe.prep_steps)?);
    fields.insert("tips", serde_json::to_string(&recipe.tips)?);
    fields.insert("difficulty", recipe.difficulty.clone().unwrap_or_default());
    fields.insert("created_at", now.to_string());
    fields.insert("updated_at", now.to_string());
    Ok(fields)
}
