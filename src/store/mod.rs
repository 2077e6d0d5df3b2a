mod append;
mod schema;
mod workbook;

pub use append::{append_recipe, resolve_next_id, RECIPES_SHEET};
pub use schema::{TableSchema, RECIPES_SCHEMA};
pub use workbook::{Sheet, Workbook};
