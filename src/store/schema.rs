use log::info;

use super::workbook::Sheet;

/// Ordered column layout for a table, with a version recording its lineage.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub version: u32,
    pub columns: &'static [&'static str],
}

/// Current recipes table layout. Version 1 predates `tips` and
/// `difficulty`; stores written under it pick the columns up on their
/// next append.
pub const RECIPES_SCHEMA: TableSchema = TableSchema {
    version: 2,
    columns: &[
        "id",
        "name",
        "cook_time",
        "calories",
        "image",
        "description",
        "steps",
        "tools",
        "prep_steps",
        "tips",
        "difficulty",
        "created_at",
        "updated_at",
    ],
};

impl TableSchema {
    /// Bring a sheet's header up to this schema at open time.
    ///
    /// An empty sheet gets the full header written verbatim. Otherwise
    /// each missing column is appended at the right edge in schema order;
    /// existing data rows are left untouched and read as blank in the new
    /// columns. Returns the columns that were added.
    pub fn migrate(&self, sheet: &mut Sheet) -> Vec<String> {
        if sheet.rows.is_empty() {
            sheet
                .rows
                .push(self.columns.iter().map(|c| c.to_string()).collect());
            return Vec::new();
        }

        let mut added = Vec::new();
        for column in self.columns {
            if !sheet.rows[0].iter().any(|h| h == column) {
                sheet.rows[0].push(column.to_string());
                added.push(column.to_string());
            }
        }
        if !added.is_empty() {
            info!(
                "extended '{}' header (schema v{}) with: {}",
                sheet.name,
                self.version,
                added.join(", ")
            );
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_writes_full_header_on_empty_sheet() {
        let mut sheet = Sheet {
            name: "recipes".to_string(),
            rows: Vec::new(),
        };

        let added = RECIPES_SCHEMA.migrate(&mut sheet);

        assert!(added.is_empty());
        assert_eq!(sheet.header(), RECIPES_SCHEMA.columns);
    }

    #[test]
    fn test_migrate_appends_missing_columns_rightmost() {
        // a v1-era header, without tips and difficulty
        let mut sheet = Sheet {
            name: "recipes".to_string(),
            rows: vec![
                vec![
                    "id".to_string(),
                    "name".to_string(),
                    "cook_time".to_string(),
                    "calories".to_string(),
                    "image".to_string(),
                    "description".to_string(),
                    "steps".to_string(),
                    "tools".to_string(),
                    "prep_steps".to_string(),
                    "created_at".to_string(),
                    "updated_at".to_string(),
                ],
                vec!["1".to_string(), "Noodles".to_string()],
            ],
        };

        let added = RECIPES_SCHEMA.migrate(&mut sheet);

        assert_eq!(added, vec!["tips", "difficulty"]);
        let header = sheet.header();
        assert_eq!(&header[header.len() - 2..], ["tips", "difficulty"]);
        // the existing data row is not backfilled
        assert_eq!(sheet.rows[1].len(), 2);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut sheet = Sheet {
            name: "recipes".to_string(),
            rows: Vec::new(),
        };

        RECIPES_SCHEMA.migrate(&mut sheet);
        let second = RECIPES_SCHEMA.migrate(&mut sheet);

        assert!(second.is_empty());
        assert_eq!(sheet.header().len(), RECIPES_SCHEMA.columns.len());
    }
}
