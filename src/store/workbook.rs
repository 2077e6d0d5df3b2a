use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarvestError;

/// A workbook of named sheets persisted as a single JSON file.
///
/// Row 0 of a sheet is the header; data rows are positionally aligned to
/// it. Cells are text and a blank cell is the empty string. Saving
/// rewrites the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

/// One named table inside a [`Workbook`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Workbook {
    /// Read a workbook from disk. The file must exist and parse.
    pub fn load(path: &Path) -> Result<Self, HarvestError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read a workbook, or start an empty one if the file does not exist.
    pub fn load_or_new(path: &Path) -> Result<Self, HarvestError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Rewrite the whole file. Writes a sibling temp file first and
    /// renames it into place, so readers never observe a half-written
    /// workbook.
    pub fn save(&self, path: &Path) -> Result<(), HarvestError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    /// Get the named sheet, creating an empty one if absent.
    pub fn sheet_or_insert(&mut self, name: &str) -> &mut Sheet {
        let index = match self.sheets.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sheets.push(Sheet {
                    name: name.to_string(),
                    rows: Vec::new(),
                });
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index]
    }
}

impl Sheet {
    /// The header row. Empty for a sheet with no rows yet.
    pub fn header(&self) -> &[String] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Index of a header column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header().iter().position(|h| h == name)
    }

    /// Number of data rows, excluding the header.
    pub fn data_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Cell at `(row, col)` among data rows. Rows written before a column
    /// existed are shorter than the header and read as blank there.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row + 1)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}
