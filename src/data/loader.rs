//! CSV Data Loader Module
//! Handles CSV file loading and schema validation using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("No rows in {0}")]
    NoData(PathBuf),
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Dataset '{dataset}' is missing expected column '{column}'")]
    MissingColumn { dataset: String, column: String },
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars. Single-shot, no retries.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoadError> {
        if !file_path.is_file() {
            return Err(LoadError::FileNotFound(file_path.to_path_buf()));
        }

        // Lazy scan for memory efficiency, then collect once
        let df = LazyCsvReader::new(file_path.to_path_buf())
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(LoadError::NoData(file_path.to_path_buf()));
        }

        self.df = Some(df);
        self.df
            .as_ref()
            .ok_or_else(|| LoadError::NoData(file_path.to_path_buf()))
    }

    /// Check that every expected column is present.
    pub fn validate_schema(&self, dataset: &str, expected: &[&str]) -> Result<(), SchemaError> {
        let columns = self.get_columns();
        for column in expected {
            if !columns.iter().any(|c| c == column) {
                return Err(SchemaError::MissingColumn {
                    dataset: dataset.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_csv_infers_columns_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "t.csv", "a,b\n1,x\n2,y\n");

        let mut loader = DataLoader::new();
        loader.load_csv(&path).unwrap();
        assert_eq!(loader.get_row_count(), 2);
        assert_eq!(loader.get_columns(), vec!["a", "b"]);
    }

    #[test]
    fn load_csv_missing_file_fails() {
        let mut loader = DataLoader::new();
        let err = loader.load_csv(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn validate_schema_reports_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "t.csv", "a,b\n1,x\n");

        let mut loader = DataLoader::new();
        loader.load_csv(&path).unwrap();
        loader.validate_schema("test", &["a", "b"]).unwrap();
        let err = loader.validate_schema("test", &["a", "c"]).unwrap_err();
        let SchemaError::MissingColumn { dataset, column } = err;
        assert_eq!(dataset, "test");
        assert_eq!(column, "c");
    }
}
