// CSV-backed store for the `/api/data` endpoint
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const REQUIRED_COLUMNS: [&str; 5] = ["timestamp", "equipment_id", "energy", "carbon", "cost"];

pub type Row = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum CsvStoreError {
    #[error("CSV file not found")]
    NotFound,

    #[error("CSV missing columns: {}", column_list(.0))]
    MissingColumns(Vec<String>),

    #[error(transparent)]
    Read(#[from] csv::Error),
}

fn column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row, keyed by column name, with `equipment_id` exposed as
    /// `equipment`.
    pub fn load(&self) -> Result<Vec<Row>, CsvStoreError> {
        if !self.path.exists() {
            return Err(CsvStoreError::NotFound);
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !headers.iter().any(|h| h == **required))
            .map(|required| required.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CsvStoreError::MissingColumns(missing));
        }

        let columns: Vec<&str> = headers
            .iter()
            .map(|h| if h == "equipment_id" { "equipment" } else { h })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(column, cell)| (column.to_string(), typed_cell(cell)))
                .collect();
            rows.push(row);
        }

        tracing::debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

/// Empty cells are null; numeric cells become numbers.
fn typed_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = cell.parse::<i64>() {
        return Value::from(int);
    }
    match cell.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::from(float),
        _ => Value::String(cell.to_string()),
    }
}
