//! In-memory review table loaded from a delimited file.
//!
//! The whole file is read up front; mapping happens later and only when the
//! store has to be populated.

use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Cell values treated as missing, mirroring the NA markers pandas
/// recognises when it reads a CSV.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone)]
pub struct ReviewTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl ReviewTable {
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading review table");
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;
        let table = Self::from_csv(reader, path)?;
        info!(rows = table.len(), columns = table.headers.len(), "review table loaded");
        Ok(table)
    }

    /// Read a table from any reader, e.g. an in-memory CSV string.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(rdr);
        Self::from_csv(reader, Path::new("<reader>"))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Self> {
        let csv_err = |source| Error::Csv { path: origin.to_path_buf(), source };
        let headers = reader.headers().map_err(csv_err)?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record.map_err(csv_err)?);
        }
        debug!(rows = rows.len(), "parsed csv records");
        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Position of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Cell at (`row`, `column`), or `None` when the row is short or the cell
    /// holds one of [`NA_VALUES`].
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        let cell = self.rows.get(row)?.get(column)?;
        if NA_VALUES.contains(&cell) { None } else { Some(cell) }
    }
}
