//! CSV readers for the already-cleaned project tables.
//!
//! Files ending in `.tsv` are read tab separated, anything else comma separated.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array2;
use serde::de::DeserializeOwned;

use crate::error::{Result, VizError};
use crate::records::{ChangeRecord, ProjectRecord};
use crate::table::{Table, ValueCounts};

fn open_reader<P: AsRef<Path>>(path: P) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(&path)?;
    let is_tsv = path
        .as_ref()
        .extension()
        .map(|e| e.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false);
    let delimiter = if is_tsv { b'\t' } else { b',' };
    Ok(ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(BufReader::new(file)))
}

fn read_records<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let mut rdr = open_reader(&path)?;
    let records = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    log::debug!(
        "read {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Read the cleaned change-record dataset.
pub fn read_change_records<P: AsRef<Path>>(path: P) -> Result<Vec<ChangeRecord>> {
    read_records(path)
}

/// Read the per-project prediction-interval dataset.
pub fn read_project_records<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectRecord>> {
    read_records(path)
}

/// Read numeric columns into a [`Table`].
///
/// With `columns` set only those columns are read, in the given order.
/// Otherwise every column is read. A cell that does not parse as a number
/// is an error.
pub fn read_table<P: AsRef<Path>>(path: P, columns: Option<&[&str]>) -> Result<Table> {
    let mut rdr = open_reader(&path)?;
    let headers = rdr.headers()?.clone();

    let selected: Vec<(usize, String)> = match columns {
        Some(cols) => cols
            .iter()
            .map(|c| {
                headers
                    .iter()
                    .position(|h| h == *c)
                    .map(|i| (i, c.to_string()))
                    .ok_or_else(|| VizError::UnknownColumn(c.to_string()))
            })
            .collect::<Result<Vec<_>>>()?,
        None => headers
            .iter()
            .enumerate()
            .map(|(i, h)| (i, h.to_string()))
            .collect(),
    };

    let mut values = Vec::new();
    let mut n_rows = 0;
    for result in rdr.records() {
        let record = result?;
        for (idx, name) in &selected {
            let cell = record.get(*idx).unwrap_or("").trim();
            let v = cell.parse::<f64>().map_err(|_| {
                VizError::InvalidArgument(format!(
                    "Non-numeric value '{}' in column {} (row {})",
                    cell,
                    name,
                    n_rows + 1
                ))
            })?;
            values.push(v);
        }
        n_rows += 1;
    }

    let data = Array2::from_shape_vec((n_rows, selected.len()), values)
        .map_err(|e| VizError::InvalidArgument(e.to_string()))?;
    Table::new(selected.into_iter().map(|(_, name)| name).collect(), data)
}

/// Count the distinct text values of one column.
pub fn value_counts_from_csv<P: AsRef<Path>>(path: P, column: &str) -> Result<ValueCounts> {
    let mut rdr = open_reader(&path)?;
    let idx = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| VizError::UnknownColumn(column.to_string()))?;

    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        values.push(record.get(idx).unwrap_or("").to_string());
    }
    Ok(ValueCounts::from_values(values))
}
