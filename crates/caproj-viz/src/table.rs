use std::collections::HashMap;

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{Result, VizError};

/// Named numeric columns over a row-major 2D array.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl Table {
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(VizError::shape(
                format!("{} column names", data.ncols()),
                format!("{} column names", columns.len()),
            ));
        }
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(VizError::InvalidArgument(format!(
                    "duplicate column name: {}",
                    name
                )));
            }
        }
        Ok(Self { columns, data })
    }

    /// Build a table from `(name, values)` pairs. All columns must have the same length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let n_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let n_cols = columns.len();
        let mut names = Vec::with_capacity(n_cols);
        let mut data = Array2::<f64>::zeros((n_rows, n_cols));
        for (j, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if values.len() != n_rows {
                return Err(VizError::shape(
                    format!("{} rows", n_rows),
                    format!("{} rows in column {}", values.len(), name),
                ));
            }
            for (i, v) in values.into_iter().enumerate() {
                data[[i, j]] = v;
            }
            names.push(name);
        }
        Self::new(names, data)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| VizError::UnknownColumn(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self.column_index(name)?;
        Ok(self.data.column(idx))
    }
}

/// Anything a chart can read as a 2D numeric array.
///
/// Tables select columns by name. Plain arrays carry no names, so a selection
/// of N columns keeps their first N columns in order.
pub trait Tabular {
    fn to_array(&self) -> Array2<f64>;

    fn select_columns(&self, columns: &[&str]) -> Result<Array2<f64>>;

    fn column_names(&self) -> Option<&[String]> {
        None
    }
}

impl Tabular for Table {
    fn to_array(&self) -> Array2<f64> {
        self.data.clone()
    }

    fn select_columns(&self, columns: &[&str]) -> Result<Array2<f64>> {
        let indices = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.data.select(Axis(1), &indices))
    }

    fn column_names(&self) -> Option<&[String]> {
        Some(&self.columns)
    }
}

impl Tabular for Array2<f64> {
    fn to_array(&self) -> Array2<f64> {
        self.clone()
    }

    fn select_columns(&self, columns: &[&str]) -> Result<Array2<f64>> {
        if self.ncols() < columns.len() {
            return Err(VizError::WrongColumnCount {
                expected: columns.len(),
                found: self.ncols(),
            });
        }
        let indices: Vec<usize> = (0..columns.len()).collect();
        Ok(self.select(Axis(1), &indices))
    }
}

/// Read `data` as an (n, 2) array, rejecting any other width.
pub(crate) fn two_columns<T: Tabular + ?Sized>(data: &T) -> Result<Array2<f64>> {
    let arr = data.to_array();
    if arr.ncols() != 2 {
        return Err(VizError::WrongColumnCount {
            expected: 2,
            found: arr.ncols(),
        });
    }
    Ok(arr)
}

/// Category frequencies ordered by descending count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCounts {
    entries: Vec<(String, u64)>,
}

impl ValueCounts {
    /// Count occurrences of each value. Ties keep the order in which values were first seen.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();
        for value in values {
            let value = value.as_ref();
            match index.get(value) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(value.to_string(), entries.len());
                    entries.push((value.to_string(), 1));
                }
            }
        }
        // stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    /// Wrap precomputed `(label, count)` pairs without reordering them.
    pub fn from_pairs<S: Into<String>>(pairs: Vec<(S, u64)>) -> Self {
        Self {
            entries: pairs.into_iter().map(|(l, c)| (l.into(), c)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, c)| *c).collect()
    }

    pub fn max_count(&self) -> Option<u64> {
        self.entries.iter().map(|(_, c)| *c).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }
}
