//! Column-named rectangular datasets.

use bl_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered sequence of simulated records. Every row carries exactly the
/// declared columns; the column set is fixed by the scenario kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    /// Build a dataset, checking rectangularity and finiteness.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::Validation("dataset must declare at least one column".to_string()));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Validation(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::Validation(format!("row {} contains non-finite values", i)));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Declared column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Borrow the raw rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Position of a named column, or a validation error naming it.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::Validation(format!("no column named '{}'", name)))
    }

    /// Copy out one named column.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let j = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[j]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_access() {
        let d = Dataset::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(d.n_rows(), 2);
        assert_eq!(d.column("b").unwrap(), vec![2.0, 4.0]);
        assert!(d.column("c").is_err());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Dataset::new(names(&["a", "b"]), vec![vec![1.0], vec![3.0, 4.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = Dataset::new(names(&["a"]), vec![vec![f64::NAN]]);
        assert!(err.is_err());
    }
}
