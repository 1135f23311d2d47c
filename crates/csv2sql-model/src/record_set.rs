//! In-memory tabular data produced by parsing one input file.
//!
//! A [`RecordSet`] keeps an ordered list of column names and uniform-width
//! rows of typed scalars. The pipeline transforms it in place (rename,
//! project, filter) and discards it after loading.

use crate::error::RecordSetError;

/// A single typed scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl Field {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null, or text that trims down to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Integer(_) | Self::Float(_) => false,
        }
    }
}

/// Ordered rows with uniform named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<Field>>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the declared columns.
    pub fn push_row(&mut self, row: Vec<Field>) -> Result<(), RecordSetError> {
        if row.len() != self.columns.len() {
            return Err(RecordSetError::WidthMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Field>] {
        &self.rows
    }

    /// Column count.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Row count.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rename columns in place. Pairs whose source is absent are ignored;
    /// the caller decides whether that matters.
    pub fn rename_columns<'a, I>(&mut self, renames: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (source, target) in renames {
            if let Some(idx) = self.column_index(source) {
                self.columns[idx] = target.to_string();
            }
        }
    }

    /// Produce a new record set holding exactly `names`, in that order.
    /// Projection only narrows: a name the set does not carry is an error.
    pub fn project(&self, names: &[String]) -> Result<Self, RecordSetError> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .column_index(name)
                .ok_or_else(|| RecordSetError::ColumnNotFound(name.clone()))?;
            indices.push(idx);
        }
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self {
            columns: names.to_vec(),
            rows,
        })
    }

    /// Keep only rows for which the predicate holds, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Field]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        let mut rs = RecordSet::new(vec!["a".into(), "b".into(), "c".into()]);
        rs.push_row(vec![
            Field::Text("1".into()),
            Field::Text("x".into()),
            Field::Null,
        ])
        .unwrap();
        rs.push_row(vec![
            Field::Text("2".into()),
            Field::Text("y".into()),
            Field::Integer(7),
        ])
        .unwrap();
        rs
    }

    #[test]
    fn push_row_rejects_width_mismatch() {
        let mut rs = RecordSet::new(vec!["a".into(), "b".into()]);
        let err = rs.push_row(vec![Field::Null]).unwrap_err();
        assert_eq!(
            err,
            RecordSetError::WidthMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn project_reorders_and_narrows() {
        let rs = sample();
        let projected = rs.project(&["c".to_string(), "a".to_string()]).unwrap();
        assert_eq!(projected.columns(), ["c", "a"]);
        assert_eq!(projected.height(), 2);
        assert_eq!(projected.rows()[1][0], Field::Integer(7));
        assert_eq!(projected.rows()[1][1], Field::Text("2".into()));
    }

    #[test]
    fn project_unknown_column_errors() {
        let rs = sample();
        let err = rs.project(&["missing".to_string()]).unwrap_err();
        assert_eq!(err, RecordSetError::ColumnNotFound("missing".into()));
    }

    #[test]
    fn rename_ignores_absent_sources() {
        let mut rs = sample();
        rs.rename_columns([("a", "alpha"), ("nope", "never")]);
        assert_eq!(rs.columns(), ["alpha", "b", "c"]);
    }

    #[test]
    fn blank_covers_null_and_whitespace() {
        assert!(Field::Null.is_blank());
        assert!(Field::Text("   ".into()).is_blank());
        assert!(!Field::Text(" x ".into()).is_blank());
        assert!(!Field::Integer(0).is_blank());
        assert!(!Field::Float(0.0).is_blank());
    }
}
