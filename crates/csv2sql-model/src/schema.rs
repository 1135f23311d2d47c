//! Column layout of the target table, fetched once per run from the
//! database catalog and read-only thereafter.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: String,
    columns: Vec<String>,
}

impl TableSchema {
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// An empty schema means the table is missing or unusable.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_exact() {
        let schema = TableSchema::new("clients", vec!["id".into(), "name".into()]);
        assert!(schema.contains("name"));
        assert!(!schema.contains("NAME"));
        assert!(!schema.is_empty());
        assert_eq!(schema.len(), 2);
    }
}
