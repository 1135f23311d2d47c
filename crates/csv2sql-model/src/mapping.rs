//! Declarative rename+project step translating file column names to table
//! column names. Pair order is significant: the reconciled record set carries
//! exactly the target names, in the order the mapping declares them.

use crate::error::MappingError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pairs: Vec<(String, String)>,
}

impl ColumnMapping {
    /// Build a mapping from ordered `(source, target)` pairs.
    /// Source names must be unique and no name may be empty.
    pub fn new<I, S, T>(pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut collected: Vec<(String, String)> = Vec::new();
        for (source, target) in pairs {
            let source = source.into();
            let target = target.into();
            if source.trim().is_empty() || target.trim().is_empty() {
                return Err(MappingError::EmptyName {
                    source_name: source,
                    target,
                });
            }
            if collected.iter().any(|(s, _)| *s == source) {
                return Err(MappingError::DuplicateSource(source));
            }
            collected.push((source, target));
        }
        Ok(Self { pairs: collected })
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Target column names, in declared order.
    pub fn targets(&self) -> Vec<String> {
        self.pairs.iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_declared_order() {
        let mapping = ColumnMapping::new([("nome", "name"), ("mail", "email")]).unwrap();
        assert_eq!(mapping.targets(), vec!["name", "email"]);
        assert_eq!(mapping.pairs()[0], ("nome".to_string(), "name".to_string()));
    }

    #[test]
    fn rejects_duplicate_source() {
        let err = ColumnMapping::new([("a", "x"), ("a", "y")]).unwrap_err();
        assert_eq!(err, MappingError::DuplicateSource("a".into()));
    }

    #[test]
    fn rejects_empty_names() {
        let err = ColumnMapping::new([("", "x")]).unwrap_err();
        assert!(matches!(err, MappingError::EmptyName { .. }));
    }
}
