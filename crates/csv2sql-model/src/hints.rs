//! Per-column type hints, passed through to the parser.

use std::collections::BTreeMap;

use crate::error::HintParseError;

/// How the parser should type a column's non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Text,
    Integer,
    Float,
}

impl TypeHint {
    /// Parse a hint identifier as it appears in the dtypes configuration.
    pub fn parse(identifier: &str) -> Result<Self, HintParseError> {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "str" | "string" | "text" => Ok(Self::Text),
            "int" | "integer" => Ok(Self::Integer),
            "float" | "double" | "number" => Ok(Self::Float),
            other => Err(HintParseError::UnknownType(other.to_string())),
        }
    }
}

/// Column name to hint, as resolved from the dtypes configuration.
pub type TypeHints = BTreeMap<String, TypeHint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_identifiers() {
        assert_eq!(TypeHint::parse("str").unwrap(), TypeHint::Text);
        assert_eq!(TypeHint::parse("Integer").unwrap(), TypeHint::Integer);
        assert_eq!(TypeHint::parse(" number ").unwrap(), TypeHint::Float);
    }

    #[test]
    fn unknown_identifier_errors() {
        assert_eq!(
            TypeHint::parse("datetime64").unwrap_err(),
            HintParseError::UnknownType("datetime64".into())
        );
    }
}
