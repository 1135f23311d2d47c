//! Per-field content validation rules.
//!
//! The rule set is a closed enum: extend it by adding variants, not string
//! branches. Identifiers that match no variant become [`RuleKind::Unknown`],
//! which the validator logs and otherwise ignores.

use crate::error::RuleParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Reject rows where the field is null, empty, or all-whitespace.
    NotNull,
    /// Recognized syntactically but not implemented; applied as a no-op.
    Unknown(String),
}

impl RuleKind {
    pub fn parse(identifier: &str) -> Self {
        match identifier {
            "notnull" => Self::NotNull,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// One rule bound to a target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub column: String,
    pub kind: RuleKind,
}

/// Parse a `field,rule;field,rule` spec into ordered rules.
///
/// A segment that is not exactly a `field,rule` pair (or has an empty half)
/// is a fatal input error.
pub fn parse_rules(spec: &str) -> Result<Vec<FieldRule>, RuleParseError> {
    let mut rules = Vec::new();
    if spec.trim().is_empty() {
        return Ok(rules);
    }
    for segment in spec.split(';') {
        let mut parts = segment.splitn(2, ',');
        let column = parts.next().unwrap_or_default().trim();
        let identifier = match parts.next() {
            Some(identifier) => identifier.trim(),
            None => return Err(RuleParseError::MalformedEntry(segment.to_string())),
        };
        if column.is_empty() || identifier.is_empty() || identifier.contains(',') {
            return Err(RuleParseError::MalformedEntry(segment.to_string()));
        }
        rules.push(FieldRule {
            column: column.to_string(),
            kind: RuleKind::parse(identifier),
        });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ordered_rules() {
        let rules = parse_rules("email,notnull; name , notnull").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].column, "email");
        assert_eq!(rules[0].kind, RuleKind::NotNull);
        assert_eq!(rules[1].column, "name");
    }

    #[test]
    fn empty_spec_yields_no_rules() {
        assert!(parse_rules("").unwrap().is_empty());
        assert!(parse_rules("   ").unwrap().is_empty());
    }

    #[test]
    fn unknown_identifier_is_kept_as_unknown() {
        let rules = parse_rules("code,unique").unwrap();
        assert_eq!(rules[0].kind, RuleKind::Unknown("unique".into()));
    }

    #[test]
    fn segment_without_pair_is_fatal() {
        assert!(matches!(
            parse_rules("email"),
            Err(RuleParseError::MalformedEntry(_))
        ));
        assert!(matches!(
            parse_rules("email,notnull;name"),
            Err(RuleParseError::MalformedEntry(_))
        ));
        assert!(matches!(
            parse_rules("email,notnull,extra"),
            Err(RuleParseError::MalformedEntry(_))
        ));
        assert!(matches!(
            parse_rules(",notnull"),
            Err(RuleParseError::MalformedEntry(_))
        ));
    }
}
