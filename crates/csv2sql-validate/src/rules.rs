//! Per-field content rules, applied in declared order over the record set.
//!
//! Rule failures are never errors: they only filter rows. A rule naming a
//! column the record set lacks is skipped with a warning, and unknown rule
//! kinds log and pass everything through.

use tracing::{info, warn};

use csv2sql_model::{FieldRule, RecordSet, RuleKind};

/// Apply all rules; each rule sees the output of the previous one.
pub fn apply_rules(mut record_set: RecordSet, rules: &[FieldRule]) -> RecordSet {
    for rule in rules {
        let Some(idx) = record_set.column_index(&rule.column) else {
            warn!(
                column = %rule.column,
                "validation column not present in record set, rule skipped"
            );
            continue;
        };
        match &rule.kind {
            RuleKind::NotNull => {
                let before = record_set.height();
                record_set.retain_rows(|row| !row[idx].is_blank());
                info!(
                    column = %rule.column,
                    rule = "notnull",
                    rows_before = before,
                    rows_after = record_set.height(),
                    "field validation applied"
                );
            }
            RuleKind::Unknown(identifier) => {
                warn!(
                    column = %rule.column,
                    rule = %identifier,
                    "validation rule not implemented, no rows filtered"
                );
            }
        }
    }
    record_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv2sql_model::{Field, parse_rules};
    use proptest::prelude::*;

    fn email_record_set(values: &[Option<&str>]) -> RecordSet {
        let mut rs = RecordSet::new(vec!["email".into()]);
        for value in values {
            let field = match value {
                Some(text) => Field::Text((*text).to_string()),
                None => Field::Null,
            };
            rs.push_row(vec![field]).unwrap();
        }
        rs
    }

    #[test]
    fn notnull_drops_null_empty_and_whitespace() {
        let rs = email_record_set(&[
            Some("a@x.com"),
            None,
            Some(""),
            Some("   "),
            Some("b@x.com"),
        ]);
        let rules = parse_rules("email,notnull").unwrap();
        let filtered = apply_rules(rs, &rules);
        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.rows()[0][0], Field::Text("a@x.com".into()));
        assert_eq!(filtered.rows()[1][0], Field::Text("b@x.com".into()));
    }

    #[test]
    fn missing_column_is_skipped_not_fatal() {
        let rs = email_record_set(&[Some("a@x.com"), None]);
        let rules = parse_rules("phone,notnull").unwrap();
        let filtered = apply_rules(rs, &rules);
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn unknown_rule_filters_nothing() {
        let rs = email_record_set(&[Some("a@x.com"), None]);
        let rules = parse_rules("email,unique").unwrap();
        let filtered = apply_rules(rs, &rules);
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn rules_apply_in_declared_order() {
        let mut rs = RecordSet::new(vec!["name".into(), "email".into()]);
        rs.push_row(vec![Field::Text("Ana".into()), Field::Null])
            .unwrap();
        rs.push_row(vec![Field::Null, Field::Text("b@x.com".into())])
            .unwrap();
        rs.push_row(vec![
            Field::Text("Carla".into()),
            Field::Text("c@x.com".into()),
        ])
        .unwrap();
        let rules = parse_rules("name,notnull;email,notnull").unwrap();
        let filtered = apply_rules(rs, &rules);
        assert_eq!(filtered.height(), 1);
        assert_eq!(filtered.rows()[0][0], Field::Text("Carla".into()));
    }

    proptest! {
        #[test]
        fn notnull_is_idempotent(values in proptest::collection::vec(
            proptest::option::of("[ a-z]{0,6}"),
            0..40,
        )) {
            let refs: Vec<Option<&str>> =
                values.iter().map(Option::as_deref).collect();
            let rules = parse_rules("email,notnull").unwrap();
            let once = apply_rules(email_record_set(&refs), &rules);
            let count_once = once.height();
            let twice = apply_rules(once, &rules);
            prop_assert_eq!(count_once, twice.height());
        }
    }
}
