//! Column reconciliation: count check, mapping, existence check, projection.
//!
//! Validation order is fixed: count check, then the existence check on the
//! mapping's targets, then rename+projection. Force mode downgrades the two
//! checks to warnings independently but never suppresses the
//! mapping/projection step.

use tracing::{debug, warn};

use csv2sql_model::{ColumnMapping, RecordSet, TableSchema};

use crate::error::ReconcileError;

/// Compare the record set's width to the table's column count.
pub fn validate_column_count(
    record_set: &RecordSet,
    schema: &TableSchema,
    force: bool,
) -> Result<(), ReconcileError> {
    if force {
        warn!(table = schema.table(), "column count check skipped (force)");
        return Ok(());
    }
    if record_set.width() != schema.len() {
        return Err(ReconcileError::ColumnCountMismatch {
            table: schema.table().to_string(),
            found: record_set.width(),
            expected: schema.len(),
        });
    }
    debug!(
        table = schema.table(),
        columns = schema.len(),
        "column count matches table"
    );
    Ok(())
}

/// Every mapped target column must exist in the table.
pub fn validate_columns_exist(
    targets: &[String],
    schema: &TableSchema,
    force: bool,
) -> Result<(), ReconcileError> {
    if force {
        warn!(table = schema.table(), "column existence check skipped (force)");
        return Ok(());
    }
    let missing: Vec<String> = targets
        .iter()
        .filter(|name| !schema.contains(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ReconcileError::MissingColumns {
            table: schema.table().to_string(),
            columns: missing,
        });
    }
    debug!(
        table = schema.table(),
        "all mapped columns exist in the table"
    );
    Ok(())
}

/// Rename columns per the mapping, then project down to exactly the
/// mapping's target names, in the mapping's declared order.
pub fn apply_mapping(
    mut record_set: RecordSet,
    mapping: &ColumnMapping,
) -> Result<RecordSet, ReconcileError> {
    record_set.rename_columns(
        mapping
            .pairs()
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str())),
    );
    Ok(record_set.project(&mapping.targets())?)
}

/// Run the full reconciliation pipeline for one record set.
///
/// The existence check only looks at the mapping's targets and the schema,
/// so it runs before the rename+projection of [`apply_mapping`].
pub fn reconcile(
    record_set: RecordSet,
    mapping: Option<&ColumnMapping>,
    schema: &TableSchema,
    force: bool,
) -> Result<RecordSet, ReconcileError> {
    validate_column_count(&record_set, schema, force)?;

    let Some(mapping) = mapping.filter(|mapping| !mapping.is_empty()) else {
        return Ok(record_set);
    };

    validate_columns_exist(&mapping.targets(), schema, force)?;
    let projected = apply_mapping(record_set, mapping)?;
    debug!(columns = ?projected.columns(), "columns renamed and projected");
    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv2sql_model::Field;

    fn schema() -> TableSchema {
        TableSchema::new(
            "clients",
            vec!["id".into(), "name".into(), "email".into()],
        )
    }

    fn file_record_set() -> RecordSet {
        // CSV columns in a different order than the mapping declares.
        let mut rs = RecordSet::new(vec!["email".into(), "nome".into()]);
        rs.push_row(vec![
            Field::Text("ana@x.com".into()),
            Field::Text("Ana".into()),
        ])
        .unwrap();
        rs
    }

    #[test]
    fn count_mismatch_rejected_without_force() {
        let rs = file_record_set();
        let err = validate_column_count(&rs, &schema(), false).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::ColumnCountMismatch {
                table: "clients".into(),
                found: 2,
                expected: 3,
            }
        );
        assert!(validate_column_count(&rs, &schema(), true).is_ok());
    }

    #[test]
    fn mapping_output_is_target_set_in_declared_order() {
        let mapping =
            ColumnMapping::new([("nome", "name"), ("email", "email")]).unwrap();
        let mapped = apply_mapping(file_record_set(), &mapping).unwrap();
        assert_eq!(mapped.columns(), ["name", "email"]);
        assert_eq!(mapped.rows()[0][0], Field::Text("Ana".into()));
        assert_eq!(mapped.rows()[0][1], Field::Text("ana@x.com".into()));
    }

    #[test]
    fn missing_mapped_column_is_fatal_unless_forced() {
        let targets = vec!["name".to_string(), "phone".to_string()];
        let err = validate_columns_exist(&targets, &schema(), false).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::MissingColumns {
                table: "clients".into(),
                columns: vec!["phone".into()],
            }
        );
        assert!(validate_columns_exist(&targets, &schema(), true).is_ok());
    }

    #[test]
    fn reconcile_maps_and_projects_with_force() {
        // Two file columns against a three-column table: only force lets the
        // count check pass; mapping then narrows to existing columns.
        let mapping =
            ColumnMapping::new([("nome", "name"), ("email", "email")]).unwrap();
        let out = reconcile(file_record_set(), Some(&mapping), &schema(), true).unwrap();
        assert_eq!(out.columns(), ["name", "email"]);
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn reconcile_and_apply_mapping_agree_on_the_mapped_output() {
        let mapping =
            ColumnMapping::new([("nome", "name"), ("email", "email")]).unwrap();
        let via_reconcile =
            reconcile(file_record_set(), Some(&mapping), &schema(), true).unwrap();
        let direct = apply_mapping(file_record_set(), &mapping).unwrap();
        assert_eq!(via_reconcile, direct);
    }

    #[test]
    fn reconcile_without_mapping_passes_columns_through() {
        let mut rs = RecordSet::new(vec!["id".into(), "name".into(), "email".into()]);
        rs.push_row(vec![Field::Integer(1), Field::Null, Field::Null])
            .unwrap();
        let out = reconcile(rs.clone(), None, &schema(), false).unwrap();
        assert_eq!(out, rs);
    }

    #[test]
    fn force_never_suppresses_projection_failures() {
        // Mapping source absent from the file: existence check is skipped
        // under force, but projection still fails.
        let mapping = ColumnMapping::new([("missing_src", "name")]).unwrap();
        let err = reconcile(file_record_set(), Some(&mapping), &schema(), true).unwrap_err();
        assert!(matches!(err, ReconcileError::Projection(_)));
    }
}
