pub mod error;
pub mod reconcile;
pub mod rules;

pub use error::ReconcileError;
pub use reconcile::{apply_mapping, reconcile, validate_column_count, validate_columns_exist};
pub use rules::apply_rules;
