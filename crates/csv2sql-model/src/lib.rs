pub mod error;
pub mod hints;
pub mod mapping;
pub mod record_set;
pub mod rules;
pub mod schema;

pub use error::{HintParseError, MappingError, RecordSetError, RuleParseError};
pub use hints::{TypeHint, TypeHints};
pub use mapping::ColumnMapping;
pub use record_set::{Field, RecordSet};
pub use rules::{FieldRule, RuleKind, parse_rules};
pub use schema::TableSchema;
