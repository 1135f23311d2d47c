pub mod decode;
pub mod error;
pub mod reader;

pub use decode::{decode_with_fallback, resolve_encoding};
pub use error::IngestError;
pub use reader::{ParseOptions, read_record_set};
