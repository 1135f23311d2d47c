pub mod connect;
pub mod error;
pub mod inspector;
pub mod loader;
pub mod sql;

pub use connect::{ConnectParams, connect};
pub use error::DbError;
pub use inspector::SchemaInspector;
pub use loader::TableLoader;
