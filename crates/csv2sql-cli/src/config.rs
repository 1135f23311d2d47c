//! Run configuration resolved at the CLI edge: connection parameters from
//! the environment, mapping and type hints from JSON files. The core only
//! ever sees the resolved values.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use csv2sql_db::ConnectParams;
use csv2sql_model::{ColumnMapping, TypeHint, TypeHints};

/// Load environment entries from a dotenv file before credentials are read.
/// Variables already set in the process environment win over file entries.
///
/// An explicit `--conf` path must exist; the default `./.env` is optional
/// and silently skipped when absent.
pub fn load_env_file(conf: Option<&Path>) -> Result<()> {
    match conf {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
            info!(path = %path.display(), "env file loaded");
        }
        None => match dotenvy::from_path(Path::new(".env")) {
            Ok(()) => info!(path = ".env", "env file loaded"),
            Err(error) if error.not_found() => {}
            Err(error) => return Err(error).context("failed to load .env"),
        },
    }
    Ok(())
}

/// Resolve connection parameters from `DB_HOST`, `DB_PORT`, `DB_USER`,
/// `DB_PASSWORD`, and `DB_NAME` (overridable by `--database`).
pub fn resolve_connect_params(database_arg: Option<&str>) -> Result<ConnectParams> {
    let host = require_env("DB_HOST")?;
    let port = require_env("DB_PORT")?
        .parse::<u16>()
        .context("DB_PORT is not a valid port number")?;
    let user = require_env("DB_USER")?;
    let password = require_env("DB_PASSWORD")?;
    let database = match database_arg {
        Some(name) => name.to_string(),
        None => require_env("DB_NAME")?,
    };
    info!(host = %host, port, database = %database, "using database");
    Ok(ConnectParams {
        host,
        port,
        user,
        password,
        database,
    })
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("environment variable {name} is not set"))
}

/// Load the column mapping from a JSON object, preserving its declared
/// key order.
pub fn load_mapping(path: &Path) -> Result<ColumnMapping> {
    let object = load_json_object(path, "column mapping")?;
    let mut pairs = Vec::with_capacity(object.len());
    for (source, target) in &object {
        let Some(target) = target.as_str() else {
            bail!(
                "column mapping {}: value for '{source}' must be a string",
                path.display()
            );
        };
        pairs.push((source.clone(), target.to_string()));
    }
    let mapping = ColumnMapping::new(pairs)
        .with_context(|| format!("column mapping {}", path.display()))?;
    info!(path = %path.display(), entries = mapping.len(), "column mapping loaded");
    Ok(mapping)
}

/// Load per-column type hints from a JSON object of type identifiers.
pub fn load_type_hints(path: &Path) -> Result<TypeHints> {
    let object = load_json_object(path, "type hints")?;
    let mut hints = TypeHints::new();
    for (column, identifier) in &object {
        let Some(identifier) = identifier.as_str() else {
            bail!(
                "type hints {}: value for '{column}' must be a string",
                path.display()
            );
        };
        let hint = TypeHint::parse(identifier)
            .with_context(|| format!("type hints {}", path.display()))?;
        hints.insert(column.clone(), hint);
    }
    info!(path = %path.display(), entries = hints.len(), "type hints loaded");
    Ok(hints)
}

fn load_json_object(path: &Path, what: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what} {}", path.display()))?;
    match value {
        serde_json::Value::Object(object) => Ok(object),
        _ => bail!("{what} {} must be a JSON object", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn env_file_populates_missing_variables_only() {
        let file = write_file("CSV2SQL_TEST_FRESH=from-file\nCSV2SQL_TEST_TAKEN=from-file\n");
        // SAFETY: test-only env mutation, variable names are unique to this test.
        unsafe { std::env::set_var("CSV2SQL_TEST_TAKEN", "from-process") };
        load_env_file(Some(file.path())).unwrap();
        assert_eq!(std::env::var("CSV2SQL_TEST_FRESH").unwrap(), "from-file");
        assert_eq!(std::env::var("CSV2SQL_TEST_TAKEN").unwrap(), "from-process");
    }

    #[test]
    fn explicit_env_file_must_exist() {
        let err = load_env_file(Some(Path::new("/no/such/dir/.env"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/dir/.env"));
    }

    #[test]
    fn mapping_preserves_json_declaration_order() {
        let file = write_file(r#"{"nome":"name","mail":"email","idade":"age"}"#);
        let mapping = load_mapping(file.path()).unwrap();
        assert_eq!(mapping.targets(), vec!["name", "email", "age"]);
    }

    #[test]
    fn mapping_rejects_non_string_values() {
        let file = write_file(r#"{"nome": 3}"#);
        assert!(load_mapping(file.path()).is_err());
    }

    #[test]
    fn mapping_rejects_non_object_documents() {
        let file = write_file(r#"["nome","name"]"#);
        assert!(load_mapping(file.path()).is_err());
    }

    #[test]
    fn type_hints_parse_identifiers() {
        let file = write_file(r#"{"id":"int","price":"float","name":"str"}"#);
        let hints = load_type_hints(file.path()).unwrap();
        assert_eq!(hints.get("id"), Some(&TypeHint::Integer));
        assert_eq!(hints.get("price"), Some(&TypeHint::Float));
        assert_eq!(hints.get("name"), Some(&TypeHint::Text));
    }

    #[test]
    fn unknown_type_hint_is_fatal() {
        let file = write_file(r#"{"id":"datetime64"}"#);
        assert!(load_type_hints(file.path()).is_err());
    }
}
