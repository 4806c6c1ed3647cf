//! Schema file and package descriptor loading.
//!
//! A client ships a command file next to its binary sources and points the
//! dispatch layer at its base directory. The schema format is chosen by
//! file extension (`.json`, `.yaml`, `.yml`); the version string shown by
//! `--version` comes from the `Cargo.toml` package descriptor in the same
//! base directory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::CommandSchema;
use crate::error::{Result, SchemaError};

/// Default schema file location relative to a client's base directory.
pub const DEFAULT_COMMAND_FILE: &str = "conf/commands.json";

/// Loads a command schema from a JSON or YAML file.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedExtension`] for any other extension,
/// [`SchemaError::Io`] when the file cannot be opened, and
/// [`SchemaError::Json`]/[`SchemaError::Yaml`] when parsing fails.
pub fn load_schema(path: impl AsRef<Path>) -> Result<CommandSchema> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    match extension {
        "json" => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        "yaml" | "yml" => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_yaml::from_reader(reader)?)
        }
        _ => Err(SchemaError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Reads the `[package] version` field from `Cargo.toml` under `base`.
///
/// # Errors
///
/// Returns [`SchemaError::MissingVersion`] when the descriptor has no
/// string `version` field (workspace-inherited versions are not resolved).
pub fn package_version(base: impl AsRef<Path>) -> Result<String> {
    let path = base.as_ref().join("Cargo.toml");
    let raw = std::fs::read_to_string(&path)?;
    let descriptor: toml::Value = toml::from_str(&raw)?;

    descriptor
        .get("package")
        .and_then(|package| package.get("version"))
        .and_then(|version| version.as_str())
        .map(str::to_string)
        .ok_or(SchemaError::MissingVersion(path))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SCHEMA_JSON: &str = r#"{
        "commands": {
            "greet": {
                "desc": "Say hello",
                "args": [{ "name": "name", "rules": ["required"] }]
            }
        }
    }"#;

    const SCHEMA_YAML: &str = "\
commands:
  greet:
    desc: Say hello
    args:
      - name: name
        rules: [required]
";

    #[test]
    fn test_load_schema_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.json");
        fs::write(&path, SCHEMA_JSON).unwrap();

        let schema = load_schema(&path).unwrap();
        let spec = schema.command("greet").unwrap();
        assert_eq!(spec.desc, "Say hello");
        assert_eq!(spec.args[0].rules, vec!["required"]);
    }

    #[test]
    fn test_load_schema_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.yaml");
        fs::write(&path, SCHEMA_YAML).unwrap();

        let schema = load_schema(&path).unwrap();
        assert!(schema.command("greet").is_some());
    }

    #[test]
    fn test_load_schema_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.ini");
        fs::write(&path, "[commands]").unwrap();

        let err = load_schema(&path).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_load_schema_propagates_missing_file() {
        let err = load_schema("/nonexistent/commands.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }

    #[test]
    fn test_load_schema_propagates_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_schema(&path).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_package_version() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"1.2.3\"\n",
        )
        .unwrap();

        assert_eq!(package_version(dir.path()).unwrap(), "1.2.3");
    }

    #[test]
    fn test_package_version_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();

        let err = package_version(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingVersion(_)));
    }

    #[test]
    fn test_package_version_workspace_inherited_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion.workspace = true\n",
        )
        .unwrap();

        let err = package_version(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingVersion(_)));
    }
}
