use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_base_config_defaults() {
    let config = base_config(None);
    assert_eq!(config.database_url, "engram.db");
    assert_eq!(config.due_limit, DEFAULT_DUE_LIMIT);
}

#[test]
fn test_base_config_with_data_dir() {
    let config = base_config(Some(PathBuf::from("/tmp/engram-data")));
    assert!(config.database_url.ends_with("engram.db"));
    assert!(config.database_url.starts_with("/tmp/engram-data"));
}

#[test]
fn test_apply_update_overrides_set_fields() {
    let config = base_config(None);
    let updated = config.apply_update(ConfigUpdate {
        database_url: Some("other.db".to_string()),
        due_limit: None,
    });
    assert_eq!(updated.database_url, "other.db");
    assert_eq!(updated.due_limit, DEFAULT_DUE_LIMIT);
}

#[test]
fn test_config_from_missing_file_is_empty_update() {
    let update = config_from_file(Some(PathBuf::from("/nonexistent/engram.toml"))).unwrap();
    assert!(update.database_url.is_none());
    assert!(update.due_limit.is_none());
}

#[test]
fn test_config_from_none_path_is_empty_update() {
    let update = config_from_file(None).unwrap();
    assert!(update.database_url.is_none());
    assert!(update.due_limit.is_none());
}

#[test]
fn test_config_from_file_parses_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "database_url = \"study.db\"\ndue_limit = 50").unwrap();

    let update = config_from_file(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(update.database_url.as_deref(), Some("study.db"));
    assert_eq!(update.due_limit, Some(50));
}

#[test]
fn test_config_from_file_rejects_bad_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "due_limit = \"not a number\"").unwrap();

    let result = config_from_file(Some(file.path().to_path_buf()));
    assert!(result.is_err());
}
