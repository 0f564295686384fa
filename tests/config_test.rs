// tests/config_test.rs
use git_tagbump::config::{load_config, Config};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.remote, "origin");
    assert_eq!(config.tag_message, "Release {version}");
    assert_eq!(config.default_bump, "patch");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"
tag_message = "Version {version}"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.tag_message, "Version {version}");
    // Unset keys fall back to their defaults
    assert_eq!(config.default_bump, "patch");
}

#[test]
fn test_load_rejects_malformed_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = [not toml").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    assert!(result.is_err());
}

#[test]
fn test_load_missing_custom_path_is_an_error() {
    let result = load_config(Some("/nonexistent/tagbump.toml"));
    assert!(result.is_err());
}

#[test]
fn test_tag_message_substitution() {
    let config = Config {
        tag_message: "Version {version} of the project".to_string(),
        ..Config::default()
    };
    assert_eq!(
        config.format_tag_message("v1.0.7"),
        "Version v1.0.7 of the project"
    );
}
