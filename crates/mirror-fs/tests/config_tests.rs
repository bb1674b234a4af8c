use mirror_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct FilterConfig {
    extensions: Vec<String>,
    skip_directories: Vec<String>,
}

fn php_filters() -> FilterConfig {
    FilterConfig {
        extensions: vec!["php".into(), "twig".into()],
        skip_directories: vec!["vendor".into()],
    }
}

#[rstest]
#[case("filters.toml", "extensions = [\"php\", \"twig\"]\nskip_directories = [\"vendor\"]\n")]
#[case("filters.json", r#"{"extensions": ["php", "twig"], "skip_directories": ["vendor"]}"#)]
#[case("filters.yaml", "extensions: [php, twig]\nskip_directories:\n  - vendor\n")]
#[case("FILTERS.YML", "extensions: [php, twig]\nskip_directories: [vendor]\n")]
fn load_detects_format_from_extension(#[case] name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(name);
    fs::write(&file_path, content).unwrap();

    let loaded: FilterConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(loaded, php_filters());
}

#[rstest]
#[case("filters.toml")]
#[case("filters.json")]
#[case("filters.yml")]
fn save_then_load_returns_the_same_value(#[case] name: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(name));
    let store = ConfigStore::new();

    store.save(&path, &php_filters()).unwrap();
    let loaded: FilterConfig = store.load(&path).unwrap();

    assert_eq!(loaded, php_filters());
}

#[test]
fn saved_toml_is_human_readable() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("mirror.toml");

    ConfigStore::new()
        .save(&NormalizedPath::new(&file_path), &php_filters())
        .unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert!(content.contains("skip_directories"), "{content}");
    assert!(content.contains("\"vendor\""), "{content}");
}

#[test]
fn save_creates_missing_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/dir/mirror.json"));

    ConfigStore::new().save(&path, &php_filters()).unwrap();
    assert!(path.is_file());
}

#[test]
fn load_of_unknown_extension_fails_before_reading() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.ini"));

    let result: mirror_fs::Result<FilterConfig> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::UnsupportedFormat { ref extension }) if extension == "ini"));
}

#[test]
fn save_of_unknown_extension_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("mirror.ini");

    let result = ConfigStore::new().save(&NormalizedPath::new(&file_path), &php_filters());

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    assert!(!file_path.exists());
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.toml"));

    let result: mirror_fs::Result<FilterConfig> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn malformed_json_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("mirror.json");
    fs::write(&file_path, "{ not json").unwrap();

    let result: mirror_fs::Result<FilterConfig> =
        ConfigStore::new().load(&NormalizedPath::new(&file_path));

    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "JSON"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}
