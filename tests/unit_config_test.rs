// tests/unit_config_test.rs

use finitydb::config::Config;
use finitydb::core::storage::xset::Pruning;
use std::io::Write;

#[test]
fn test_config_defaults_when_file_is_missing() {
    let config = Config::from_file("/definitely/not/a/real/path.toml").unwrap();
    assert_eq!(config.port, 7801);
    assert_eq!(config.xset_finity, 128);
    assert_eq!(config.xset_pruning, Pruning::MinScore);
    assert_eq!(config.xset_max_packed_entries, 128);
    assert_eq!(config.xset_max_packed_value, 64);
}

#[test]
fn test_config_overrides_from_toml() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(
        file,
        r#"
port = 9100
xset_finity = 1000
xset_pruning = "maxscore"
xset_max_packed_entries = 32
"#
    )
    .unwrap();

    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.port, 9100);
    assert_eq!(config.xset_finity, 1000);
    assert_eq!(config.xset_pruning, Pruning::MaxScore);
    assert_eq!(config.xset_max_packed_entries, 32);
    // Untouched fields keep their defaults.
    assert_eq!(config.xset_max_packed_value, 64);
    assert_eq!(config.host, "127.0.0.1");
}

#[test]
fn test_config_rejects_malformed_pruning() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(file, r#"xset_pruning = "upward""#).unwrap();
    assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
}
