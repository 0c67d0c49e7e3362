use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use discogs_tag::config::Config;
use discogs_tag::error::Error;

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
token = "abc"
file_extensions = ["*.ogg"]
skip = ["genre", "composer"]
log_dir = "/tmp"
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.token.as_deref(), Some("abc"));
    assert_eq!(cfg.file_extensions, vec!["*.ogg".to_string()]);
    assert_eq!(cfg.skip.len(), 2);
    assert_eq!(cfg.log_dir.unwrap().to_str().unwrap(), "/tmp");
    // untouched keys keep their defaults
    assert_eq!(cfg.api_base, "https://api.discogs.com");
    assert_eq!(cfg.rename_format, "%z - (%y) %b/%d-%n %t");
}

#[test]
fn empty_config_equals_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    File::create(&cfg_path).unwrap();
    assert_eq!(Config::from_path(&cfg_path).unwrap(), Config::default());
}

#[test]
fn unknown_skip_names_are_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    f.write_all(b"skip = [\"artist\", \"lyrics\"]\n").unwrap();

    let err = Config::from_path(&cfg_path).unwrap_err();
    assert!(matches!(err, Error::InvalidSkip(ref name) if name == "lyrics"), "got {err:?}");
}

#[test]
fn malformed_toml_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    f.write_all(b"file_extensions = \"*.mp3\"\n").unwrap();
    assert!(matches!(Config::from_path(&cfg_path), Err(Error::Toml(_))));
}
