mod support;

use std::fs;
use std::path::PathBuf;

use support::with_scoped_env;
use swiss_rents::config::AppConfig;
use swiss_rents::models::BucketingPolicy;

const ALL_VARS: [&str; 6] = [
    "SWISS_RENTS_CONFIG",
    "SWISS_RENTS_LISTINGS",
    "SWISS_RENTS_BOUNDARIES",
    "SWISS_RENTS_BUCKETING",
    "HOST",
    "PORT",
];

fn cleared<'a>(overrides: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut changes: Vec<(&str, Option<&str>)> = ALL_VARS
        .iter()
        .filter(|var| !overrides.iter().any(|(k, _)| k == *var))
        .map(|var| (*var, None))
        .collect();
    changes.extend_from_slice(overrides);
    changes
}

#[test]
fn test_env_overrides_defaults() {
    let changes = cleared(&[
        ("SWISS_RENTS_LISTINGS", Some("/srv/rents.csv")),
        ("SWISS_RENTS_BUCKETING", Some("absolute")),
        ("HOST", Some("127.0.0.1")),
        ("PORT", Some("3000")),
    ]);
    with_scoped_env(&changes, || {
        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();

        assert_eq!(config.data.listings_path, PathBuf::from("/srv/rents.csv"));
        assert_eq!(config.data.bucketing, BucketingPolicy::AbsoluteRentBuckets);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(
            config.data.boundaries_path,
            PathBuf::from("data/raw/georef-switzerland-kanton.geojson")
        );
    });
}

#[test]
fn test_invalid_port_is_configuration_error() {
    let changes = cleared(&[("PORT", Some("eighty"))]);
    with_scoped_env(&changes, || {
        let mut config = AppConfig::default();
        let err = config.apply_env_overrides().unwrap_err();
        assert!(err.to_string().contains("PORT"));
    });
}

#[test]
fn test_invalid_bucketing_is_configuration_error() {
    let changes = cleared(&[("SWISS_RENTS_BUCKETING", Some("quantile"))]);
    with_scoped_env(&changes, || {
        let mut config = AppConfig::default();
        assert!(config.apply_env_overrides().is_err());
    });
}

#[test]
fn test_load_from_explicit_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swiss-rents.toml");
    fs::write(
        &path,
        r#"
[data]
listings_path = "/data/from-file.csv"
bucketing = "absolute"

[server]
port = 9090
"#,
    )
    .unwrap();
    let path_str = path.to_str().unwrap();

    let changes = cleared(&[
        ("SWISS_RENTS_CONFIG", Some(path_str)),
        ("PORT", Some("9191")),
    ]);
    with_scoped_env(&changes, || {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.data.listings_path, PathBuf::from("/data/from-file.csv"));
        assert_eq!(config.data.bucketing, BucketingPolicy::AbsoluteRentBuckets);
        assert_eq!(config.server.port, 9191);
    });
}

#[test]
fn test_load_with_missing_explicit_file_fails() {
    let changes = cleared(&[("SWISS_RENTS_CONFIG", Some("/nonexistent/swiss-rents.toml"))]);
    with_scoped_env(&changes, || {
        assert!(AppConfig::load().is_err());
    });
}
