//! Tests for loading storage configuration from the environment.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod test_helpers;

use daily_quota::config::{ConfigError, StorageBackend, StorageConfig};
use rstest::rstest;
use test_helpers::EnvVarGuard;

#[rstest]
#[case("postgres", StorageBackend::Postgres)]
#[case("D", StorageBackend::Postgres)]
#[case("docker", StorageBackend::Postgres)]
#[case("sqlite", StorageBackend::Sqlite)]
#[case("T", StorageBackend::Sqlite)]
#[case("test", StorageBackend::Sqlite)]
fn backend_accepts_names_and_legacy_codes(#[case] raw: &str, #[case] expected: StorageBackend) {
    let _env = EnvVarGuard::isolated(&[
        ("BACKEND", Some(raw)),
        ("DATABASE_URL", Some("quota.sqlite3")),
    ]);

    let config = StorageConfig::from_env().expect("configuration loads");

    assert_eq!(config.backend, expected);
}

#[test]
fn max_connections_defaults_to_ten() {
    let _env = EnvVarGuard::isolated(&[
        ("BACKEND", Some("postgres")),
        ("DATABASE_URL", Some("postgres://localhost/quota")),
    ]);

    let config = StorageConfig::from_env().expect("configuration loads");

    assert_eq!(
        config,
        StorageConfig::new(StorageBackend::Postgres, "postgres://localhost/quota")
    );
    assert_eq!(config.max_connections, 10);
}

#[test]
fn max_connections_is_parsed_from_environment() {
    let _env = EnvVarGuard::isolated(&[
        ("BACKEND", Some("sqlite")),
        ("DATABASE_URL", Some("quota.sqlite3")),
        ("MAX_CONNECTIONS", Some("3")),
    ]);

    let config = StorageConfig::from_env().expect("configuration loads");

    assert_eq!(config.max_connections, 3);
}

#[test]
fn zero_connections_are_rejected() {
    let _env = EnvVarGuard::isolated(&[
        ("BACKEND", Some("sqlite")),
        ("DATABASE_URL", Some("quota.sqlite3")),
        ("MAX_CONNECTIONS", Some("0")),
    ]);

    let result = StorageConfig::from_env();

    assert!(matches!(result, Err(ConfigError::ZeroConnections)));
}

#[rstest]
#[case(&[("DATABASE_URL", Some("quota.sqlite3"))])]
#[case(&[("BACKEND", Some("sqlite"))])]
#[case(&[("BACKEND", Some("mysql")), ("DATABASE_URL", Some("quota.sqlite3"))])]
fn missing_or_unknown_settings_fail_to_load(#[case] settings: &[(&str, Option<&str>)]) {
    let _env = EnvVarGuard::isolated(settings);

    let result = StorageConfig::from_env();

    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn blank_database_url_is_rejected() {
    let result = StorageConfig::new(StorageBackend::Postgres, "   ").validate();
    assert!(matches!(result, Err(ConfigError::BlankDatabaseUrl)));
}
