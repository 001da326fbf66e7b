//! Configuration loading from files and environment overrides.

use spendwise_cli::config::AppConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn env(vars: &[(&str, &str)]) -> config::Environment {
    spendwise_cli::config::env_source().source(Some(
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    ))
}

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn file_values_with_defaults_for_the_rest() {
    let file = toml_file(
        r#"
[api]
base_url = "http://localhost:3000/api/v1"

[expenses]
page_size = 5
"#,
    );

    let config = AppConfig::load_with(Some(file.path()), env(&[])).unwrap();

    assert_eq!(config.api.base_url, "http://localhost:3000/api/v1");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.expenses.page_size, 5);
    assert_eq!(config.budget.warning_ratio, 0.8);
    assert_eq!(config.budget.currency, "RWF");
    assert!(config.auth.email.is_none());
}

#[test]
fn environment_overrides_file() {
    let file = toml_file(
        r#"
[expenses]
page_size = 5

[budget]
currency = "RWF"
"#,
    );

    let config = AppConfig::load_with(
        Some(file.path()),
        env(&[
            ("SPENDWISE_EXPENSES__PAGE_SIZE", "3"),
            ("SPENDWISE_BUDGET__CURRENCY", "USD"),
            ("SPENDWISE_AUTH__EMAIL", "ada@example.com"),
        ]),
    )
    .unwrap();

    assert_eq!(config.expenses.page_size, 3);
    assert_eq!(config.budget.currency, "USD");
    assert_eq!(config.auth.email.as_deref(), Some("ada@example.com"));
}

#[test]
fn budget_policy_follows_config() {
    let file = toml_file(
        r#"
[budget]
warning_ratio = 0.5
currency = "EUR"
"#,
    );

    let config = AppConfig::load_with(Some(file.path()), env(&[])).unwrap();
    let policy = config.budget_policy();

    assert_eq!(policy.format_amount(12.0), "12.00EUR");
    assert!(policy.check(50.0, 100.0).is_some());
    assert!(policy.check(49.0, 100.0).is_none());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = AppConfig::load_with(
        Some(std::path::Path::new("/definitely/not/here/spendwise.toml")),
        env(&[]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn invalid_values_are_rejected() {
    let file = toml_file(
        r#"
[expenses]
page_size = 0
"#,
    );

    let err = AppConfig::load_with(Some(file.path()), env(&[])).unwrap_err();
    assert!(err.to_string().contains("page_size"));
}
