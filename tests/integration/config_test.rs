#![allow(clippy::expect_used)]

use pathpulse::application::config::{AppConfig, ConfigError};

fn load(toml_str: &str) -> AppConfig {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml_str).expect("write config");
    AppConfig::load_from(&path).expect("load config")
}

#[test]
fn full_config_loads_and_validates() {
    let config = load(
        r#"
targets = ["/mnt/data", "/srv/share"]

[general]
poll_interval_secs = 2
threshold_secs = 0.5

[email]
enabled = true
to = ["ops@example.com", "oncall@example.com"]
from = "pathpulse@example.com"
signature = "-- pathpulse"
server = "smtp.example.com"
port = 465
user = "monitor"
password = "secret"
is_ssl = true
cooldown_minutes = 15
"#,
    );

    config.validate().expect("valid config");
    assert_eq!(config.trimmed_targets().len(), 2);
    assert_eq!(config.poll_interval().as_secs(), 2);
    assert_eq!(config.cooldown().as_secs(), 900);
    assert!(config.email.is_ssl);
    assert_eq!(config.email.from_address, "pathpulse@example.com");
}

#[test]
fn empty_target_list_is_a_startup_error() {
    let config = load("targets = []\n");
    assert!(matches!(config.validate(), Err(ConfigError::NoTargets)));
}

#[test]
fn whitespace_only_targets_are_a_startup_error() {
    let config = load("targets = [\"  \", \"\"]\n");
    assert!(matches!(config.validate(), Err(ConfigError::NoTargets)));
}

#[test]
fn zero_poll_interval_is_a_startup_error() {
    let config = load(
        r#"
targets = ["/mnt/data"]

[general]
poll_interval_secs = 0
"#,
    );
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroPollInterval)
    ));
}

#[test]
fn enabled_email_without_server_is_a_startup_error() {
    let config = load(
        r#"
targets = ["/mnt/data"]

[email]
enabled = true
to = ["ops@example.com"]
"#,
    );
    assert!(matches!(config.validate(), Err(ConfigError::NoServer)));
}

#[test]
fn disabled_email_validates_without_smtp_settings() {
    let config = load("targets = [\"/mnt/data\"]\n");
    config.validate().expect("valid config");
}
