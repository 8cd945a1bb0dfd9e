// ABOUTME: Behavioral tests for configuration loading and environment overrides
// Verifies defaults, file layering, and that the config drives storage location

use assessment_wizard::config::{AppConfig, ENV_DATA_DIR, ENV_DRAFT_KEY};
use assessment_wizard::storage::FileStore;
use assessment_wizard::wizard::{AssessmentForm, DraftUpdate};
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Default config must be usable without any file present
#[test]
fn test_default_config_has_sensible_values() {
    let config = AppConfig::default();

    assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(config.storage.draft_key, "assessmentDraft");
    assert!(config.storage.data_dir.is_none());
    assert_eq!(config.logging.filter, "assessment_wizard=info");
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.ui.toast_duration_ms, 2500);
}

#[test]
fn test_missing_files_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::load_from_paths(&[temp_dir.path().join("nope.toml")]).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_serialization_roundtrip() {
    let mut config = AppConfig::default();
    config.storage.data_dir = Some(PathBuf::from("/var/lib/drafts"));
    config.ui.toast_duration_ms = 4000;

    let serialized = toml::to_string_pretty(&config).unwrap();
    let parsed: AppConfig = toml::from_str(&serialized).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn test_env_overrides_win_over_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[storage]\ndraft_key = \"from-file\"\n").unwrap();

    let mut config = AppConfig::load_from_paths(&[path]).unwrap();
    config.apply_env(&HashMap::from([
        (ENV_DRAFT_KEY.to_string(), "from-env".to_string()),
        (ENV_DATA_DIR.to_string(), temp_dir.path().display().to_string()),
    ]));

    assert_eq!(config.storage.draft_key, "from-env");
    assert_eq!(config.data_dir().unwrap(), temp_dir.path());
}

#[test]
fn test_configured_key_and_dir_drive_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.storage.data_dir = Some(temp_dir.path().to_path_buf());
    config.storage.draft_key = "team-draft".to_string();

    let store = FileStore::new(config.data_dir().unwrap());
    let mut form = AssessmentForm::load(store, config.storage.draft_key.clone());
    form.update_field(DraftUpdate::JobRole("Recruiter".into())).unwrap();

    assert!(temp_dir.path().join("team-draft.json").exists());
}

/// A local file that never mentions a key keeps the user's value for it
#[test]
fn test_local_file_keeps_unmentioned_user_keys() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("user.toml");
    let local = temp_dir.path().join("local.toml");
    std::fs::write(&user, "[ui]\nshow_help = false\ntoast_duration_ms = 900\n").unwrap();
    std::fs::write(&local, "[storage]\ndraft_key = \"local\"\n").unwrap();

    let config = AppConfig::load_from_paths(&[user, local]).unwrap();

    assert!(!config.ui.show_help);
    assert_eq!(config.ui.toast_duration_ms, 900);
    assert_eq!(config.storage.draft_key, "local");
}

/// A local file can set a key back to its default value
#[test]
fn test_local_file_can_restore_default_value() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("user.toml");
    let local = temp_dir.path().join("local.toml");
    std::fs::write(&user, "[storage]\ndraft_key = \"user-draft\"\n[ui]\ntick_rate_ms = 50\n").unwrap();
    std::fs::write(&local, "[storage]\ndraft_key = \"assessmentDraft\"\n[ui]\ntick_rate_ms = 250\n").unwrap();

    let config = AppConfig::load_from_paths(&[user, local]).unwrap();

    assert_eq!(config.storage.draft_key, "assessmentDraft");
    assert_eq!(config.ui.tick_rate_ms, 250);
}
