use emucon_core::s3::CreateBucketInput;
use emucon_core::{Service, ValidationError};
use emucon_query::NotificationLevel;
use emucon_tui::config::{CacheConfig, ConfigError, ThemeConfig, TuiConfig};
use emucon_tui::forms::{FormInput, FormKind};
use emucon_tui::keys::{map_key, Action};
use emucon_tui::nav::View;
use emucon_tui::persistence::{self, PersistedState};
use emucon_tui::theme::{notification_color, resource_status_color, SynthBruteTheme};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;
use std::time::Duration;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:3001".to_string(),
        request_timeout_ms: None,
        refresh_interval_ms: 2_000,
        log_tail_interval_ms: 5_000,
        cache: CacheConfig { gc_time_ms: 300_000 },
        persistence_path: "tmp/emucon.json".into(),
        error_log_path: "tmp/emucon.log".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

#[test]
fn config_accepts_base_config() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_requires_http_base_url() {
    let mut config = base_config();
    config.api_base_url = "localhost:3001".to_string();
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            field: "api_base_url",
            ..
        }
    ));
}

#[test]
fn config_rejects_zero_timeout_but_allows_none() {
    let mut config = base_config();
    config.request_timeout_ms = Some(0);
    assert!(config.validate().is_err());

    config.request_timeout_ms = None;
    assert!(config.validate().is_ok());
    assert_eq!(config.request_timeout(), None);

    config.request_timeout_ms = Some(1_500);
    assert_eq!(config.request_timeout(), Some(Duration::from_millis(1_500)));
}

#[test]
fn config_requires_positive_intervals() {
    let mut config = base_config();
    config.refresh_interval_ms = 0;
    assert!(config.validate().is_err());

    let mut config = base_config();
    config.log_tail_interval_ms = 0;
    assert!(config.validate().is_err());

    let mut config = base_config();
    config.cache.gc_time_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn config_requires_theme_name() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "unknown".to_string(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_parses_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emucon.toml");
    std::fs::write(
        &path,
        r#"
api_base_url = "http://localhost:3001"
request_timeout_ms = 10000
refresh_interval_ms = 1000
log_tail_interval_ms = 5000
persistence_path = "state.json"
error_log_path = "emucon.log"

[cache]
gc_time_ms = 300000

[theme]
name = "synthbrute"
"#,
    )
    .unwrap();

    let config = TuiConfig::from_path(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    assert_eq!(config.gc_time(), Duration::from_secs(300));
    assert_eq!(config.log_tail_interval(), Duration::from_secs(5));
}

#[test]
fn config_rejects_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emucon.toml");
    std::fs::write(
        &path,
        r#"
api_base_url = "http://localhost:3001"
refresh_interval_ms = 1000
log_tail_interval_ms = 5000
persistence_path = "state.json"
error_log_path = "emucon.log"
retries = 3

[cache]
gc_time_ms = 300000

[theme]
name = "synthbrute"
"#,
    )
    .unwrap();

    let err = TuiConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn keybinding_dash_reaches_eleventh_view() {
    assert_eq!(
        map_key(key(KeyCode::Char('-'))),
        Some(Action::SwitchView(10))
    );
    assert_eq!(
        View::from_index(10).map(|v| v.service()),
        Some(Service::SecretsManager)
    );
}

#[test]
fn keybinding_ctrl_r_refreshes() {
    let event = KeyEvent {
        code: KeyCode::Char('r'),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    };
    assert_eq!(map_key(event), Some(Action::Refresh));
}

#[test]
fn missing_persisted_state_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = persistence::load(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn bucket_form_builds_create_input() {
    let input = FormKind::Bucket
        .validate(&["my-bucket".to_string()])
        .unwrap();
    assert_eq!(
        input,
        FormInput::Bucket(CreateBucketInput {
            bucket_name: "my-bucket".to_string(),
        })
    );
}

#[test]
fn bucket_form_rejects_uppercase() {
    let err = FormKind::Bucket
        .validate(&["MyBucket".to_string()])
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn event_bus_form_rejects_default_bus() {
    let err = FormKind::EventBus
        .validate(&["default".to_string()])
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn services_without_create_forms() {
    assert!(FormKind::for_service(Service::Lambda).is_empty());
    assert!(FormKind::for_service(Service::CloudFormation).is_empty());
    assert_eq!(FormKind::for_service(Service::Iam).len(), 2);
}

#[test]
fn status_colors_follow_severity() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(resource_status_color("CREATE_COMPLETE", &theme), theme.success);
    assert_eq!(resource_status_color("CREATE_FAILED", &theme), theme.error);
    assert_eq!(
        resource_status_color("UPDATE_ROLLBACK_COMPLETE", &theme),
        theme.error
    );
    assert_eq!(
        resource_status_color("CREATE_IN_PROGRESS", &theme),
        theme.warning
    );
    assert_eq!(resource_status_color("Enabled", &theme), theme.success);
    assert_eq!(resource_status_color("DISABLED", &theme), theme.text_dim);
    assert_eq!(resource_status_color("whatever", &theme), theme.text);
}

#[test]
fn notification_colors_by_level() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(notification_color(NotificationLevel::Error, &theme), theme.error);
    assert_eq!(
        notification_color(NotificationLevel::Success, &theme),
        theme.success
    );
}

proptest! {
    #[test]
    fn keybinding_digit_switches_view(digit in 0u8..=9u8) {
        let ch = char::from(b'0' + digit);
        let action = map_key(key(KeyCode::Char(ch)));
        let expected = if ch == '0' { 9 } else { usize::from(digit) - 1 };
        prop_assert_eq!(action, Some(Action::SwitchView(expected)));
        prop_assert!(View::from_index(expected).is_some());
    }

    #[test]
    fn view_next_then_previous_round_trips(index in 0usize..11) {
        let view = View::from_index(index).unwrap();
        prop_assert_eq!(view.next().previous(), view);
        prop_assert_eq!(view.previous().next(), view);
        prop_assert_eq!(view.index(), index);
    }

    #[test]
    fn persisted_view_survives_restart(index in 0usize..11) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let state = PersistedState::new(View::from_index(index).unwrap());
        persistence::save(&path, &state).unwrap();
        let loaded = persistence::load(&path).unwrap();
        prop_assert_eq!(loaded, Some(state));
    }

    #[test]
    fn queue_timeout_outside_range_is_rejected(timeout in 43_201i32..1_000_000) {
        let values = vec!["jobs".to_string(), timeout.to_string()];
        prop_assert!(FormKind::Queue.validate(&values).is_err());
    }
}
