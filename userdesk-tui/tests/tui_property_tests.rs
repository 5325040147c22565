use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;
use std::io::Write;
use std::time::{Duration, Instant};
use userdesk_core::codec;
use userdesk_core::table::PAGE_SIZES;
use userdesk_core::user::ListUsersResponse;
use userdesk_core::QueryKeys;
use userdesk_test_utils::assertions::assert_valid_collection;
use userdesk_test_utils::fixtures::{omar_filter, sample_users, users_body};
use userdesk_tui::api_client::parse_response;
use userdesk_tui::config::{ConfigError, ThemeConfig, TuiConfig};
use userdesk_tui::events::TuiEvent;
use userdesk_tui::keys::{map_key, Action};
use userdesk_tui::nav::{wrap_next, wrap_previous, Focus};
use userdesk_tui::notifications::{Notification, NotificationAction, NotificationLevel};
use userdesk_tui::state::{App, Effect, LoadState};
use userdesk_tui::theme::{join_operator_color, notification_color, SynthBruteTheme};

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:4000".to_string(),
        users_path: "/users".to_string(),
        request_timeout_ms: 5_000,
        tick_rate_ms: 50,
        filter_debounce_ms: 300,
        page_size: 10,
        log_path: "tmp/userdesk.log".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
        query_keys: QueryKeys::default(),
    }
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn press(code: KeyCode) -> TuiEvent {
    TuiEvent::Input(key(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        app.handle_event(press(KeyCode::Char(c)), now);
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_base_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_requires_http_base_url() {
    let mut config = base_config();
    config.api_base_url = "localhost:4000".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "api_base_url", .. })
    ));
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
fn config_debounce_must_cover_a_tick() {
    let mut config = base_config();
    config.filter_debounce_ms = 10;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "filter_debounce_ms", .. })
    ));
}

#[test]
fn config_query_keys_must_differ() {
    let mut config = base_config();
    config.query_keys = QueryKeys {
        filters: "f".to_string(),
        join_operator: "f".to_string(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_loads_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_base_url = "https://api.example.com"
users_path = "/v1/users"
request_timeout_ms = 2000
tick_rate_ms = 50
filter_debounce_ms = 300
page_size = 20
log_path = "logs/userdesk.log"

[theme]
name = "synthbrute"
"#
    )
    .unwrap();

    let config = TuiConfig::from_path(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.users_url(), "https://api.example.com/v1/users");
    assert_eq!(config.query_keys, QueryKeys::default());
}

#[test]
fn config_rejects_unknown_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_base_url = "https://api.example.com"
users_path = "/users"
request_timeout_ms = 2000
tick_rate_ms = 50
filter_debounce_ms = 300
page_size = 10
log_path = "userdesk.log"
refresh_interval_ms = 1000

[theme]
name = "synthbrute"
"#
    )
    .unwrap();

    assert!(matches!(
        TuiConfig::from_path(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn logging_writes_to_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("userdesk.log");
    userdesk_tui::logging::init(&path).unwrap();
    assert!(path.exists());
}

proptest! {
    #[test]
    fn config_page_size_must_be_offered(size in 0usize..100) {
        let mut config = base_config();
        config.page_size = size;
        prop_assert_eq!(config.validate().is_ok(), PAGE_SIZES.contains(&size));
    }

    #[test]
    fn config_timeouts_must_be_positive(timeout in 0u64..10, tick in 0u64..10) {
        let mut config = base_config();
        config.request_timeout_ms = timeout;
        config.tick_rate_ms = tick;
        config.filter_debounce_ms = 300;
        prop_assert_eq!(config.validate().is_ok(), timeout > 0 && tick > 0);
    }
}

// ============================================================================
// Keybindings
// ============================================================================

#[test]
fn ctrl_shift_f_toggles_filters_outside_text_inputs() {
    let shortcut = key(KeyCode::Char('F'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    assert_eq!(map_key(shortcut, Focus::Table), Some(Action::ToggleFilterPanel));
    assert_eq!(map_key(shortcut, Focus::FilterPanel), Some(Action::ToggleFilterPanel));
    assert_eq!(map_key(shortcut, Focus::QuickFilter), Some(Action::InputChar('F')));
}

#[test]
fn super_shift_f_toggles_filters() {
    let shortcut = key(KeyCode::Char('f'), KeyModifiers::SUPER | KeyModifiers::SHIFT);
    assert_eq!(map_key(shortcut, Focus::Table), Some(Action::ToggleFilterPanel));
}

#[test]
fn backspace_removes_last_filter_outside_inputs() {
    let backspace = key(KeyCode::Backspace, KeyModifiers::NONE);
    assert_eq!(map_key(backspace, Focus::Table), Some(Action::RemoveLastFilter));
    assert_eq!(map_key(backspace, Focus::FilterPanel), Some(Action::RemoveLastFilter));
    assert_eq!(map_key(backspace, Focus::ValueInput), Some(Action::InputBackspace));

    let delete = key(KeyCode::Delete, KeyModifiers::NONE);
    assert_eq!(map_key(backspace, Focus::OptionPicker), Some(Action::RemoveLastFilter));
    assert_eq!(map_key(delete, Focus::OptionPicker), Some(Action::RemoveLastFilter));
}

#[test]
fn y_copies_email_only_from_table() {
    let y = key(KeyCode::Char('y'), KeyModifiers::NONE);
    assert_eq!(map_key(y, Focus::Table), Some(Action::CopyEmail));
    assert_eq!(map_key(y, Focus::QuickFilter), Some(Action::InputChar('y')));
}

#[test]
fn ctrl_c_quits_everywhere() {
    let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    for focus in [
        Focus::Table,
        Focus::QuickFilter,
        Focus::FilterPanel,
        Focus::ValueInput,
        Focus::OptionPicker,
        Focus::ColumnMenu,
        Focus::Help,
    ] {
        assert_eq!(map_key(ctrl_c, focus), Some(Action::Quit));
    }
}

proptest! {
    #[test]
    fn keybinding_digit_sets_page_size(digit in 1u8..=9u8) {
        let ch = char::from(b'0' + digit);
        let action = map_key(key(KeyCode::Char(ch), KeyModifiers::NONE), Focus::Table);
        match digit {
            1..=5 => prop_assert_eq!(action, Some(Action::SetPageSize(PAGE_SIZES[digit as usize - 1]))),
            _ => prop_assert!(action.is_none()),
        }
    }

    #[test]
    fn text_inputs_capture_plain_characters(c in "[a-zA-Z0-9 ]") {
        let c = c.chars().next().unwrap();
        for focus in [Focus::QuickFilter, Focus::ValueInput, Focus::ColumnMenu] {
            let action = map_key(key(KeyCode::Char(c), KeyModifiers::NONE), focus);
            prop_assert_eq!(action, Some(Action::InputChar(c)));
        }
    }

    #[test]
    fn wrap_navigation_stays_in_bounds(current in 0usize..50, len in 0usize..20) {
        let next = wrap_next(current, len);
        let previous = wrap_previous(current, len);
        if len == 0 {
            prop_assert_eq!(next, 0);
            prop_assert_eq!(previous, 0);
        } else {
            prop_assert!(next < len);
            prop_assert!(previous < len);
        }
    }
}

// ============================================================================
// Theme and notifications
// ============================================================================

#[test]
fn notification_colors_follow_level() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(notification_color(NotificationLevel::Error, &theme), theme.error);
    assert_eq!(notification_color(NotificationLevel::Warning, &theme), theme.warning);
    assert_eq!(notification_color(NotificationLevel::Info, &theme), theme.primary);
    assert_eq!(notification_color(NotificationLevel::Success, &theme), theme.success);
}

#[test]
fn join_operators_have_distinct_colors() {
    let theme = SynthBruteTheme::synthbrute();
    assert_ne!(
        join_operator_color(userdesk_core::JoinOperator::And, &theme),
        join_operator_color(userdesk_core::JoinOperator::Or, &theme)
    );
}

#[test]
fn retry_notification_shows_hint() {
    let note = Notification::new(NotificationLevel::Error, "Error loading users")
        .with_action(NotificationAction::Retry);
    assert_eq!(note.action_hint(), Some("r: retry"));
}

// ============================================================================
// App flows
// ============================================================================

#[test]
fn users_body_loads_into_table() {
    let response: ListUsersResponse =
        parse_response(reqwest::StatusCode::OK, &users_body(23)).unwrap();
    let mut app = App::new(base_config(), "");
    let now = Instant::now();
    app.handle_event(TuiEvent::UsersLoaded(response.into_rows()), now);

    assert_eq!(app.load_state, LoadState::Loaded);
    let model = app.row_model();
    assert_eq!(model.filtered_count, 23);
    assert_eq!(model.page_count, 3);
    assert_eq!(model.page_rows[0].name, "First0 Last0");
}

#[test]
fn api_error_then_retry() {
    let mut app = App::new(base_config(), "");
    let now = Instant::now();
    app.handle_event(TuiEvent::ApiError("HTTP 500: down".to_string()), now);
    assert!(matches!(app.load_state, LoadState::Failed(_)));

    let effect = app.handle_event(press(KeyCode::Char('r')), now);
    assert_eq!(effect, Effect::Refresh);
    assert_eq!(app.load_state, LoadState::Loading);
}

#[test]
fn quit_from_table() {
    let mut app = App::new(base_config(), "");
    assert_eq!(app.handle_event(press(KeyCode::Char('q')), Instant::now()), Effect::Quit);
}

#[test]
fn quick_filter_matches_names() {
    let mut app = App::new(base_config(), "");
    let now = Instant::now();
    app.handle_event(TuiEvent::UsersLoaded(sample_users()), now);
    app.handle_event(press(KeyCode::Char('/')), now);
    type_text(&mut app, "omar", now);
    app.handle_event(press(KeyCode::Enter), now);

    let names: Vec<&str> = app.row_model().page_rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Omar Haddad", "Bea Omarova"]);
    assert_eq!(app.focus, Focus::Table);
}

#[test]
fn initial_query_restores_filters() {
    let keys = QueryKeys::default();
    let query = codec::commit(&omar_filter(), &keys, "page=2");
    let app = App::new(base_config(), &query);
    assert_eq!(app.filters(), omar_filter());
    assert!(app.location_query().starts_with("page=2&filters="));
}

#[test]
fn filter_panel_session_through_keys() {
    let mut app = App::new(base_config(), "");
    let t0 = Instant::now();
    app.handle_event(TuiEvent::UsersLoaded(sample_users()), t0);

    app.handle_event(
        TuiEvent::Input(key(KeyCode::Char('F'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
        t0,
    );
    assert_eq!(app.focus, Focus::FilterPanel);

    app.handle_event(press(KeyCode::Char('a')), t0);
    app.handle_event(press(KeyCode::Enter), t0);
    assert_eq!(app.focus, Focus::ValueInput);
    type_text(&mut app, "Omar", t0);
    app.handle_event(press(KeyCode::Enter), t0);
    assert_eq!(app.focus, Focus::FilterPanel);

    // Nothing is written until the debounce delay has passed.
    app.handle_event(TuiEvent::Tick, t0 + Duration::from_millis(100));
    assert_eq!(app.location_query(), "");
    app.handle_event(TuiEvent::Tick, t0 + Duration::from_millis(300));
    let committed = app.store.committed();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed.entries[0].column_id, "name");
    assert_eq!(committed.entries[0].value.to_string(), "Omar");

    app.handle_event(press(KeyCode::Char('t')), t0);
    assert!(app.location_query().ends_with("&=or"));

    app.handle_event(press(KeyCode::Esc), t0);
    assert_eq!(app.focus, Focus::Table);
    assert!(!app.filter_panel.open);

    // The join choice outlives the last filter.
    app.handle_event(press(KeyCode::Backspace), t0);
    assert!(app.filters().is_empty());
    assert_eq!(app.location_query(), "=or");
}

#[test]
fn help_overlay_closes_on_any_key() {
    let mut app = App::new(base_config(), "");
    let now = Instant::now();
    app.handle_event(press(KeyCode::Char('?')), now);
    assert_eq!(app.focus, Focus::Help);
    app.handle_event(press(KeyCode::Char('x')), now);
    assert_eq!(app.focus, Focus::Table);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    /// Property: whatever keys are pressed, the state on screen survives a
    /// write to the query string and a reload
    #[test]
    fn random_keys_keep_query_consistent(
        keys in prop::collection::vec(
            prop::sample::select(vec!['f', 'a', 'c', 'o', 't', 'd', 'K', 'J', 'j', 'k', 'x', '1']),
            0..40,
        )
    ) {
        let mut app = App::new(base_config(), "");
        let t0 = Instant::now();
        app.handle_event(TuiEvent::UsersLoaded(sample_users()), t0);
        for (i, c) in keys.into_iter().enumerate() {
            let now = t0 + Duration::from_millis(i as u64 * 40);
            if app.handle_event(press(KeyCode::Char(c)), now) == Effect::Quit {
                break;
            }
            app.handle_event(TuiEvent::Tick, now);
        }
        let shown = app.filters();
        app.flush();
        let reloaded = codec::load(
            &app.location_query(),
            &QueryKeys::default(),
            &app.catalog.filterable_ids(),
        );
        assert_valid_collection(&reloaded);
        prop_assert_eq!(reloaded, shown);
    }
}
