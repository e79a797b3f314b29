use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use errlens_core::{ClassifyError, WorkflowPhase};
use errlens_test_utils::{function_name_response, healthy_status};
use errlens_tui::config::{ConfigError, ThemeConfig, TuiConfig};
use errlens_tui::keys::{map_key, Action};
use errlens_tui::state::{App, AppCommand, HealthView};
use errlens_tui::theme::{headline_color, hex_color, label_color, phase_color, SynthBruteTheme};
use errlens_tui::views::render_view;
use proptest::prelude::*;
use ratatui::{backend::TestBackend, style::Color, Terminal};
use std::io::Write;
use std::time::Duration;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:8000".to_string(),
        request_timeout_ms: 5_000,
        tick_rate_ms: 100,
        log_path: "tmp/errlens-tui.log".into(),
        fetch_remote_examples: false,
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}

fn screen_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    terminal.draw(|f| render_view(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn default_config_is_valid() {
    let config = TuiConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.api_base_url, "http://localhost:8000");
    assert_eq!(config.request_timeout_ms, 30_000);
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
fn config_rejects_non_http_base_url() {
    let mut config = base_config();
    config.api_base_url = "ftp://localhost".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "api_base_url", .. })
    ));
}

#[test]
fn config_rejects_zero_timeout() {
    let mut config = base_config();
    config.request_timeout_ms = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "request_timeout_ms", .. })
    ));
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = TuiConfig::from_toml("api_base_url = \"https://classifier.internal\"\n").unwrap();
    assert_eq!(config.api_base_url, "https://classifier.internal");
    assert_eq!(config.request_timeout_ms, 30_000);
    assert_eq!(config.theme.name, "synthbrute");
}

#[test]
fn unknown_toml_field_is_rejected() {
    assert!(matches!(
        TuiConfig::from_toml("tenant_id = 4\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api_base_url = \"http://10.0.0.2:9000\"\nrequest_timeout_ms = 1500\nfetch_remote_examples = true\n\n[theme]\nname = \"synthbrute\""
    )
    .unwrap();

    let config = TuiConfig::from_path(file.path()).unwrap();
    assert!(config.validate().is_ok());
    assert!(config.fetch_remote_examples);

    let client = config.client_config();
    assert_eq!(client.base_url, "http://10.0.0.2:9000");
    assert_eq!(client.request_timeout, Duration::from_millis(1500));
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TuiConfig::from_path(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn env_override_replaces_base_url() {
    let mut config = base_config();
    config.apply_env_overrides(Some("https://override.example".to_string()));
    assert_eq!(config.api_base_url, "https://override.example");

    config.apply_env_overrides(Some("   ".to_string()));
    assert_eq!(config.api_base_url, "https://override.example");

    config.apply_env_overrides(None);
    assert_eq!(config.api_base_url, "https://override.example");
}

// ============================================================================
// KEYS
// ============================================================================

#[test]
fn classify_bindings() {
    let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(map_key(ctrl_s), Some(Action::Classify));
    assert_eq!(
        map_key(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE)),
        Some(Action::Classify)
    );
}

#[test]
fn quit_bindings() {
    for event in [
        KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
    ] {
        assert_eq!(map_key(event), Some(Action::Quit));
    }
}

#[test]
fn health_binding() {
    let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
    assert_eq!(map_key(ctrl_r), Some(Action::CheckHealth));
}

proptest! {
    #[test]
    fn plain_characters_go_to_the_editor(ch in proptest::char::range(' ', '~')) {
        let event = KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        };
        prop_assert!(map_key(event).is_none());
    }

    #[test]
    fn alt_digit_loads_example(digit in 1u8..=9u8) {
        let ch = char::from(b'0' + digit);
        let action = map_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::ALT));
        prop_assert_eq!(action, Some(Action::LoadExample(usize::from(digit - 1))));
    }

    #[test]
    fn function_keys_load_examples(n in 1u8..=4u8) {
        let action = map_key(KeyEvent::new(KeyCode::F(n), KeyModifiers::NONE));
        prop_assert_eq!(action, Some(Action::LoadExample(usize::from(n - 1))));
    }

    // ========================================================================
    // COLORS
    // ========================================================================

    #[test]
    fn hex_color_parses_any_rgb(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hex = format!("#{:02X}{:02X}{:02X}", r, g, b);
        prop_assert_eq!(hex_color(&hex), Some(Color::Rgb(r, g, b)));
    }

    #[test]
    fn unknown_labels_use_the_neutral_color(label in "[a-z]{1,12}") {
        let theme = SynthBruteTheme::synthbrute();
        prop_assert_eq!(label_color(&label, &theme), Color::Rgb(0x6B, 0x72, 0x80));
    }
}

#[test]
fn hex_color_rejects_malformed_tokens() {
    for token in ["", "#", "10B981", "#10B98", "#10B9811", "#GGGGGG", "#ÄÄÄ"] {
        assert_eq!(hex_color(token), None, "{token:?} should not parse");
    }
}

#[test]
fn known_label_colors() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(label_color("Correct", &theme), Color::Rgb(0x10, 0xB9, 0x81));
    assert_eq!(
        label_color("Incorrect_Function_Name", &theme),
        Color::Rgb(0xEF, 0x44, 0x44)
    );
}

#[test]
fn headline_prefers_service_color() {
    let theme = SynthBruteTheme::synthbrute();
    let mut response = function_name_response();
    response.category_color = "#123456".to_string();
    assert_eq!(headline_color(&response, &theme), Color::Rgb(0x12, 0x34, 0x56));

    response.category_color = "red".to_string();
    assert_eq!(headline_color(&response, &theme), Color::Rgb(0xEF, 0x44, 0x44));
}

#[test]
fn phase_colors_are_distinct() {
    let theme = SynthBruteTheme::synthbrute();
    assert_eq!(phase_color(WorkflowPhase::Loading, &theme), theme.warning);
    assert_eq!(phase_color(WorkflowPhase::Success, &theme), theme.success);
    assert_eq!(phase_color(WorkflowPhase::Failed, &theme), theme.error);
}

// ============================================================================
// APP + RENDERING
// ============================================================================

#[test]
fn idle_screen_shows_header_and_examples() {
    let app = App::new(base_config());
    let screen = screen_text(&app);
    assert!(screen.contains("ERRLENS"));
    assert!(screen.contains("Correct Example"));
    assert!(screen.contains("Wrong Function Name"));
    assert!(screen.contains("READY"));
}

#[test]
fn success_screen_shows_result() {
    let mut app = App::new(base_config());
    let ticket = match app.handle_action(Action::Classify) {
        Some(AppCommand::Classify(pending)) => pending.ticket,
        other => panic!("expected dispatch, got {other:?}"),
    };
    app.apply_classification(ticket, Ok(function_name_response()));
    assert_eq!(app.phase(), WorkflowPhase::Success);

    let screen = screen_text(&app);
    assert!(screen.contains("Incorrect Function Name"));
    assert!(screen.contains("Probabilities"));
    assert!(screen.contains("DONE"));
}

#[test]
fn failure_screen_shows_service_message() {
    let mut app = App::new(base_config());
    let ticket = match app.handle_action(Action::Classify) {
        Some(AppCommand::Classify(pending)) => pending.ticket,
        other => panic!("expected dispatch, got {other:?}"),
    };
    app.apply_classification(ticket, Err(ClassifyError::service(500, "Model not loaded")));

    assert_eq!(app.phase(), WorkflowPhase::Failed);
    let screen = screen_text(&app);
    assert!(screen.contains("ERROR"));
    assert!(screen.contains("Model not loaded"));
}

#[test]
fn invalid_editor_text_never_dispatches() {
    let mut app = App::new(base_config());
    app.controller.edit_input("{not json");
    assert!(app.handle_action(Action::Classify).is_none());
    assert_eq!(app.phase(), WorkflowPhase::Failed);
    let error = app.controller.last_error().unwrap_or_default();
    assert!(error.starts_with("Invalid JSON input"), "{error}");
}

#[test]
fn healthy_service_shows_in_header() {
    let mut app = App::new(base_config());
    app.apply_health(Ok(healthy_status()));
    assert!(matches!(app.health, HealthView::Reachable(_)));
    let screen = screen_text(&app);
    assert!(screen.contains("Service: healthy"));
}
