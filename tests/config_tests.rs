//! 配置功能测试

use qtrans::domain::model::TranslatorId;
use qtrans::infrastructure::config::{load_config_from, write_config_sample, Config};
use qtrans::presentation::messages::Locale;
use qtrans::presentation::view::FontSize;
use std::fs;
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.theme, "temp");
    assert_eq!(config.locale, Locale::En);
    assert!(!config.translation.enable_specified);
    assert_eq!(config.translation.specified_translator, TranslatorId::Youdao);
    assert_eq!(config.translation.youdao_keyfrom, "IntellijTranslate");
    assert_eq!(config.translation.youdao_api_key, "1918103305");
    assert!(config.translation.google_api_key.is_none());
    assert_eq!(config.popup.debounce(), Duration::from_millis(10));
    assert!(!config.popup.show_in_tool_window);
    assert_eq!(config.popup.font_size, FontSize::Medium);
}

#[test]
fn test_logging_defaults() {
    let config = Config::default();

    assert!(config.logging.enable);
    assert!(config.logging.path.is_none());
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn test_config_toml_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
theme = "wudao"
locale = "zh"

[logging]
enable = true
path = "/tmp/qtrans.log"
level = "DEBUG"

[translation]
enable_specified = true
specified_translator = "google"

[popup]
debounce_ms = 250
show_in_tool_window = true
font_size = "x_large"
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.theme, "wudao");
    assert_eq!(config.locale, Locale::Zh);
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/qtrans.log"));
    assert_eq!(config.logging.level, "DEBUG");
    assert!(config.translation.enable_specified);
    assert_eq!(config.translation.specified_translator, TranslatorId::Google);
    // unspecified keys keep their defaults
    assert_eq!(config.translation.youdao_keyfrom, "IntellijTranslate");
    assert_eq!(config.popup.debounce(), Duration::from_millis(250));
    assert!(config.popup.show_in_tool_window);
    assert_eq!(config.popup.font_size, FontSize::XLarge);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.theme, "temp");
    assert_eq!(config.popup.debounce_ms, 10);
}

#[test]
fn test_malformed_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "theme = [not toml").unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.logging.level, "WARN");
    assert_eq!(config.translation.specified_translator, TranslatorId::Youdao);
}

#[test]
fn test_generated_sample_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    write_config_sample(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[logging]"));
    assert!(content.contains("[translation]"));
    assert!(content.contains("[popup]"));

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.theme, Config::default().theme);
    assert_eq!(config.popup.font_size, FontSize::Medium);
    assert_eq!(config.translation.youdao_api_key, "1918103305");
}
