//! Tests for loading and saving the YAML config file.

use tempfile::tempdir;
use termit_config::{Config, ConfigError, RgbColor, UserAction, UserMenu, UserMenuItem};

#[test]
fn test_load_missing_file_writes_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nested").join("config.yaml");

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(path.exists(), "default config should be written");
}

#[test]
fn test_save_then_load_preserves_user_values() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.yaml");

    let config = Config {
        font: "Terminus 12".to_string(),
        foreground_color: RgbColor::new(0x11, 0x22, 0x33),
        allow_changing_title: false,
        user_menus: vec![UserMenu {
            name: "Tools".to_string(),
            items: vec![UserMenuItem {
                name: "Top".to_string(),
                action: UserAction::SendText {
                    text: "top\n".to_string(),
                },
            }],
        }],
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(
        !temp.path().join("config.yaml.tmp").exists(),
        "temp file should be renamed away"
    );
}

#[test]
fn test_user_menu_yaml_format() {
    let yaml = r##"
foreground_color: "#00ff00"
user_menus:
  - name: Scripts
    items:
      - name: Edit config
        action:
          type: command
          command: "xdg-open ~/.config/termit/config.yaml"
      - name: New tab
        action:
          type: builtin
          action: new_tab
"##;
    let config: Config = serde_yaml_ng::from_str(yaml).unwrap();

    assert_eq!(config.foreground_color, RgbColor::new(0, 255, 0));
    let items = &config.user_menus[0].items;
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[1].action,
        UserAction::Builtin {
            action: "new_tab".to_string()
        }
    );
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "foreground_color: [not, a, colour]\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_empty_file_loads_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.yaml");
    std::fs::write(&path, "   \n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}
