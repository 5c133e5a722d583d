use crossterm::event::{KeyCode, KeyModifiers};
use orphanmap::config::Config;
use orphanmap::keymap::{Action, KeyBinding, KeymapPreset};
use orphanmap::models::Region;
use orphanmap::screens::SelectMapPositionScreen;
use tempfile::TempDir;

#[test]
fn test_config_round_trips_through_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.api.base_url = "http://192.168.0.10:3333".to_string();
    config.api.timeout_secs = 3;
    config.map = Region {
        latitude: -23.55,
        longitude: -46.63,
        latitude_delta: 0.1,
        longitude_delta: 0.2,
    };
    config.theme = "light".to_string();
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.api.base_url, "http://192.168.0.10:3333");
    assert_eq!(loaded.api.timeout_secs, 3);
    assert_eq!(loaded.map, config.map);
    assert_eq!(loaded.theme, "light");
}

#[test]
fn test_hand_written_config_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
theme = "nocolor"

[keymap]
preset = "emacs"
"#,
    )
    .unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.theme, "nocolor");
    assert_eq!(loaded.keymap.preset, KeymapPreset::Emacs);
    assert_eq!(loaded.api.base_url, "http://localhost:3333");
    assert_eq!(loaded.map, Region::default());
}

#[test]
fn test_invalid_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[map]\nlatitude = \"north\"\n").unwrap();

    assert!(Config::load_or_create(&config_path).is_err());
}

#[test]
fn test_keymap_override_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::default();
    config.keymap.preset = KeymapPreset::Vim;
    // 'x' quits instead of 'q'; 'a' creates instead of 'o'
    config.keymap.overrides.push(KeyBinding::new("x", Action::Quit));
    config.keymap.overrides.push(KeyBinding::new("a", Action::Create));
    config.save(&config_path).unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Vim);
    assert_eq!(loaded.keymap.overrides.len(), 2);

    let keymap = &loaded.keymap;
    assert_eq!(
        keymap.get_action(KeyCode::Char('x'), KeyModifiers::NONE),
        Some(Action::Quit)
    );
    assert_eq!(
        keymap.get_action(KeyCode::Char('a'), KeyModifiers::NONE),
        Some(Action::Create)
    );
    // overridden actions lose their preset keys
    assert_eq!(keymap.get_action(KeyCode::Char('q'), KeyModifiers::NONE), None);
    assert_eq!(keymap.get_action(KeyCode::Char('o'), KeyModifiers::NONE), None);
    // everything else still comes from the preset
    assert_eq!(
        keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveDown)
    );
}

#[test]
fn test_override_shadowing_keeps_other_actions() {
    let mut config = Config::default();
    config.keymap.overrides.push(KeyBinding::new("ctrl+r", Action::Refresh));

    let keymap = &config.keymap;
    assert_eq!(
        keymap.get_action(KeyCode::Char('r'), KeyModifiers::CONTROL),
        Some(Action::Refresh)
    );
    assert_eq!(keymap.get_action(KeyCode::Char('r'), KeyModifiers::NONE), None);
    assert_eq!(
        keymap.get_action(KeyCode::Tab, KeyModifiers::NONE),
        Some(Action::NextMarker)
    );
    assert_eq!(keymap.key_for(Action::Refresh), "Ctrl+R");
}

#[test]
fn test_unusable_map_region_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    for map in [
        "latitude = -20.28\nlongitude = -50.54\nlatitude_delta = 0.02\nlongitude_delta = -0.05\n",
        "latitude = -20.28\nlongitude = -50.54\nlatitude_delta = 0.0\nlongitude_delta = 0.05\n",
        "latitude = -20.28\nlongitude = -50.54\nlatitude_delta = nan\nlongitude_delta = 0.05\n",
        "latitude = 95.0\nlongitude = -50.54\nlatitude_delta = 0.02\nlongitude_delta = 0.05\n",
    ] {
        std::fs::write(&config_path, format!("[map]\n{}", map)).unwrap();
        let loaded = Config::load_or_create(&config_path).unwrap();
        assert_eq!(loaded.map, Region::default(), "{}", map);
    }

    // the picker works on the loaded region without panicking
    std::fs::write(
        &config_path,
        "[map]\nlatitude = -20.28\nlongitude = -50.54\nlatitude_delta = 0.02\nlongitude_delta = -0.05\n",
    )
    .unwrap();
    let loaded = Config::load_or_create(&config_path).unwrap();
    let mut picker = SelectMapPositionScreen::new(loaded.map);
    picker.nudge(1.0, -1.0);
    assert!(loaded.map.contains(picker.cursor()));
}

#[test]
fn test_valid_custom_map_region_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[map]\nlatitude = -23.55\nlongitude = -46.63\nlatitude_delta = 0.1\nlongitude_delta = 0.2\n",
    )
    .unwrap();

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.map.latitude, -23.55);
    assert_eq!(loaded.map.longitude_delta, 0.2);
}
