use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colour::ColourRole;
use crate::config::{ConfigDirs, ConfigPathError, APP_DIR};
use crate::font::DEFAULT_FONT_SIZE;
use crate::palette::{OverrideMap, PaletteResult};

use super::{Theme, ThemeName};

const THEME_CONFIG_FILE: &str = "theme.json";

pub type PreferencesResult<T> = std::result::Result<T, PreferencesError>;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read theme preferences: {path}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("failed to write theme preferences: {path}")]
    WriteConfig { path: PathBuf, source: io::Error },
    #[error("failed to parse theme preferences")]
    ParseConfig(#[from] serde_json::Error),
}

/// Contents of `theme.json`. `custom_colours` is the flat role → colour map
/// the colour panel produces; keys this version does not know are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreferences {
    #[serde(default)]
    pub theme: ThemeName,
    #[serde(default)]
    pub custom_colours: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u16>,
}

impl ThemePreferences {
    pub fn overrides(&self) -> PaletteResult<OverrideMap> {
        OverrideMap::from_preferences(&self.custom_colours)
    }

    /// Replaces every known role entry, leaving unknown keys in place.
    pub fn set_overrides(&mut self, overrides: &OverrideMap) {
        self.custom_colours
            .retain(|key, _| ColourRole::from_name(key).is_none());
        self.custom_colours.extend(overrides.to_preferences());
    }

    pub fn font_size(&self) -> u16 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// The selected theme, with saved overrides when it is the custom one.
    pub fn theme(&self) -> PaletteResult<Theme> {
        match self.theme {
            ThemeName::Custom => Ok(Theme::custom(self.overrides()?)),
            name => Ok(Theme::builtin(name)),
        }
    }
}

pub fn load_theme_preferences() -> PreferencesResult<ThemePreferences> {
    load_theme_preferences_with(&ConfigDirs::from_env())
}

fn load_theme_preferences_with(dirs: &ConfigDirs) -> PreferencesResult<ThemePreferences> {
    let path = preferences_path_with(dirs)?;
    if !path.exists() {
        tracing::debug!(?path, "no theme preferences; using defaults");
        return Ok(ThemePreferences::default());
    }

    let serialized = fs::read_to_string(&path).map_err(|source| PreferencesError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&serialized)?)
}

pub fn save_theme_preferences(preferences: &ThemePreferences) -> PreferencesResult<()> {
    save_theme_preferences_with(preferences, &ConfigDirs::from_env())
}

fn save_theme_preferences_with(
    preferences: &ThemePreferences,
    dirs: &ConfigDirs,
) -> PreferencesResult<()> {
    let path = preferences_path_with(dirs)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PreferencesError::WriteConfig {
            path: path.clone(),
            source,
        })?;
    }

    let serialized = serde_json::to_string_pretty(preferences)?;
    fs::write(&path, serialized).map_err(|source| PreferencesError::WriteConfig {
        path: path.clone(),
        source,
    })?;
    tracing::info!(?path, theme = %preferences.theme, "saved theme preferences");
    Ok(())
}

/// Switches the selected theme without touching saved custom colours.
pub fn save_theme_selection(theme: ThemeName) -> PreferencesResult<()> {
    save_theme_selection_with(theme, &ConfigDirs::from_env())
}

fn save_theme_selection_with(theme: ThemeName, dirs: &ConfigDirs) -> PreferencesResult<()> {
    let path = preferences_path_with(dirs)?;
    // An unreadable existing file is replaced rather than blocking the switch.
    let mut preferences = match load_theme_preferences_with(dirs) {
        Ok(preferences) => preferences,
        Err(error) => {
            tracing::warn!(
                ?path,
                error = %error,
                "discarding unreadable theme preferences; saved custom colours are lost"
            );
            ThemePreferences::default()
        }
    };
    preferences.theme = theme;
    save_theme_preferences_with(&preferences, dirs)
}

fn preferences_path_with(dirs: &ConfigDirs) -> PreferencesResult<PathBuf> {
    dirs.file_path(APP_DIR, THEME_CONFIG_FILE)
        .map_err(|error| match error {
            ConfigPathError::MissingHomeDirectory => PreferencesError::MissingHomeDirectory,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::ColourValue;
    use crate::palette::{Override, PaletteError};

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("editor-theme-prefs-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&ConfigDirs)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&ConfigDirs::new(Some(root.as_path()), None));
        let _ = fs::remove_dir_all(&root);
    }

    fn write_preferences(dirs: &ConfigDirs, json: &str) {
        let path = preferences_path_with(dirs).unwrap();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, json).unwrap();
    }

    #[test]
    fn preferences_default_to_day_when_missing() {
        with_temp_root(|dirs| {
            let prefs = load_theme_preferences_with(dirs).unwrap();
            assert_eq!(prefs.theme, ThemeName::Day);
            assert!(prefs.custom_colours.is_empty());
            assert_eq!(prefs.font_size(), DEFAULT_FONT_SIZE);
        });
    }

    #[test]
    fn preferences_save_and_load_round_trip() {
        with_temp_root(|dirs| {
            let mut prefs = ThemePreferences {
                theme: ThemeName::Custom,
                font_size: Some(18),
                ..ThemePreferences::default()
            };
            let overrides: OverrideMap = [(ColourRole::Focus, ColourValue::hex(0xff8800))]
                .into_iter()
                .collect();
            prefs.set_overrides(&overrides);
            save_theme_preferences_with(&prefs, dirs).unwrap();

            let loaded = load_theme_preferences_with(dirs).unwrap();
            assert_eq!(loaded, prefs);
            assert_eq!(loaded.overrides().unwrap(), overrides);
            assert_eq!(loaded.font_size(), 18);
        });
    }

    #[test]
    fn preferences_reject_invalid_payload() {
        with_temp_root(|dirs| {
            write_preferences(dirs, "{ invalid ");
            let err = load_theme_preferences_with(dirs).unwrap_err();
            assert!(matches!(err, PreferencesError::ParseConfig(_)));
        });
    }

    #[test]
    fn preferences_ignore_unknown_fields_and_roles() {
        with_temp_root(|dirs| {
            write_preferences(
                dirs,
                r##"{
                    "theme": "custom",
                    "show_minimap": true,
                    "custom_colours": {
                        "BACKGROUND": "#123456",
                        "SIDEBAR": "#000000",
                        "FOCUS": "[NONE]"
                    }
                }"##,
            );

            let prefs = load_theme_preferences_with(dirs).unwrap();
            let overrides = prefs.overrides().unwrap();
            assert_eq!(overrides.len(), 2);
            assert_eq!(overrides.get(ColourRole::Focus), Some(Override::Unset));

            let theme = prefs.theme().unwrap();
            assert_eq!(theme.name(), ThemeName::Custom);
            assert_eq!(
                theme.colour(ColourRole::Background),
                ColourValue::hex(0x123456)
            );
            assert_eq!(
                theme.colour(ColourRole::Focus),
                crate::theme::CUSTOM_DEFAULTS.get(ColourRole::Focus)
            );
        });
    }

    #[test]
    fn preferences_surface_malformed_custom_colours() {
        let prefs = ThemePreferences {
            theme: ThemeName::Custom,
            custom_colours: BTreeMap::from([("HOVER".to_string(), "#zzz".to_string())]),
            font_size: None,
        };
        assert!(matches!(
            prefs.theme(),
            Err(PaletteError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn set_overrides_keeps_unknown_keys() {
        let mut prefs = ThemePreferences {
            custom_colours: BTreeMap::from([
                ("SIDEBAR".to_string(), "#010101".to_string()),
                ("HOVER".to_string(), "#020202".to_string()),
            ]),
            ..ThemePreferences::default()
        };
        prefs.set_overrides(&OverrideMap::new());
        assert_eq!(
            prefs.custom_colours,
            BTreeMap::from([("SIDEBAR".to_string(), "#010101".to_string())])
        );
    }

    #[test]
    fn save_selection_keeps_custom_colours() {
        with_temp_root(|dirs| {
            write_preferences(
                dirs,
                r##"{ "theme": "custom", "custom_colours": { "CLOSE": "#aa0000" } }"##,
            );

            save_theme_selection_with(ThemeName::Night, dirs).unwrap();
            let prefs = load_theme_preferences_with(dirs).unwrap();
            assert_eq!(prefs.theme, ThemeName::Night);
            assert_eq!(prefs.custom_colours["CLOSE"], "#aa0000");
        });
    }

    #[test]
    fn save_selection_replaces_unreadable_file() {
        with_temp_root(|dirs| {
            write_preferences(dirs, "not json");
            save_theme_selection_with(ThemeName::Contrast, dirs).unwrap();
            let prefs = load_theme_preferences_with(dirs).unwrap();
            assert_eq!(prefs.theme, ThemeName::Contrast);
        });
    }

    #[test]
    fn save_selection_replaces_file_it_cannot_read() {
        with_temp_root(|dirs| {
            let path = preferences_path_with(dirs).unwrap();
            fs::create_dir_all(path.join("stale")).unwrap();

            let err = save_theme_selection_with(ThemeName::Night, dirs).unwrap_err();
            assert!(matches!(err, PreferencesError::WriteConfig { .. }));

            fs::remove_dir_all(&path).unwrap();
            write_preferences(dirs, r##"{ "theme": "custom", "custom_colours": 7 }"##);
            save_theme_selection_with(ThemeName::Night, dirs).unwrap();
            let prefs = load_theme_preferences_with(dirs).unwrap();
            assert_eq!(prefs.theme, ThemeName::Night);
            assert!(prefs.custom_colours.is_empty());
        });
    }

    #[test]
    fn missing_home_is_reported() {
        let dirs = ConfigDirs::new(None, None);
        assert!(matches!(
            load_theme_preferences_with(&dirs),
            Err(PreferencesError::MissingHomeDirectory)
        ));
    }
}
