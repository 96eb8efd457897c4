use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "editor-theme";
/// Points the CLI at a directory of stylesheet and font files.
pub const RESOURCE_DIR_ENV: &str = "EDITOR_THEME_RESOURCES";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

/// The two environment roots a config file can live under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDirs {
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl ConfigDirs {
    pub fn new(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Self {
        Self {
            xdg_config_home: xdg_config_home.map(Path::to_path_buf),
            home: home.map(Path::to_path_buf),
        }
    }

    pub fn from_env() -> Self {
        Self {
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// `$XDG_CONFIG_HOME/<app_dir>/<file_name>`, falling back to
    /// `$HOME/.config`. An empty XDG value counts as unset.
    pub fn file_path(&self, app_dir: &str, file_name: &str) -> Result<PathBuf, ConfigPathError> {
        let mut path = self.root()?;
        path.push(app_dir);
        path.push(file_name);
        Ok(path)
    }

    fn root(&self) -> Result<PathBuf, ConfigPathError> {
        if let Some(xdg) = self
            .xdg_config_home
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
        {
            return Ok(xdg.to_path_buf());
        }

        let home = self
            .home
            .as_deref()
            .ok_or(ConfigPathError::MissingHomeDirectory)?;
        Ok(home.join(".config"))
    }
}

pub fn resource_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(RESOURCE_DIR_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_prefers_xdg_config_home() {
        let dirs = ConfigDirs::new(
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        );
        let path = dirs
            .file_path(APP_DIR, "theme.json")
            .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/editor-theme/theme.json")
        );
    }

    #[test]
    fn file_path_falls_back_to_home_dot_config() {
        let dirs = ConfigDirs::new(None, Some(Path::new("/tmp/home")));
        let path = dirs
            .file_path(APP_DIR, "theme.json")
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/editor-theme/theme.json"));
    }

    #[test]
    fn file_path_ignores_empty_xdg_value() {
        let dirs = ConfigDirs::new(Some(Path::new("")), Some(Path::new("/tmp/home")));
        let path = dirs.file_path(APP_DIR, "theme.json").unwrap();
        assert!(path.starts_with("/tmp/home/.config"));
    }

    #[test]
    fn file_path_errors_when_home_missing_and_xdg_unset() {
        let error = ConfigDirs::default()
            .file_path(APP_DIR, "theme.json")
            .unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }
}
