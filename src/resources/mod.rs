use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type ResourceResult<T> = std::result::Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource not found: {name}")]
    NotFound { name: String },
    #[error("failed to read resource: {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("resource is not valid UTF-8: {name}")]
    Encoding {
        name: String,
        source: std::string::FromUtf8Error,
    },
}

/// Supplies stylesheet templates and font files by name.
pub trait ResourceLoader {
    fn load_bytes(&self, name: &str) -> ResourceResult<Vec<u8>>;

    fn load_text(&self, name: &str) -> ResourceResult<String> {
        let bytes = self.load_bytes(name)?;
        String::from_utf8(bytes).map_err(|source| ResourceError::Encoding {
            name: name.to_string(),
            source,
        })
    }
}

const BUNDLED_STYLESHEETS: &[(&str, &str)] = &[
    ("base.css", include_str!("css/base.css")),
    ("day.css", include_str!("css/day.css")),
    ("night.css", include_str!("css/night.css")),
    ("contrast.css", include_str!("css/contrast.css")),
];

/// Stylesheets compiled into the binary. Carries no font files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl ResourceLoader for BundledResources {
    fn load_bytes(&self, name: &str) -> ResourceResult<Vec<u8>> {
        self.load_text(name).map(String::into_bytes)
    }

    fn load_text(&self, name: &str) -> ResourceResult<String> {
        BUNDLED_STYLESHEETS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Resources read from a directory on disk. Names are relative paths.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLoader for DirectoryResources {
    fn load_bytes(&self, name: &str) -> ResourceResult<Vec<u8>> {
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ResourceError::NotFound {
                name: name.to_string(),
            }),
            Err(source) => Err(ResourceError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("editor-theme-resources-{pid}-{nanos}"));
        path
    }

    #[test]
    fn bundled_resources_ship_every_theme_stylesheet() {
        for name in ["base.css", "day.css", "night.css", "contrast.css"] {
            let text = BundledResources.load_text(name).unwrap();
            assert!(text.contains("%:"), "{name} should contain placeholders");
        }
    }

    #[test]
    fn bundled_resources_report_missing_names() {
        let err = BundledResources.load_text("custom.css").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { name } if name == "custom.css"));
    }

    #[test]
    fn directory_resources_read_files_relative_to_root() {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("extra.css"), "QLabel { color: %:FOREGROUND:%; }").unwrap();

        let resources = DirectoryResources::new(&root);
        assert_eq!(
            resources.load_text("extra.css").unwrap(),
            "QLabel { color: %:FOREGROUND:%; }"
        );
        assert!(matches!(
            resources.load_bytes("missing.otf"),
            Err(ResourceError::NotFound { .. })
        ));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn directory_resources_reject_invalid_utf8_text() {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("bad.css"),
            b"QLabel { color: %:FOREGROUND:%; } /* \xff\xfe */",
        )
        .unwrap();

        let resources = DirectoryResources::new(&root);
        let err = resources.load_text("bad.css").unwrap_err();
        assert!(matches!(err, ResourceError::Encoding { name, .. } if name == "bad.css"));
        assert!(resources.load_bytes("bad.css").is_ok());

        let _ = fs::remove_dir_all(&root);
    }
}
