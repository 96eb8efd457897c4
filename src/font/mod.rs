use std::cell::OnceCell;
use std::collections::BTreeMap;

use thiserror::Error;

use crate::colour::{ColourRole, ColourValue};
use crate::resources::{ResourceError, ResourceLoader};

pub const DEFAULT_FONT_SIZE: u16 = 14;
pub const FONT_FAMILY: &str = "Source Code Pro";
/// Substitute family for macOS 10.14, where bundled fonts render black.
pub const MOJAVE_FONT_FAMILY: &str = "Monaco";

pub type FontResult<T> = std::result::Result<T, FontError>;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to load font variant {variant:?} from {filename}")]
    MissingVariant {
        variant: FontVariant,
        filename: String,
        source: ResourceError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontVariant {
    Bold,
    BoldIt,
    It,
    Regular,
    Semibold,
    SemiboldIt,
}

impl FontVariant {
    pub const ALL: [FontVariant; 6] = [
        FontVariant::Bold,
        FontVariant::BoldIt,
        FontVariant::It,
        FontVariant::Regular,
        FontVariant::Semibold,
        FontVariant::SemiboldIt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FontVariant::Bold => "Bold",
            FontVariant::BoldIt => "BoldIt",
            FontVariant::It => "It",
            FontVariant::Regular => "Regular",
            FontVariant::Semibold => "Semibold",
            FontVariant::SemiboldIt => "SemiboldIt",
        }
    }

    pub fn filename(self) -> String {
        format!("SourceCodePro-{}.otf", self.as_str())
    }
}

pub fn should_patch_mojave_font(platform: &str) -> bool {
    platform.starts_with("Darwin-18.")
}

pub fn editor_font_family(platform: &str) -> &'static str {
    if should_patch_mojave_font(platform) {
        tracing::warn!("overriding built-in editor font for macOS Mojave");
        MOJAVE_FONT_FAMILY
    } else {
        FONT_FAMILY
    }
}

/// Either a literal colour or a `%:ROLE:%` reference into the theme palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourRef {
    Literal(ColourValue),
    Role(ColourRole),
}

impl From<ColourValue> for ColourRef {
    fn from(value: ColourValue) -> Self {
        ColourRef::Literal(value)
    }
}

impl From<ColourRole> for ColourRef {
    fn from(value: ColourRole) -> Self {
        ColourRef::Role(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontStyle {
    pub colour: ColourRef,
    pub paper: ColourRef,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStyle {
    pub const fn new() -> Self {
        Self {
            colour: ColourRef::Role(ColourRole::EditorForeground),
            paper: ColourRef::Role(ColourRole::EditorBackground),
            bold: false,
            italic: false,
        }
    }

    pub const fn fg(colour: u32) -> Self {
        Self::new().colour(ColourRef::Literal(ColourValue::hex(colour)))
    }

    pub const fn colour(mut self, colour: ColourRef) -> Self {
        self.colour = colour;
        self
    }

    pub const fn paper(mut self, paper: ColourRef) -> Self {
        self.paper = paper;
        self
    }

    pub const fn on(self, paper: u32) -> Self {
        self.paper(ColourRef::Literal(ColourValue::hex(paper)))
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn style_name(&self) -> &'static str {
        match (self.bold, self.italic) {
            (true, true) => "Semibold Italic",
            (true, false) => "Semibold",
            (false, true) => "Italic",
            (false, false) => "Regular",
        }
    }

    pub const fn variant(&self) -> FontVariant {
        match (self.bold, self.italic) {
            (true, true) => FontVariant::SemiboldIt,
            (true, false) => FontVariant::Semibold,
            (false, true) => FontVariant::It,
            (false, false) => FontVariant::Regular,
        }
    }
}

/// What the highlighter needs to select a face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub style_name: &'static str,
    pub size: u16,
}

#[derive(Debug, Clone, Default)]
pub struct FontFaces {
    faces: BTreeMap<FontVariant, Vec<u8>>,
}

impl FontFaces {
    pub fn data(&self, variant: FontVariant) -> Option<&[u8]> {
        self.faces.get(&variant).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Loads the bundled font variants on first use and keeps them for the
/// lifetime of the handle.
pub struct FontDatabase {
    loader: Box<dyn ResourceLoader>,
    family: String,
    faces: OnceCell<FontFaces>,
}

impl FontDatabase {
    pub fn new(loader: Box<dyn ResourceLoader>, family: impl Into<String>) -> Self {
        Self {
            loader,
            family: family.into(),
            faces: OnceCell::new(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn is_loaded(&self) -> bool {
        self.faces.get().is_some()
    }

    pub fn faces(&self) -> FontResult<&FontFaces> {
        if let Some(faces) = self.faces.get() {
            return Ok(faces);
        }
        let loaded = self.load_faces()?;
        Ok(self.faces.get_or_init(|| loaded))
    }

    pub fn font(&self, style: &FontStyle, size: u16) -> FontResult<FontSpec> {
        self.faces()?;
        Ok(FontSpec {
            family: self.family.clone(),
            style_name: style.style_name(),
            size,
        })
    }

    fn load_faces(&self) -> FontResult<FontFaces> {
        let mut faces = BTreeMap::new();
        for variant in FontVariant::ALL {
            let filename = variant.filename();
            let data = self
                .loader
                .load_bytes(&filename)
                .map_err(|source| FontError::MissingVariant {
                    variant,
                    filename: filename.clone(),
                    source,
                })?;
            tracing::debug!(%filename, bytes = data.len(), "loaded font variant");
            faces.insert(variant, data);
        }
        Ok(FontFaces { faces })
    }
}

impl std::fmt::Debug for FontDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDatabase")
            .field("family", &self.family)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::resources::ResourceResult;

    /// Serves fake font bytes and records every request.
    #[derive(Default)]
    pub(crate) struct CountingLoader {
        pub(crate) requests: Rc<RefCell<Vec<String>>>,
        pub(crate) missing: Option<&'static str>,
    }

    impl ResourceLoader for CountingLoader {
        fn load_bytes(&self, name: &str) -> ResourceResult<Vec<u8>> {
            self.requests.borrow_mut().push(name.to_string());
            if self.missing == Some(name) {
                return Err(ResourceError::NotFound {
                    name: name.to_string(),
                });
            }
            Ok(name.as_bytes().to_vec())
        }
    }

    #[test]
    fn default_style_uses_editor_roles() {
        let style = FontStyle::default();
        assert_eq!(style.colour, ColourRef::Role(ColourRole::EditorForeground));
        assert_eq!(style.paper, ColourRef::Role(ColourRole::EditorBackground));
        assert!(!style.bold);
        assert!(!style.italic);
    }

    #[test]
    fn builder_sets_literal_colours_and_flags() {
        let style = FontStyle::fg(0xffc0cb).on(0x000000).bold().italic();
        assert_eq!(style.colour, ColourRef::Literal(ColourValue::hex(0xffc0cb)));
        assert_eq!(style.paper, ColourRef::Literal(ColourValue::hex(0x000000)));
        assert!(style.bold);
        assert!(style.italic);
    }

    #[test]
    fn style_name_maps_bold_and_italic() {
        assert_eq!(FontStyle::new().style_name(), "Regular");
        assert_eq!(FontStyle::new().italic().style_name(), "Italic");
        assert_eq!(FontStyle::new().bold().style_name(), "Semibold");
        assert_eq!(FontStyle::new().bold().italic().style_name(), "Semibold Italic");
        assert_eq!(FontStyle::new().bold().italic().variant(), FontVariant::SemiboldIt);
    }

    #[test]
    fn mojave_font_patch_only_applies_to_darwin_18() {
        assert!(!should_patch_mojave_font("Windows"));
        assert!(should_patch_mojave_font("Darwin-18.0.0-x86_64-i386-64bit"));
        assert_eq!(editor_font_family("Linux-6.1"), FONT_FAMILY);
        assert_eq!(editor_font_family("Darwin-18.2.0"), MOJAVE_FONT_FAMILY);
    }

    #[test]
    fn font_database_loads_each_variant_once() {
        let loader = CountingLoader::default();
        let requests = Rc::clone(&loader.requests);
        let database = FontDatabase::new(Box::new(loader), FONT_FAMILY);
        assert!(!database.is_loaded());

        let spec = database
            .font(&FontStyle::new().bold(), DEFAULT_FONT_SIZE)
            .unwrap();
        database.font(&FontStyle::new(), 10).unwrap();

        assert_eq!(
            spec,
            FontSpec {
                family: FONT_FAMILY.to_string(),
                style_name: "Semibold",
                size: DEFAULT_FONT_SIZE,
            }
        );
        assert_eq!(requests.borrow().len(), FontVariant::ALL.len());
        assert_eq!(requests.borrow()[0], "SourceCodePro-Bold.otf");
        let faces = database.faces().unwrap();
        assert_eq!(faces.len(), 6);
        assert_eq!(
            faces.data(FontVariant::It),
            Some("SourceCodePro-It.otf".as_bytes())
        );
    }

    #[test]
    fn font_database_propagates_missing_variant() {
        let loader = CountingLoader {
            missing: Some("SourceCodePro-It.otf"),
            ..CountingLoader::default()
        };
        let database = FontDatabase::new(Box::new(loader), FONT_FAMILY);
        let err = database.faces().unwrap_err();
        assert!(matches!(
            err,
            FontError::MissingVariant {
                variant: FontVariant::It,
                ..
            }
        ));
        assert!(!database.is_loaded());
    }
}
