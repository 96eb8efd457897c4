mod builtin;
pub mod preferences;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colour::{ColourRole, ColourValue};
use crate::font::{ColourRef, FontDatabase, FontError, FontSpec, FontStyle};
use crate::palette::{resolve_all, OverrideMap, Palette, PaletteError};
use crate::resources::ResourceLoader;
use crate::stylesheet::{Stylesheet, StylesheetError};

pub use builtin::{CONTRAST_COLOURS, CUSTOM_DEFAULTS, DAY_COLOURS, NIGHT_COLOURS};
pub use preferences::{
    load_theme_preferences, save_theme_preferences, save_theme_selection, PreferencesError,
    ThemePreferences,
};

const BASE_STYLESHEET: &str = "base.css";

pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme {0} does not accept colour overrides")]
    NotCustomisable(ThemeName),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),
    #[error(transparent)]
    Font(#[from] FontError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Day,
    Night,
    Contrast,
    Custom,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Day,
        ThemeName::Night,
        ThemeName::Contrast,
        ThemeName::Custom,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeName::Day => "day",
            ThemeName::Night => "night",
            ThemeName::Contrast => "contrast",
            ThemeName::Custom => "custom",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ThemeError::UnknownTheme(s.to_string()))
    }
}

/// Preset the host's chart widgets should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Light,
    Dark,
    HighContrast,
}

/// Colours for editor chrome that sits outside the syntax styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorColours {
    pub caret: ColourValue,
    pub margin: ColourValue,
    pub indicator_error: ColourValue,
    pub indicator_style: ColourValue,
    pub debug_style: ColourValue,
    pub indicator_word_match: ColourValue,
    pub brace_background: ColourValue,
    pub brace_foreground: ColourValue,
    pub unmatched_brace_background: ColourValue,
    pub unmatched_brace_foreground: ColourValue,
    pub breakpoint_marker: ColourValue,
    pub important: ColourValue,
}

/// Syntax style per highlighter category. Several categories usually share
/// one style, so the table is filled a group at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontStyleTable {
    styles: BTreeMap<String, FontStyle>,
}

impl FontStyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn group(mut self, categories: &[&str], style: FontStyle) -> Self {
        for category in categories {
            self.insert(category, style);
        }
        self
    }

    pub fn insert(&mut self, category: &str, style: FontStyle) {
        self.styles.insert(category.to_string(), style);
    }

    pub fn get(&self, category: &str) -> Option<&FontStyle> {
        self.styles.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FontStyle)> {
        self.styles
            .iter()
            .map(|(category, style)| (category.as_str(), style))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Highlighter category name to the highlighter's numeric style id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleIds {
    ids: BTreeMap<String, i32>,
}

impl StyleIds {
    pub fn get(&self, category: &str) -> Option<i32> {
        self.ids.get(category).copied()
    }
}

impl<'a> FromIterator<(&'a str, i32)> for StyleIds {
    fn from_iter<T: IntoIterator<Item = (&'a str, i32)>>(iter: T) -> Self {
        Self {
            ids: iter
                .into_iter()
                .map(|(category, id)| (category.to_string(), id))
                .collect(),
        }
    }
}

/// A syntax style with every placeholder resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub colour: ColourValue,
    pub paper: ColourValue,
    pub font: FontSpec,
    pub eol_fill: bool,
}

/// Implemented by the editor's syntax highlighter.
pub trait HighlighterAdapter {
    fn set_default_style(&mut self, style: &ResolvedStyle);
    fn set_style(&mut self, style_id: i32, style: &ResolvedStyle);
    fn set_editor_colours(&mut self, colours: &EditorColours);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PaletteSource {
    Fixed(Palette),
    Custom(OverrideMap),
}

#[derive(Debug, Clone)]
pub struct Theme {
    name: ThemeName,
    icon: &'static str,
    palette: PaletteSource,
    fonts: FontStyleTable,
    default_font: FontStyle,
    editor: EditorColours,
    overlay: Option<&'static str>,
    chart: ChartStyle,
}

impl Theme {
    pub fn day() -> Self {
        Self {
            name: ThemeName::Day,
            icon: "theme_day",
            palette: PaletteSource::Fixed(DAY_COLOURS),
            fonts: builtin::day_fonts(),
            default_font: FontStyle::new(),
            editor: builtin::DAY_EDITOR,
            overlay: Some("day.css"),
            chart: ChartStyle::Light,
        }
    }

    pub fn night() -> Self {
        Self {
            name: ThemeName::Night,
            icon: "theme",
            palette: PaletteSource::Fixed(NIGHT_COLOURS),
            fonts: builtin::night_fonts(),
            default_font: FontStyle::new(),
            editor: builtin::NIGHT_EDITOR,
            overlay: Some("night.css"),
            chart: ChartStyle::Dark,
        }
    }

    pub fn contrast() -> Self {
        Self {
            name: ThemeName::Contrast,
            icon: "theme_contrast",
            palette: PaletteSource::Fixed(CONTRAST_COLOURS),
            fonts: builtin::contrast_fonts(),
            default_font: builtin::CONTRAST_DEFAULT_FONT,
            editor: builtin::CONTRAST_EDITOR,
            overlay: Some("contrast.css"),
            chart: ChartStyle::HighContrast,
        }
    }

    pub fn custom(overrides: OverrideMap) -> Self {
        Self {
            name: ThemeName::Custom,
            icon: "theme_custom",
            palette: PaletteSource::Custom(overrides),
            fonts: builtin::day_fonts(),
            default_font: FontStyle::new(),
            editor: builtin::DAY_EDITOR,
            overlay: None,
            chart: ChartStyle::Light,
        }
    }

    pub fn builtin(name: ThemeName) -> Self {
        match name {
            ThemeName::Day => Self::day(),
            ThemeName::Night => Self::night(),
            ThemeName::Contrast => Self::contrast(),
            ThemeName::Custom => Self::custom(OverrideMap::new()),
        }
    }

    pub fn name(&self) -> ThemeName {
        self.name
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn chart(&self) -> ChartStyle {
        self.chart
    }

    pub fn fonts(&self) -> &FontStyleTable {
        &self.fonts
    }

    pub fn default_font(&self) -> &FontStyle {
        &self.default_font
    }

    pub fn editor_colours(&self) -> &EditorColours {
        &self.editor
    }

    /// Resolved palette. The custom theme re-merges its overrides on every
    /// call.
    pub fn colours(&self) -> Palette {
        match &self.palette {
            PaletteSource::Fixed(palette) => *palette,
            PaletteSource::Custom(overrides) => resolve_all(overrides, &CUSTOM_DEFAULTS),
        }
    }

    pub fn colour(&self, role: ColourRole) -> ColourValue {
        self.colours().get(role)
    }

    pub fn map_colour(&self, colour: ColourRef) -> ColourValue {
        match colour {
            ColourRef::Literal(value) => value,
            ColourRef::Role(role) => self.colour(role),
        }
    }

    pub fn overrides(&self) -> Option<&OverrideMap> {
        match &self.palette {
            PaletteSource::Custom(overrides) => Some(overrides),
            PaletteSource::Fixed(_) => None,
        }
    }

    pub fn set_overrides(&mut self, overrides: OverrideMap) -> ThemeResult<()> {
        match &mut self.palette {
            PaletteSource::Custom(current) => {
                *current = overrides;
                Ok(())
            }
            PaletteSource::Fixed(_) => Err(ThemeError::NotCustomisable(self.name)),
        }
    }

    /// Base stylesheet plus this theme's overlay, with the resolved palette
    /// loaded as variables.
    pub fn stylesheet(&self, resources: &dyn ResourceLoader) -> ThemeResult<Stylesheet> {
        let mut sheet = Stylesheet::new();
        sheet.load_resource(resources, BASE_STYLESHEET)?;
        if let Some(overlay) = self.overlay {
            sheet.load_resource(resources, overlay)?;
        }
        sheet.set_colours(&self.colours());
        Ok(sheet)
    }

    pub fn apply(
        &self,
        adapter: &mut dyn HighlighterAdapter,
        style_ids: &StyleIds,
        fonts: &FontDatabase,
        font_size: u16,
    ) -> ThemeResult<()> {
        let palette = self.colours();
        let resolve = |colour: ColourRef| match colour {
            ColourRef::Literal(value) => value,
            ColourRef::Role(role) => palette.get(role),
        };

        adapter.set_default_style(&ResolvedStyle {
            colour: resolve(self.default_font.colour),
            paper: resolve(self.default_font.paper),
            font: fonts.font(&self.default_font, font_size)?,
            eol_fill: false,
        });

        let mut applied = 0usize;
        for (category, style) in self.fonts.iter() {
            let Some(style_id) = style_ids.get(category) else {
                tracing::debug!(category, theme = %self.name, "highlighter has no such style");
                continue;
            };
            adapter.set_style(
                style_id,
                &ResolvedStyle {
                    colour: resolve(style.colour),
                    paper: resolve(style.paper),
                    font: fonts.font(style, font_size)?,
                    eol_fill: true,
                },
            );
            applied += 1;
        }

        adapter.set_editor_colours(&self.editor);
        tracing::info!(theme = %self.name, styles = applied, "applied theme to editor");
        Ok(())
    }
}
