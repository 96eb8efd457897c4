use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::colour::ColourValue;
use crate::palette::Palette;
use crate::resources::{ResourceError, ResourceLoader};

pub type StylesheetResult<T> = std::result::Result<T, StylesheetError>;

#[derive(Debug, Error)]
pub enum StylesheetError {
    #[error("undefined stylesheet variable: {0}")]
    UndefinedVariable(String),
    #[error("expected a colour for {name}, got {value:?}")]
    TypeMismatch { name: String, value: String },
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%:([^:]+?):%").expect("placeholder regex"));

/// Stylesheet text with `%:NAME:%` colour placeholders.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    source: String,
    vars: BTreeMap<String, ColourValue>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Appends a template layer. Layers are joined in load order.
    pub fn load(&mut self, text: &str) {
        self.source.push('\n');
        self.source.push_str(text);
    }

    pub fn load_resource(
        &mut self,
        resources: &dyn ResourceLoader,
        name: &str,
    ) -> StylesheetResult<()> {
        let text = resources.load_text(name)?;
        tracing::debug!(name, bytes = text.len(), "loaded stylesheet layer");
        self.load(&text);
        Ok(())
    }

    pub fn set_var(&mut self, name: &str, value: &str) -> StylesheetResult<()> {
        let colour = ColourValue::parse(value).map_err(|_| StylesheetError::TypeMismatch {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        self.set_colour(name, colour);
        Ok(())
    }

    pub fn set_colour(&mut self, name: impl Into<String>, colour: ColourValue) {
        self.vars.insert(name.into(), colour);
    }

    /// Stores every palette role under its wire name.
    pub fn set_colours(&mut self, palette: &Palette) {
        for (role, colour) in palette.iter() {
            self.set_colour(role.as_str(), colour);
        }
    }

    pub fn get_var(&self, name: &str) -> StylesheetResult<ColourValue> {
        self.vars
            .get(name)
            .copied()
            .ok_or_else(|| StylesheetError::UndefinedVariable(name.to_string()))
    }

    /// Substitutes every placeholder. Fails without partial output when any
    /// referenced variable is missing.
    pub fn render(&self) -> StylesheetResult<String> {
        let pattern = &*PLACEHOLDER_RE;
        if let Some(missing) = pattern
            .captures_iter(&self.source)
            .map(|caps| caps[1].to_string())
            .find(|name| !self.vars.contains_key(name))
        {
            return Err(StylesheetError::UndefinedVariable(missing));
        }

        let rendered = pattern.replace_all(&self.source, |caps: &Captures<'_>| {
            self.vars
                .get(&caps[1])
                .map(|colour| colour.to_hex())
                .unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }

    pub fn export_colours(&self) -> BTreeMap<String, String> {
        self.vars
            .iter()
            .map(|(name, colour)| (name.clone(), colour.to_hex()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::BundledResources;
    use crate::theme::CUSTOM_DEFAULTS;

    fn sheet_with(text: &str) -> Stylesheet {
        Stylesheet {
            source: text.to_string(),
            vars: BTreeMap::new(),
        }
    }

    #[test]
    fn render_substitutes_every_placeholder() {
        let mut sheet = sheet_with("a %:X:%  b %:Y:%");
        sheet.set_var("X", "#ff0000").unwrap();
        sheet.set_var("Y", "#00ff00").unwrap();
        assert_eq!(sheet.render().unwrap(), "a #ff0000  b #00ff00");
    }

    #[test]
    fn render_fails_on_missing_variable() {
        let sheet = sheet_with("%:Z:%");
        let err = sheet.render().unwrap_err();
        assert!(matches!(err, StylesheetError::UndefinedVariable(name) if name == "Z"));
    }

    #[test]
    fn render_is_all_or_nothing() {
        let mut sheet = sheet_with("%:A:% %:B:%");
        sheet.set_var("A", "red").unwrap();
        assert!(sheet.render().is_err());
        sheet.set_var("B", "blue").unwrap();
        assert_eq!(sheet.render().unwrap(), "#ff0000 #0000ff");
    }

    #[test]
    fn render_is_idempotent_and_keeps_vars() {
        let mut sheet = sheet_with("x { color: %:FG:%; background: %:FG:%; }");
        sheet.set_var("FG", "#ABCDEF").unwrap();
        let before = sheet.export_colours();
        let first = sheet.render().unwrap();
        let second = sheet.render().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "x { color: #abcdef; background: #abcdef; }");
        assert_eq!(sheet.export_colours(), before);
    }

    #[test]
    fn placeholders_do_not_span_separators() {
        let mut sheet = sheet_with("%:A:% : %:B:%");
        sheet.set_var("A", "#111111").unwrap();
        sheet.set_var("B", "#222222").unwrap();
        assert_eq!(sheet.render().unwrap(), "#111111 : #222222");
    }

    #[test]
    fn load_appends_layers_with_newlines() {
        let mut sheet = Stylesheet::new();
        sheet.load("base");
        sheet.load("overlay");
        assert_eq!(sheet.source(), "\nbase\noverlay");
    }

    #[test]
    fn load_resource_reads_named_layer() {
        let mut sheet = Stylesheet::new();
        sheet.load_resource(&BundledResources, "base.css").unwrap();
        assert!(sheet.source().starts_with('\n'));
        assert!(sheet.source().contains("%:EDITOR-BACKGROUND:%"));
        assert!(matches!(
            sheet.load_resource(&BundledResources, "nope.css"),
            Err(StylesheetError::Resource(_))
        ));
    }

    #[test]
    fn set_var_rejects_non_colours() {
        let mut sheet = Stylesheet::new();
        let err = sheet.set_var("type", "not a colour").unwrap_err();
        assert!(matches!(err, StylesheetError::TypeMismatch { .. }));
        assert!(sheet.export_colours().is_empty());
    }

    #[test]
    fn get_var_reports_undefined_names() {
        let mut sheet = Stylesheet::new();
        sheet.set_var("test", "red").unwrap();
        assert_eq!(sheet.get_var("test").unwrap(), ColourValue::hex(0xff0000));
        assert!(matches!(
            sheet.get_var("other"),
            Err(StylesheetError::UndefinedVariable(_))
        ));
    }

    #[test]
    fn export_colours_uses_canonical_hex() {
        let mut sheet = Stylesheet::new();
        sheet.set_var("test", "red").unwrap();
        assert_eq!(
            sheet.export_colours(),
            BTreeMap::from([("test".to_string(), "#ff0000".to_string())])
        );
    }

    #[test]
    fn base_stylesheet_renders_with_full_palette() {
        let mut sheet = Stylesheet::new();
        sheet.load_resource(&BundledResources, "base.css").unwrap();
        sheet.set_colours(&CUSTOM_DEFAULTS);
        let css = sheet.render().unwrap();
        assert!(!css.contains("%:"));
        assert!(css.contains("#fefee7"));
    }
}
