use std::collections::BTreeMap;

use thiserror::Error;

use crate::colour::{ColourRole, ColourValue};

/// Preference value meaning "explicitly back to the default colour".
pub const UNSET_SENTINEL: &str = "[NONE]";

pub type PaletteResult<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("unknown colour role: {0}")]
    RoleNotFound(String),
    #[error("expected a colour for {key}, got {value:?}")]
    TypeMismatch { key: String, value: String },
}

/// A colour for every role. Built-in tables are checked for totality when
/// the constant is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colours: [ColourValue; ColourRole::COUNT],
}

impl Palette {
    pub const fn from_entries(entries: [(ColourRole, ColourValue); ColourRole::COUNT]) -> Self {
        let mut colours = [ColourValue::rgb(0, 0, 0); ColourRole::COUNT];
        let mut seen = [false; ColourRole::COUNT];
        let mut i = 0;
        while i < ColourRole::COUNT {
            let (role, colour) = entries[i];
            let index = role.index();
            assert!(!seen[index], "colour role listed twice in palette");
            seen[index] = true;
            colours[index] = colour;
            i += 1;
        }
        Self { colours }
    }

    pub const fn get(&self, role: ColourRole) -> ColourValue {
        self.colours[role.index()]
    }

    #[must_use]
    pub const fn with(mut self, role: ColourRole, colour: ColourValue) -> Self {
        self.colours[role.index()] = colour;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColourRole, ColourValue)> + '_ {
        ColourRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }

    /// Flat `ROLE -> #hex` view.
    pub fn to_hex_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(role, colour)| (role.as_str().to_string(), colour.to_hex()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    /// Present in the map but meaning "use the default".
    Unset,
    Colour(ColourValue),
}

impl Override {
    pub fn parse(key: &str, value: &str) -> PaletteResult<Self> {
        if value == UNSET_SENTINEL {
            return Ok(Override::Unset);
        }
        ColourValue::parse(value)
            .map(Override::Colour)
            .map_err(|_| PaletteError::TypeMismatch {
                key: key.to_string(),
                value: value.to_string(),
            })
    }

    pub const fn colour(self) -> Option<ColourValue> {
        match self {
            Override::Unset => None,
            Override::Colour(colour) => Some(colour),
        }
    }
}

/// Sparse per-role overrides produced by the colour panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    entries: BTreeMap<ColourRole, Override>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: ColourRole) -> Option<Override> {
        self.entries.get(&role).copied()
    }

    pub fn insert(&mut self, role: ColourRole, colour: ColourValue) {
        self.entries.insert(role, Override::Colour(colour));
    }

    /// Stores a textual colour, or the unset sentinel.
    pub fn set(&mut self, role: ColourRole, value: &str) -> PaletteResult<()> {
        let parsed = Override::parse(role.as_str(), value)?;
        self.entries.insert(role, parsed);
        Ok(())
    }

    pub fn unset(&mut self, role: ColourRole) {
        self.entries.insert(role, Override::Unset);
    }

    pub fn remove(&mut self, role: ColourRole) -> Option<Override> {
        self.entries.remove(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColourRole, Override)> + '_ {
        self.entries.iter().map(|(role, value)| (*role, *value))
    }

    /// Reads the flat map kept by the preference store. Keys that are not
    /// known colour roles are skipped.
    pub fn from_preferences<'a, I>(entries: I) -> PaletteResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut map = Self::new();
        for (key, value) in entries {
            let Some(role) = ColourRole::from_name(key) else {
                tracing::debug!(%key, "ignoring unknown colour role in preferences");
                continue;
            };
            map.set(role, value)?;
        }
        Ok(map)
    }

    pub fn to_preferences(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(role, value)| {
                let text = match value {
                    Override::Unset => UNSET_SENTINEL.to_string(),
                    Override::Colour(colour) => colour.to_hex(),
                };
                (role.as_str().to_string(), text)
            })
            .collect()
    }
}

impl FromIterator<(ColourRole, ColourValue)> for OverrideMap {
    fn from_iter<T: IntoIterator<Item = (ColourRole, ColourValue)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(role, colour)| (role, Override::Colour(colour)))
                .collect(),
        }
    }
}

pub fn resolve(role: ColourRole, overrides: &OverrideMap, defaults: &Palette) -> ColourValue {
    overrides
        .get(role)
        .and_then(Override::colour)
        .unwrap_or_else(|| defaults.get(role))
}

pub fn resolve_named(
    name: &str,
    overrides: &OverrideMap,
    defaults: &Palette,
) -> PaletteResult<ColourValue> {
    let role =
        ColourRole::from_name(name).ok_or_else(|| PaletteError::RoleNotFound(name.to_string()))?;
    Ok(resolve(role, overrides, defaults))
}

pub fn resolve_all(overrides: &OverrideMap, defaults: &Palette) -> Palette {
    ColourRole::ALL
        .into_iter()
        .fold(*defaults, |palette, role| {
            palette.with(role, resolve(role, overrides, defaults))
        })
}

/// Minimal overrides that turn `defaults` into `current`.
pub fn diff(current: &Palette, defaults: &Palette) -> OverrideMap {
    current
        .iter()
        .filter(|(role, colour)| defaults.get(*role) != *colour)
        .collect()
}

pub fn reset_all(defaults: &Palette) -> Palette {
    *defaults
}
