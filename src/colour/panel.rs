use std::fmt;

use crate::palette::{diff, resolve, OverrideMap, Palette};

use super::{ColourRole, ColourValue};

pub type ChangeCallback = Box<dyn FnMut(ColourValue)>;

/// What the panel needs from a colour picker widget.
pub trait ColourControl {
    fn value(&self) -> ColourValue;
    fn set_value(&mut self, colour: ColourValue);
    fn on_change(&mut self, callback: ChangeCallback);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSlot {
    pub row: u8,
    pub column: u8,
    pub label: &'static str,
    pub role: ColourRole,
}

const fn slot(row: u8, column: u8, label: &'static str, role: ColourRole) -> PanelSlot {
    PanelSlot {
        row,
        column,
        label,
        role,
    }
}

/// Two columns of pickers, with the restore button below them.
pub const PANEL_LAYOUT: [PanelSlot; ColourRole::COUNT] = [
    slot(0, 0, "Foreground", ColourRole::Foreground),
    slot(0, 2, "Background", ColourRole::Background),
    slot(1, 0, "Editor Text", ColourRole::EditorForeground),
    slot(1, 2, "Editor Background", ColourRole::EditorBackground),
    slot(2, 0, "Border", ColourRole::Border),
    slot(2, 2, "Buttons", ColourRole::Control),
    slot(3, 0, "Hover", ColourRole::Hover),
    slot(3, 2, "Focus", ColourRole::Focus),
    slot(4, 0, "Current Tab", ColourRole::TabCurrent),
    slot(4, 2, "Close", ColourRole::Close),
];

/// In-memory picker. Remembers its own default so it can be reset on its
/// own, and keeps the stylesheet fragment a button would preview with.
pub struct ColourSwatch {
    colour: ColourValue,
    default: ColourValue,
    preview: String,
    listeners: Vec<ChangeCallback>,
}

impl ColourSwatch {
    pub fn new(default: ColourValue) -> Self {
        Self {
            colour: default,
            default,
            preview: preview_css(default),
            listeners: Vec::new(),
        }
    }

    pub fn default_colour(&self) -> ColourValue {
        self.default
    }

    pub fn set_default(&mut self, default: ColourValue) {
        self.default = default;
    }

    pub fn reset(&mut self) {
        self.set_value(self.default);
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }
}

impl ColourControl for ColourSwatch {
    fn value(&self) -> ColourValue {
        self.colour
    }

    fn set_value(&mut self, colour: ColourValue) {
        self.colour = colour;
        self.preview = preview_css(colour);
        for listener in &mut self.listeners {
            listener(colour);
        }
    }

    fn on_change(&mut self, callback: ChangeCallback) {
        self.listeners.push(callback);
    }
}

impl fmt::Debug for ColourSwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColourSwatch")
            .field("colour", &self.colour)
            .field("default", &self.default)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn preview_css(colour: ColourValue) -> String {
    format!("QPushButton {{ background: {colour}; }} ")
}

#[derive(Debug)]
struct PanelEntry<C> {
    slot: PanelSlot,
    control: C,
}

/// One picker per colour role, compared against a fixed default palette.
#[derive(Debug)]
pub struct ColourPanel<C> {
    defaults: Palette,
    entries: Vec<PanelEntry<C>>,
}

impl ColourPanel<ColourSwatch> {
    pub fn with_swatches(defaults: Palette) -> Self {
        Self::new(defaults, |_, colour| ColourSwatch::new(colour))
    }
}

impl<C: ColourControl> ColourPanel<C> {
    /// Builds the controls in layout order, each starting at its default.
    pub fn new<F>(defaults: Palette, mut make_control: F) -> Self
    where
        F: FnMut(ColourRole, ColourValue) -> C,
    {
        let entries = PANEL_LAYOUT
            .into_iter()
            .map(|slot| PanelEntry {
                slot,
                control: make_control(slot.role, defaults.get(slot.role)),
            })
            .collect();
        Self { defaults, entries }
    }

    pub fn defaults(&self) -> &Palette {
        &self.defaults
    }

    pub fn slots(&self) -> impl Iterator<Item = &PanelSlot> {
        self.entries.iter().map(|entry| &entry.slot)
    }

    pub fn control(&self, role: ColourRole) -> Option<&C> {
        self.entries
            .iter()
            .find(|entry| entry.slot.role == role)
            .map(|entry| &entry.control)
    }

    pub fn control_mut(&mut self, role: ColourRole) -> Option<&mut C> {
        self.entries
            .iter_mut()
            .find(|entry| entry.slot.role == role)
            .map(|entry| &mut entry.control)
    }

    /// Restore defaults.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.control.set_value(self.defaults.get(entry.slot.role));
        }
    }

    /// Current value of every control.
    pub fn current(&self) -> Palette {
        self.entries.iter().fold(self.defaults, |palette, entry| {
            palette.with(entry.slot.role, entry.control.value())
        })
    }

    /// Only the roles changed away from their defaults.
    pub fn colours(&self) -> OverrideMap {
        diff(&self.current(), &self.defaults)
    }

    pub fn set_colours(&mut self, overrides: &OverrideMap) {
        for entry in &mut self.entries {
            let colour = resolve(entry.slot.role, overrides, &self.defaults);
            entry.control.set_value(colour);
        }
    }

    pub fn colour_for(&self, overrides: &OverrideMap, role: ColourRole) -> ColourValue {
        resolve(role, overrides, &self.defaults)
    }
}
