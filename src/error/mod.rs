use thiserror::Error;

use crate::font::FontError;
use crate::palette::PaletteError;
use crate::resources::ResourceError;
use crate::stylesheet::StylesheetError;
use crate::theme::{PreferencesError, ThemeError};

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}
