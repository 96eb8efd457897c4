pub mod colour;
pub mod config;
pub mod error;
pub mod font;
pub mod logging;
pub mod palette;
pub mod resources;
pub mod stylesheet;
pub mod theme;
pub use error::{AppError, AppResult};

use crate::config::resource_dir_from_env;
use crate::resources::{BundledResources, DirectoryResources, ResourceLoader};
use crate::theme::{load_theme_preferences, ThemeName};

/// Renders the stylesheet for `theme`, or for the theme saved in the user's
/// preferences when none is given.
pub fn render_stylesheet(theme: Option<ThemeName>) -> AppResult<String> {
    let mut preferences = load_theme_preferences()?;
    if let Some(theme) = theme {
        preferences.theme = theme;
    }
    let theme = preferences.theme()?;

    let resources: Box<dyn ResourceLoader> = match resource_dir_from_env() {
        Some(dir) => {
            tracing::debug!(?dir, "loading stylesheets from directory");
            Box::new(DirectoryResources::new(dir))
        }
        None => Box::new(BundledResources),
    };

    let css = theme.stylesheet(&*resources)?.render()?;
    tracing::info!(theme = %theme.name(), bytes = css.len(), "rendered stylesheet");
    Ok(css)
}

/// Entrypoint used by the CLI binding.
pub fn run(theme: Option<&str>) -> AppResult<String> {
    logging::init();
    let theme = theme.map(str::parse::<ThemeName>).transpose()?;
    render_stylesheet(theme)
}
