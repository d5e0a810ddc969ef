//! Theme customizer: colors, typography, dark mode and navigation.
//!
//! | key             | accepted values                      |
//! |-----------------|--------------------------------------|
//! | `primary_color` | `#RGB` or `#RRGGBB`                  |
//! | `accent_color`  | `#RGB` or `#RRGGBB`                  |
//! | `font_family`   | any non-blank string                 |
//! | `dark_mode`     | `true` / `false`                     |
//! | `navigation`    | `none`, `stack`, `tabs`, `drawer`    |
//!
//! Accepted settings are recorded as design tokens under the same key.
//! Colors are normalised to lowercase `#rrggbb`.

use mobiforge_core::{
    application::ports::DesignCustomizer,
    domain::{DesignConfig, DomainError, MobileApp, Navigation, StageFailure},
};
use tracing::debug;

pub const PRIMARY_COLOR: &str = "primary_color";
pub const ACCENT_COLOR: &str = "accent_color";
pub const FONT_FAMILY: &str = "font_family";
pub const DARK_MODE: &str = "dark_mode";
pub const NAVIGATION: &str = "navigation";

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeCustomizer;

impl ThemeCustomizer {
    pub fn new() -> Self {
        Self
    }
}

impl DesignCustomizer for ThemeCustomizer {
    fn apply(&self, app: MobileApp, design: &DesignConfig) -> Result<MobileApp, StageFailure> {
        design.iter().try_fold(app, |app, (key, value)| {
            debug!(key, value, "applying design setting");
            let app = match key {
                PRIMARY_COLOR | ACCENT_COLOR => {
                    app.with_design_token(key, normalize_color(key, value)?)
                }
                FONT_FAMILY => {
                    let font = value.trim();
                    if font.is_empty() {
                        return Err(invalid(key, "font family cannot be blank").into());
                    }
                    app.with_design_token(key, font)
                }
                DARK_MODE => {
                    let enabled: bool = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid(key, format!("expected true or false, got '{value}'")))?;
                    app.with_design_token(key, enabled.to_string())
                }
                NAVIGATION => {
                    let navigation: Navigation = value.parse()?;
                    app.with_navigation(navigation)
                        .with_design_token(key, navigation.as_str())
                }
                other => {
                    return Err(StageFailure::new(format!(
                        "unknown design setting '{other}'"
                    )));
                }
            };
            Ok(app)
        })
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidDesignValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Validate a hex color and expand it to lowercase `#rrggbb`.
pub fn normalize_color(key: &str, raw: &str) -> Result<String, DomainError> {
    let hex = raw
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| invalid(key, format!("'{raw}' must start with '#'")))?;

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(key, format!("'{raw}' is not a hex color")));
    }

    let hex = hex.to_ascii_lowercase();
    match hex.len() {
        6 => Ok(format!("#{hex}")),
        3 => Ok(hex.chars().fold(String::from("#"), |mut out, c| {
            out.push(c);
            out.push(c);
            out
        })),
        _ => Err(invalid(key, format!("'{raw}' must be #RGB or #RRGGBB"))),
    }
}
