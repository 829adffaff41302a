//! Application theme and fonts.
//!
//! The theme is a small embedded YAML file applied to the egui style once at
//! startup. An unparsable theme degrades silently to the egui defaults, and
//! a UI font is only installed when the optional font file is actually
//! present next to the binary's assets.

use eframe::egui;
use serde::{Deserialize, Serialize};
use tracing::debug;

static THEME_YAML: &str = include_str!("../assets/theme.yml");

/// Visual parameters of the launcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub dark: bool,
    /// Accent color used for selections.
    pub accent: [u8; 3],
    /// Side/central panel background.
    pub panel_fill: Option<[u8; 3]>,
    pub body_size: f32,
    pub heading_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dark: true,
            accent: [255, 114, 0],
            panel_fill: None,
            body_size: 14.0,
            heading_size: 20.0,
        }
    }
}

impl Theme {
    /// The embedded theme, or the default when it does not parse.
    pub fn embedded() -> Self {
        serde_yaml::from_str(THEME_YAML).unwrap_or_default()
    }

    /// Apply this theme to the egui context. Called once at startup.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        let [r, g, b] = self.accent;
        visuals.selection.bg_fill = egui::Color32::from_rgb(r, g, b);
        visuals.hyperlink_color = egui::Color32::from_rgb(r, g, b);
        if let Some([r, g, b]) = self.panel_fill {
            visuals.panel_fill = egui::Color32::from_rgb(r, g, b);
        }
        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
            body.size = self.body_size;
        }
        if let Some(heading) = style.text_styles.get_mut(&egui::TextStyle::Heading) {
            heading.size = self.heading_size;
        }
        ctx.set_style(style);
    }
}

/// Install the UI fonts: the Phosphor icon font plus, when present, the
/// bundled proportional font from `assets/fonts/`.
pub fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    if let Some(bytes) = load_ui_font() {
        fonts
            .font_data
            .insert("bench-sans".to_owned(), egui::FontData::from_owned(bytes).into());
        if let Some(family) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
            family.insert(0, "bench-sans".to_owned());
        }
    }

    ctx.set_fonts(fonts);
}

/// Attempt to read the bundled UI font. Returns `None` when the file is not
/// shipped, in which case the egui default fonts are used.
fn load_ui_font() -> Option<Vec<u8>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/OpenSans-Regular.ttf");
    let bytes = std::fs::read(path).ok()?;
    debug!(path, "installed bundled UI font");
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_theme_parses() {
        let theme = Theme::embedded();
        assert!(theme.dark);
        assert_eq!(theme.accent, [255, 114, 0]);
    }

    #[test]
    fn garbage_yaml_falls_back_to_default() {
        let theme: Theme = serde_yaml::from_str("{{{not yaml").unwrap_or_default();
        assert_eq!(theme.body_size, Theme::default().body_size);
    }
}
