//! Centralized theme and styling for the GUI.

use eframe::egui;

/// Theme: palette, spacing, and styled widget factories.
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,

    // Accent colors
    pub accent_cyan: egui::Color32,
    pub accent_amber: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Deep-water palette: dark slate with cyan highlights
            background: egui::Color32::from_rgb(10, 13, 18),
            surface: egui::Color32::from_rgb(17, 22, 30),
            surface_hover: egui::Color32::from_rgb(26, 33, 44),
            surface_active: egui::Color32::from_rgb(34, 43, 58),
            panel_fill: egui::Color32::from_rgb(14, 18, 25),
            text_primary: egui::Color32::from_rgb(214, 225, 237),
            text_secondary: egui::Color32::from_rgb(130, 144, 161),

            primary: egui::Color32::from_rgb(64, 186, 232),
            secondary: egui::Color32::from_rgb(60, 72, 88),
            success: egui::Color32::from_rgb(92, 203, 140),
            warning: egui::Color32::from_rgb(240, 179, 76),
            error: egui::Color32::from_rgb(235, 101, 101),

            accent_cyan: egui::Color32::from_rgb(64, 186, 232),
            accent_amber: egui::Color32::from_rgb(240, 179, 76),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,

            button_small: egui::vec2(90.0, 26.0),
            button_medium: egui::vec2(130.0, 34.0),
        }
    }
}

impl AppTheme {
    /// Primary action button
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary).strong())
            .fill(self.surface)
            .stroke(egui::Stroke::new(2.0, self.primary))
            .min_size(self.button_medium)
    }

    /// Secondary action button (outlined)
    pub fn button_secondary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface)
            .stroke(egui::Stroke::new(1.0, self.secondary))
            .min_size(self.button_small)
    }

    /// Frame for panels/cards
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(4.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.secondary))
    }

    /// Frame for emphasized panels (live status, errors)
    pub fn frame_highlight(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(4.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.5, self.primary))
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    // Monospace for hashes and amounts, proportional elsewhere
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(20.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(13.0, egui::FontFamily::Monospace),
    );

    ctx.set_style(style);
}
