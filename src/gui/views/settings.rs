//! Settings view: backend selection and refresh configuration.

use eframe::egui::{self, RichText};

use crate::config::COINS;
use crate::gui::app::GuiApp;

impl GuiApp {
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        self.render_section_header(ui, "[*]", "SETTINGS");
        ui.add_space(self.theme.spacing_md);

        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("Backend").size(16.0).strong());
            ui.add_space(theme.spacing_sm);

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([theme.spacing_md, theme.spacing_sm])
                .show(ui, |ui| {
                    ui.label(RichText::new("Coin:").color(theme.text_secondary));
                    let mut coin_index = self.settings_form.coin_index;
                    egui::ComboBox::from_id_source("coin_preset")
                        .selected_text(format!(
                            "{} ({})",
                            COINS[coin_index.min(COINS.len() - 1)].label,
                            COINS[coin_index.min(COINS.len() - 1)].ticker
                        ))
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for (idx, coin) in COINS.iter().enumerate() {
                                ui.selectable_value(
                                    &mut coin_index,
                                    idx,
                                    format!("{} ({})", coin.label, coin.ticker),
                                );
                            }
                        });
                    if coin_index != self.settings_form.coin_index {
                        self.settings_form.coin_index = coin_index;
                        // Prefill with the saved override for that coin, or
                        // its preset endpoint
                        let coin = &COINS[coin_index];
                        self.settings_form.api_url = self
                            .user_settings
                            .get_api_url_override(coin.ticker)
                            .cloned()
                            .unwrap_or_else(|| coin.default_api_url.to_string());
                    }
                    ui.end_row();

                    ui.label(RichText::new("API URL:").color(theme.text_secondary));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.settings_form.api_url)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(360.0),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Status refresh (s):").color(theme.text_secondary));
                    ui.add(
                        egui::TextEdit::singleline(&mut self.settings_form.refresh_secs)
                            .desired_width(80.0),
                    );
                    ui.end_row();
                });

            if let Some(error) = &self.settings_form.error {
                ui.add_space(theme.spacing_xs);
                ui.label(RichText::new(error).color(theme.error));
            }

            ui.add_space(theme.spacing_md);
            ui.horizontal(|ui| {
                if ui.add(theme.button_primary("Apply & Save")).clicked() {
                    self.apply_settings();
                }
                if ui.add(theme.button_secondary("Reset")).clicked() {
                    self.settings_form.coin_index =
                        crate::config::find_coin_index(&self.config.coin_ticker).unwrap_or(0);
                    self.settings_form.api_url = self.config.api_url.clone();
                    self.settings_form.refresh_secs = self.config.status_refresh_secs.to_string();
                    self.settings_form.error = None;
                }
            });

            ui.add_space(theme.spacing_sm);
            ui.label(
                RichText::new(format!(
                    "Saved to {}",
                    crate::user_settings::UserSettings::settings_path_display()
                ))
                .small()
                .color(theme.text_secondary),
            );
        });
    }
}
