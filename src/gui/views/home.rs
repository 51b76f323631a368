//! Home view: live chain status plus transaction and address lookup.

use eframe::egui::{self, RichText};
use serde_json::Value;

use crate::gui::app::GuiApp;
use crate::gui::helpers::short_hash;
use crate::gui::notifications::NotificationEntry;
use crate::gui::widgets::TransactionView;

impl GuiApp {
    pub(crate) fn view_home(&mut self, ui: &mut egui::Ui) {
        self.render_section_header(ui, "[H]", "HOME");
        ui.add_space(self.theme.spacing_md);

        self.render_status_panel(ui);
        ui.add_space(self.theme.spacing_lg);

        self.render_tx_lookup_panel(ui);
        ui.add_space(self.theme.spacing_lg);

        self.render_address_panel(ui);
        ui.add_space(self.theme.spacing_lg);

        self.render_about_panel(ui);
    }

    /// Section header shared by all screens
    pub(crate) fn render_section_header(&self, ui: &mut egui::Ui, icon: &str, title: &str) {
        ui.label(
            RichText::new(format!("{} {}", icon, title))
                .size(22.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.label(RichText::new("─".repeat(48)).size(12.0).color(self.theme.secondary));
    }

    fn render_status_panel(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        theme.frame_highlight().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Chain Status").size(16.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme.button_secondary("Refresh")).clicked() {
                        if let Some(feed) = &self.status_feed {
                            feed.refresh_now();
                        }
                    }
                });
            });
            ui.add_space(theme.spacing_sm);

            match &self.status {
                Some(snapshot) => {
                    egui::Grid::new("status_grid")
                        .num_columns(2)
                        .spacing([theme.spacing_md, theme.spacing_xs])
                        .show(ui, |ui| {
                            ui.label(RichText::new("Height:").color(theme.text_secondary));
                            match snapshot.block_height() {
                                Some(height) => {
                                    ui.label(RichText::new(format!("#{}", height)).strong().color(theme.success))
                                }
                                None => ui.label(RichText::new("?").color(theme.warning)),
                            };
                            ui.end_row();

                            if let Some(hash) = snapshot.best_block_hash() {
                                ui.label(RichText::new("Best block:").color(theme.text_secondary));
                                ui.monospace(short_hash(hash));
                                ui.end_row();
                            }
                            if let Some(difficulty) = snapshot.difficulty() {
                                ui.label(RichText::new("Difficulty:").color(theme.text_secondary));
                                ui.label(format!("{:.4}", difficulty));
                                ui.end_row();
                            }
                            if let Some(mempool) = snapshot.mempool_txs() {
                                ui.label(RichText::new("Mempool:").color(theme.text_secondary));
                                ui.label(format!("{} txs", mempool));
                                ui.end_row();
                            }

                            ui.label(RichText::new("Updated:").color(theme.text_secondary));
                            ui.label(
                                RichText::new(snapshot.received_at().format("%H:%M:%S").to_string())
                                    .color(theme.text_secondary),
                            );
                            ui.end_row();
                        });
                }
                None => {
                    let message = match &self.client_error {
                        Some(error) => format!("Backend unavailable: {}", error),
                        None => "Waiting for first status update…".to_string(),
                    };
                    let color = if self.client_error.is_some() {
                        theme.error
                    } else {
                        theme.text_secondary
                    };
                    ui.label(RichText::new(message).color(color));
                }
            }
        });
    }

    fn render_tx_lookup_panel(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("Transaction Lookup").size(16.0).strong());
            ui.add_space(theme.spacing_sm);

            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.tx_lookup.txid_input)
                        .hint_text("transaction id")
                        .font(egui::TextStyle::Monospace)
                        .desired_width(440.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                let running = self.tx_lookup.job.as_ref().map(|j| j.is_running()).unwrap_or(false);
                if running {
                    ui.spinner();
                } else if ui.add(theme.button_primary("Look up")).clicked() {
                    submitted = true;
                }
            });
            if submitted {
                self.start_tx_lookup();
            }

            if let Some(error) = &self.tx_lookup.error {
                ui.add_space(theme.spacing_xs);
                ui.label(RichText::new(error).color(theme.error));
            }
            if let Some(tx) = &self.tx_lookup.result {
                ui.add_space(theme.spacing_sm);
                TransactionView::show(ui, &theme, &self.config.coin_ticker, tx);
            }
        });
    }

    fn render_address_panel(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("Address Transactions").size(16.0).strong());
            ui.add_space(theme.spacing_sm);

            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.address_txs.address_input)
                        .hint_text("address")
                        .font(egui::TextStyle::Monospace)
                        .desired_width(440.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                let running = self.address_txs.job.as_ref().map(|j| j.is_running()).unwrap_or(false);
                if running {
                    ui.spinner();
                } else if ui.add(theme.button_primary("Look up")).clicked() {
                    submitted = true;
                }
            });
            if submitted {
                self.start_address_lookup();
            }

            if let Some(error) = &self.address_txs.error {
                ui.add_space(theme.spacing_xs);
                ui.label(RichText::new(error).color(theme.error));
            }
            if let Some(page) = &self.address_txs.result {
                ui.add_space(theme.spacing_sm);
                render_tx_page(ui, &theme, &self.config.coin_ticker, page);
            }
        });
    }

    fn render_about_panel(&mut self, ui: &mut egui::Ui) {
        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.label(RichText::new("About Chainview").size(16.0).strong());
            ui.add_space(theme.spacing_sm);

            egui::Grid::new("about_grid")
                .num_columns(2)
                .spacing([theme.spacing_md, theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label(RichText::new("Version:").color(theme.text_secondary));
                    ui.label(RichText::new(env!("CARGO_PKG_VERSION")).strong().color(theme.accent_cyan));
                    ui.end_row();

                    ui.label(RichText::new("Backend:").color(theme.text_secondary));
                    ui.monospace(RichText::new(&self.config.api_url).small());
                    ui.end_row();

                    ui.label(RichText::new("Settings file:").color(theme.text_secondary));
                    let settings_path = crate::user_settings::UserSettings::settings_path_display();
                    ui.label(RichText::new(settings_path).small().color(theme.text_secondary));
                    ui.end_row();
                });

            ui.add_space(theme.spacing_sm);
            ui.horizontal(|ui| {
                if ui
                    .link(RichText::new("📖 README").color(theme.accent_cyan))
                    .clicked()
                {
                    if let Err(e) = open::that("https://github.com/chainview/chainview#readme") {
                        self.notifications
                            .push_back(NotificationEntry::new(format!("Failed to open URL: {}", e)));
                    }
                }
                ui.separator();
                if ui
                    .link(RichText::new("🐛 Report Issue").color(theme.accent_cyan))
                    .clicked()
                {
                    if let Err(e) = open::that("https://github.com/chainview/chainview/issues") {
                        self.notifications
                            .push_back(NotificationEntry::new(format!("Failed to open URL: {}", e)));
                    }
                }
            });
        });
    }
}

/// Render a `/txs/{address}` page: count header plus one row per entry.
/// Anything that is not the expected page shape falls back to raw JSON.
fn render_tx_page(ui: &mut egui::Ui, theme: &crate::gui::theme::AppTheme, ticker: &str, page: &Value) {
    let txs = page.get("txs").and_then(Value::as_array);

    match txs {
        Some(txs) => {
            let count = page
                .get("count")
                .and_then(Value::as_u64)
                .unwrap_or(txs.len() as u64);
            ui.label(
                RichText::new(format!("{} transaction(s)", count)).color(theme.text_secondary),
            );
            ui.add_space(theme.spacing_xs);
            for tx in txs {
                TransactionView::show_row(ui, theme, ticker, tx);
            }
            if txs.is_empty() {
                ui.label(RichText::new("No transactions for this address.").color(theme.text_secondary));
            }
        }
        None => {
            let pretty = serde_json::to_string_pretty(page).unwrap_or_else(|_| page.to_string());
            ui.monospace(pretty);
        }
    }
}
