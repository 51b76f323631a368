//! Rich list view: top addresses held by the backend.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use crate::api::RichListOrder;
use crate::gui::app::GuiApp;
use crate::gui::helpers::format_coin;

impl GuiApp {
    pub(crate) fn view_rich_list(&mut self, ui: &mut egui::Ui) {
        self.render_section_header(ui, "[$]", "RICH LIST");
        ui.add_space(self.theme.spacing_md);

        if self.richlist_view.result.is_none()
            && self.richlist_view.job.is_none()
            && self.richlist_view.error.is_none()
            && self.client.is_some()
        {
            self.refresh_rich_list();
        }

        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Top Addresses").size(16.0).strong());

                ui.add_space(theme.spacing_md);
                let mut order = self.richlist_view.order;
                egui::ComboBox::from_id_source("richlist_order")
                    .selected_text(format!("by {}", order.query_value()))
                    .show_ui(ui, |ui| {
                        for candidate in [
                            RichListOrder::Balance,
                            RichListOrder::Sent,
                            RichListOrder::Received,
                        ] {
                            ui.selectable_value(&mut order, candidate, candidate.query_value());
                        }
                    });
                if order != self.richlist_view.order {
                    self.richlist_view.order = order;
                    self.richlist_view.result = None;
                    self.refresh_rich_list();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let running = self
                        .richlist_view
                        .job
                        .as_ref()
                        .map(|j| j.is_running())
                        .unwrap_or(false);
                    if running {
                        ui.spinner();
                    } else if ui.add(theme.button_secondary("Refresh")).clicked() {
                        self.refresh_rich_list();
                    }
                });
            });
            ui.add_space(theme.spacing_sm);

            if let Some(error) = &self.richlist_view.error {
                ui.label(RichText::new(error).color(theme.error));
            }

            let ticker = self.config.coin_ticker.clone();
            match &self.richlist_view.result {
                Some(Value::Array(entries)) if !entries.is_empty() => {
                    render_rich_list_table(ui, &theme, &ticker, entries);
                }
                Some(Value::Array(_)) => {
                    ui.label(RichText::new("No addresses returned.").color(theme.text_secondary));
                }
                Some(other) => {
                    let pretty =
                        serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string());
                    ui.monospace(pretty);
                }
                None => {
                    if self.client.is_none() {
                        ui.label(RichText::new("Backend not configured.").color(theme.warning));
                    }
                }
            }
        });
    }
}

fn render_rich_list_table(
    ui: &mut egui::Ui,
    theme: &crate::gui::theme::AppTheme,
    ticker: &str,
    entries: &[Value],
) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(36.0))
        .column(Column::auto().at_least(280.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["#", "Address", "Balance", "Received", "Sent"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong().color(theme.text_secondary));
                });
            }
        })
        .body(|mut body| {
            for (rank, entry) in entries.iter().enumerate() {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", rank + 1));
                    });
                    row.col(|ui| {
                        match entry.get("address").and_then(Value::as_str) {
                            Some(address) => ui.monospace(RichText::new(address).color(theme.accent_cyan)),
                            None => ui.label(RichText::new("?").color(theme.warning)),
                        };
                    });
                    for field in ["balance", "received", "sent"] {
                        row.col(|ui| {
                            if let Some(amount) = entry.get(field).and_then(Value::as_f64) {
                                ui.label(format_coin(amount, ticker));
                            }
                        });
                    }
                });
            }
        });
}
