//! Blocks view: recent blocks from the backend, newest first.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use crate::gui::app::GuiApp;
use crate::gui::helpers::{format_timestamp, short_hash};

impl GuiApp {
    pub(crate) fn view_blocks(&mut self, ui: &mut egui::Ui) {
        self.render_section_header(ui, "[B]", "BLOCKS");
        ui.add_space(self.theme.spacing_md);

        // First visit loads automatically, like the other listings
        if self.blocks_view.result.is_none()
            && self.blocks_view.job.is_none()
            && self.blocks_view.error.is_none()
            && self.client.is_some()
        {
            self.refresh_blocks();
        }

        let theme = self.theme;
        theme.frame_panel().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recent Blocks").size(16.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let running = self.blocks_view.job.as_ref().map(|j| j.is_running()).unwrap_or(false);
                    if running {
                        ui.spinner();
                    } else if ui.add(theme.button_secondary("Refresh")).clicked() {
                        self.refresh_blocks();
                    }
                });
            });
            ui.add_space(theme.spacing_sm);

            if let Some(error) = &self.blocks_view.error {
                ui.label(RichText::new(error).color(theme.error));
            }

            match &self.blocks_view.result {
                Some(Value::Array(blocks)) if !blocks.is_empty() => {
                    render_blocks_table(ui, &theme, blocks);
                }
                Some(Value::Array(_)) => {
                    ui.label(RichText::new("No blocks returned.").color(theme.text_secondary));
                }
                Some(other) => {
                    // Unexpected shape: show it rather than guessing
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

fn render_blocks_table(ui: &mut egui::Ui, theme: &crate::gui::theme::AppTheme, blocks: &[Value]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(150.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Height", "Hash", "Time", "Txs", "Size", "Pool"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong().color(theme.text_secondary));
                });
            }
        })
        .body(|mut body| {
            for block in blocks {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        match block.get("height").and_then(Value::as_u64) {
                            Some(height) => ui.label(format!("#{}", height)),
                            None => ui.label("?"),
                        };
                    });
                    row.col(|ui| {
                        if let Some(hash) = block.get("hash").and_then(Value::as_str) {
                            ui.monospace(RichText::new(short_hash(hash)).color(theme.accent_cyan));
                        }
                    });
                    row.col(|ui| {
                        if let Some(ts) = block.get("timestamp").and_then(Value::as_i64) {
                            ui.label(format_timestamp(ts));
                        }
                    });
                    row.col(|ui| {
                        let count = block
                            .get("tx")
                            .and_then(Value::as_array)
                            .map(|txs| txs.len())
                            .unwrap_or(0);
                        ui.label(count.to_string());
                    });
                    row.col(|ui| {
                        if let Some(size) = block.get("size").and_then(Value::as_u64) {
                            ui.label(format!("{} B", size));
                        }
                    });
                    row.col(|ui| {
                        match block.get("pool").and_then(Value::as_str) {
                            Some(pool) => ui.label(pool),
                            None => ui.label(RichText::new("—").color(theme.text_secondary)),
                        };
                    });
                });
            }
        });
}
