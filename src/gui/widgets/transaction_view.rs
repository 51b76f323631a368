//! Transaction display widget.
//!
//! Transactions arrive as opaque backend JSON; this widget extracts the
//! common fields best-effort for a readable card and keeps the raw payload
//! reachable in a collapsible section. Unexpected shapes degrade to the
//! raw view instead of failing.

use eframe::egui::{self, RichText};
use serde_json::Value;

use crate::gui::helpers::{confirmations_text, format_coin, format_timestamp, short_hash};
use crate::gui::theme::AppTheme;

/// Best-effort projection of a backend transaction payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxSummary {
    pub txid: Option<String>,
    pub block_hash: Option<String>,
    pub block_height: Option<i64>,
    pub confirmations: Option<i64>,
    pub timestamp: Option<i64>,
    pub value_out: Option<f64>,
    pub is_coinbase: bool,
    pub addresses_in: Vec<String>,
    pub addresses_out: Vec<String>,
}

impl TxSummary {
    /// Extract display fields from a transaction payload. Every field is
    /// optional; anything missing or oddly shaped is simply skipped.
    pub fn from_value(tx: &Value) -> Self {
        Self {
            txid: tx.get("txid").and_then(Value::as_str).map(str::to_string),
            block_hash: tx.get("blockhash").and_then(Value::as_str).map(str::to_string),
            block_height: tx.get("blockheight").and_then(Value::as_i64),
            confirmations: tx.get("confirmations").and_then(Value::as_i64),
            timestamp: tx.get("timestamp").and_then(Value::as_i64),
            value_out: tx.get("valueOut").and_then(Value::as_f64),
            is_coinbase: tx.get("isCoinBase").and_then(Value::as_bool).unwrap_or(false),
            addresses_in: address_list(tx.get("addresses_in")),
            addresses_out: address_list(tx.get("addresses_out")),
        }
    }
}

/// Addresses show up either as an object keyed by address or as a plain
/// array, depending on the endpoint.
fn address_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Renders one transaction payload as a card.
pub struct TransactionView;

impl TransactionView {
    /// Full card with field grid and raw payload section.
    pub fn show(ui: &mut egui::Ui, theme: &AppTheme, ticker: &str, tx: &Value) {
        let summary = TxSummary::from_value(tx);

        theme.frame_panel().show(ui, |ui| {
            if let Some(txid) = &summary.txid {
                ui.horizontal(|ui| {
                    ui.monospace(RichText::new(txid).color(theme.accent_cyan));
                    if summary.is_coinbase {
                        ui.label(RichText::new("[coinbase]").color(theme.accent_amber).small());
                    }
                });
                ui.add_space(theme.spacing_xs);
            }

            egui::Grid::new(grid_id(&summary))
                .num_columns(2)
                .spacing([theme.spacing_md, theme.spacing_xs])
                .show(ui, |ui| {
                    if let Some(height) = summary.block_height {
                        ui.label(RichText::new("Block:").color(theme.text_secondary));
                        ui.label(format!("#{}", height));
                        ui.end_row();
                    }
                    if let Some(hash) = &summary.block_hash {
                        ui.label(RichText::new("Block hash:").color(theme.text_secondary));
                        ui.monospace(short_hash(hash));
                        ui.end_row();
                    }
                    if let Some(ts) = summary.timestamp {
                        ui.label(RichText::new("Time:").color(theme.text_secondary));
                        ui.label(format_timestamp(ts));
                        ui.end_row();
                    }
                    if let Some(confirmations) = summary.confirmations {
                        ui.label(RichText::new("Status:").color(theme.text_secondary));
                        let color = if confirmations > 0 { theme.success } else { theme.warning };
                        ui.label(RichText::new(confirmations_text(confirmations)).color(color));
                        ui.end_row();
                    }
                    if let Some(value) = summary.value_out {
                        ui.label(RichText::new("Value out:").color(theme.text_secondary));
                        ui.label(RichText::new(format_coin(value, ticker)).strong());
                        ui.end_row();
                    }
                    if !summary.addresses_in.is_empty() {
                        ui.label(RichText::new("From:").color(theme.text_secondary));
                        ui.vertical(|ui| {
                            for addr in &summary.addresses_in {
                                ui.monospace(addr);
                            }
                        });
                        ui.end_row();
                    }
                    if !summary.addresses_out.is_empty() {
                        ui.label(RichText::new("To:").color(theme.text_secondary));
                        ui.vertical(|ui| {
                            for addr in &summary.addresses_out {
                                ui.monospace(addr);
                            }
                        });
                        ui.end_row();
                    }
                });

            ui.add_space(theme.spacing_sm);
            egui::CollapsingHeader::new(RichText::new("Raw JSON").color(theme.text_secondary))
                .id_source(("raw", grid_id(&summary)))
                .show(ui, |ui| {
                    let pretty = serde_json::to_string_pretty(tx)
                        .unwrap_or_else(|_| tx.to_string());
                    ui.monospace(pretty);
                });
        });
    }

    /// Compact single-line row for transaction listings.
    pub fn show_row(ui: &mut egui::Ui, theme: &AppTheme, ticker: &str, tx: &Value) {
        let summary = TxSummary::from_value(tx);
        ui.horizontal(|ui| {
            match &summary.txid {
                Some(txid) => ui.monospace(RichText::new(short_hash(txid)).color(theme.accent_cyan)),
                None => ui.monospace(RichText::new("<no txid>").color(theme.warning)),
            };
            if let Some(ts) = summary.timestamp {
                ui.label(RichText::new(format_timestamp(ts)).color(theme.text_secondary).small());
            }
            if let Some(value) = summary.value_out {
                ui.label(format_coin(value, ticker));
            }
            if let Some(confirmations) = summary.confirmations {
                let color = if confirmations > 0 { theme.success } else { theme.warning };
                ui.label(RichText::new(confirmations_text(confirmations)).color(color).small());
            }
        });
    }
}

fn grid_id(summary: &TxSummary) -> String {
    format!("tx_{}", summary.txid.as_deref().unwrap_or("unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_extracts_backend_fields() {
        let tx = json!({
            "txid": "aa11",
            "blockhash": "0000000000000aa3",
            "blockheight": 421000,
            "timestamp": 1700000000,
            "confirmations": 12,
            "isCoinBase": false,
            "valueOut": 50.0,
            "addresses_in": {"TUXsender": 50.0},
            "addresses_out": {"TUXreceiver": 49.9, "TUXchange": 0.1}
        });

        let summary = TxSummary::from_value(&tx);

        assert_eq!(summary.txid.as_deref(), Some("aa11"));
        assert_eq!(summary.block_height, Some(421000));
        assert_eq!(summary.confirmations, Some(12));
        assert_eq!(summary.value_out, Some(50.0));
        assert!(!summary.is_coinbase);
        assert_eq!(summary.addresses_in, vec!["TUXsender".to_string()]);
        assert_eq!(summary.addresses_out.len(), 2);
    }

    #[test]
    fn test_summary_tolerates_unexpected_shape() {
        let summary = TxSummary::from_value(&json!([1, 2, 3]));
        assert_eq!(summary, TxSummary::default());
    }

    #[test]
    fn test_summary_accepts_address_arrays() {
        let tx = json!({
            "txid": "bb22",
            "addresses_out": ["TUXone", "TUXtwo"]
        });
        let summary = TxSummary::from_value(&tx);
        assert_eq!(summary.addresses_out, vec!["TUXone".to_string(), "TUXtwo".to_string()]);
    }

    #[test]
    fn test_summary_coinbase_flag() {
        let tx = json!({"txid": "cc33", "isCoinBase": true});
        assert!(TxSummary::from_value(&tx).is_coinbase);
    }
}
