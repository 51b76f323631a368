//! Main GUI application module
//!
//! Contains the GuiApp struct, view states, and the eframe update loop.

use crate::{
    api::{ExplorerClient, RichListOrder},
    config::Config,
    status::{StatusFeed, StatusSnapshot},
    user_settings::UserSettings,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use tokio::runtime::Builder;

use super::async_job::JobHandle;
use super::notifications::NotificationEntry;
use super::theme::{configure_style, AppTheme};

/// GUI section enum for navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiSection {
    Home,
    Blocks,
    RichList,
    Settings,
}

/// Transaction-by-id lookup state (Home)
#[derive(Default)]
pub(crate) struct TxLookupState {
    pub(crate) txid_input: String,
    pub(crate) result: Option<Value>,
    pub(crate) error: Option<String>,
    pub(crate) job: Option<JobHandle<Value>>,
}

/// Transactions-by-address lookup state (Home)
#[derive(Default)]
pub(crate) struct AddressTxsState {
    pub(crate) address_input: String,
    pub(crate) result: Option<Value>,
    pub(crate) error: Option<String>,
    pub(crate) job: Option<JobHandle<Value>>,
}

#[derive(Default)]
pub(crate) struct BlocksViewState {
    pub(crate) result: Option<Value>,
    pub(crate) error: Option<String>,
    pub(crate) job: Option<JobHandle<Value>>,
}

pub(crate) struct RichListViewState {
    pub(crate) order: RichListOrder,
    pub(crate) result: Option<Value>,
    pub(crate) error: Option<String>,
    pub(crate) job: Option<JobHandle<Value>>,
}

impl Default for RichListViewState {
    fn default() -> Self {
        Self {
            order: RichListOrder::default(),
            result: None,
            error: None,
            job: None,
        }
    }
}

/// Editing state for the Settings screen
pub(crate) struct SettingsFormState {
    pub(crate) coin_index: usize,
    pub(crate) api_url: String,
    pub(crate) refresh_secs: String,
    pub(crate) error: Option<String>,
}

pub struct GuiApp {
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) section: GuiSection,
    pub(crate) previous_section: GuiSection,
    pub(crate) notifications: VecDeque<NotificationEntry>,
    pub(crate) show_notifications_popup: bool,
    // Backend access
    pub(crate) client: Option<ExplorerClient>,
    pub(crate) client_error: Option<String>,
    pub(crate) status_feed: Option<StatusFeed>,
    /// Most recently received status snapshot; replaced wholesale on each
    /// feed emission, kept as-is when a refresh fails.
    pub(crate) status: Option<StatusSnapshot>,
    // View states
    pub(crate) tx_lookup: TxLookupState,
    pub(crate) address_txs: AddressTxsState,
    pub(crate) blocks_view: BlocksViewState,
    pub(crate) richlist_view: RichListViewState,
    pub(crate) settings_form: SettingsFormState,
}

impl GuiApp {
    fn new(config: Config, ctx: &egui::Context) -> Self {
        let user_settings = UserSettings::load();
        Self::from_parts(config, user_settings, ctx)
    }

    pub(crate) fn from_parts(
        mut config: Config,
        user_settings: UserSettings,
        ctx: &egui::Context,
    ) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        user_settings.apply_to(&mut config);

        let settings_form = SettingsFormState {
            coin_index: crate::config::find_coin_index(&config.coin_ticker).unwrap_or(0),
            api_url: config.api_url.clone(),
            refresh_secs: config.status_refresh_secs.to_string(),
            error: None,
        };

        let mut app = Self {
            config,
            user_settings,
            theme,
            section: GuiSection::Home,
            previous_section: GuiSection::Home,
            notifications: VecDeque::with_capacity(20),
            show_notifications_popup: false,
            client: None,
            client_error: None,
            status_feed: None,
            status: None,
            tx_lookup: TxLookupState::default(),
            address_txs: AddressTxsState::default(),
            blocks_view: BlocksViewState::default(),
            richlist_view: RichListViewState::default(),
            settings_form,
        };
        app.connect_backend();
        app
    }

    /// Build the API client and (re)start the status subscription against
    /// the current config. Called at startup and after settings changes.
    pub(crate) fn connect_backend(&mut self) {
        // Dropping the old feed closes its command channel and stops its worker
        self.status_feed = None;
        self.status = None;

        match ExplorerClient::new(&self.config) {
            Ok(client) => {
                let feed = StatusFeed::spawn(client.clone(), self.config.status_refresh_interval());
                // Ask for the first snapshot right away; the subscription
                // remains the only source of displayed values
                feed.refresh_now();
                self.status_feed = Some(feed);
                self.client = Some(client);
                self.client_error = None;
            }
            Err(e) => {
                self.client = None;
                self.client_error = Some(e.to_string());
                self.notifications
                    .push_back(NotificationEntry::new(format!("Backend unavailable: {}", e)));
            }
        }
    }

    // ==================== navigation ====================

    pub fn go_home(&mut self) {
        self.navigate(GuiSection::Home);
    }

    pub fn go_blocks(&mut self) {
        self.navigate(GuiSection::Blocks);
    }

    pub fn go_rich_list(&mut self) {
        self.navigate(GuiSection::RichList);
    }

    pub fn go_settings(&mut self) {
        self.navigate(GuiSection::Settings);
    }

    fn navigate(&mut self, section: GuiSection) {
        self.previous_section = self.section;
        self.section = section;
    }

    // ==================== background jobs ====================

    pub(crate) fn spawn_job<T, FutBuilder, Fut>(&self, builder: FutBuilder) -> JobHandle<T>
    where
        T: Send + 'static,
        FutBuilder: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<T>> + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(builder()),
                Err(e) => Err(anyhow!("Failed to create async runtime: {}", e)),
            };
            let _ = tx.send(result);
        });
        JobHandle::new(rx)
    }

    pub(crate) fn start_tx_lookup(&mut self) {
        let txid = self.tx_lookup.txid_input.trim().to_string();
        if txid.is_empty() {
            self.tx_lookup.error = Some("Enter a transaction id".to_string());
            return;
        }
        let Some(client) = self.client.clone() else {
            self.tx_lookup.error = Some("Backend not configured".to_string());
            return;
        };
        self.tx_lookup.result = None;
        self.tx_lookup.error = None;
        let job = self.spawn_job(move || async move {
            client.get_transaction(&txid).await.map_err(Into::into)
        });
        self.tx_lookup.job = Some(job);
    }

    pub(crate) fn start_address_lookup(&mut self) {
        let address = self.address_txs.address_input.trim().to_string();
        if address.is_empty() {
            self.address_txs.error = Some("Enter an address".to_string());
            return;
        }
        let Some(client) = self.client.clone() else {
            self.address_txs.error = Some("Backend not configured".to_string());
            return;
        };
        self.address_txs.result = None;
        self.address_txs.error = None;
        let job = self.spawn_job(move || async move {
            client.get_transactions(&address).await.map_err(Into::into)
        });
        self.address_txs.job = Some(job);
    }

    pub(crate) fn refresh_blocks(&mut self) {
        let Some(client) = self.client.clone() else {
            self.blocks_view.error = Some("Backend not configured".to_string());
            return;
        };
        self.blocks_view.error = None;
        let job = self.spawn_job(move || async move {
            client.get_blocks(None, 25).await.map_err(Into::into)
        });
        self.blocks_view.job = Some(job);
    }

    pub(crate) fn refresh_rich_list(&mut self) {
        let Some(client) = self.client.clone() else {
            self.richlist_view.error = Some("Backend not configured".to_string());
            return;
        };
        let order = self.richlist_view.order;
        self.richlist_view.error = None;
        let job = self.spawn_job(move || async move {
            client.get_rich_list(order).await.map_err(Into::into)
        });
        self.richlist_view.job = Some(job);
    }

    fn poll_jobs(&mut self) {
        // Drain the status subscription; the newest emission replaces the
        // held snapshot, a silent feed leaves it untouched
        if let Some(feed) = &self.status_feed {
            if let Some(snapshot) = feed.try_latest() {
                self.status = Some(snapshot);
            }
        }

        Self::poll_value_job(
            &mut self.tx_lookup.job,
            &mut self.tx_lookup.result,
            &mut self.tx_lookup.error,
            &mut self.notifications,
            "Transaction lookup",
        );
        Self::poll_value_job(
            &mut self.address_txs.job,
            &mut self.address_txs.result,
            &mut self.address_txs.error,
            &mut self.notifications,
            "Address lookup",
        );
        Self::poll_value_job(
            &mut self.blocks_view.job,
            &mut self.blocks_view.result,
            &mut self.blocks_view.error,
            &mut self.notifications,
            "Block listing",
        );
        Self::poll_value_job(
            &mut self.richlist_view.job,
            &mut self.richlist_view.result,
            &mut self.richlist_view.error,
            &mut self.notifications,
            "Rich list",
        );
    }

    fn poll_value_job(
        job_slot: &mut Option<JobHandle<Value>>,
        result: &mut Option<Value>,
        error: &mut Option<String>,
        notifications: &mut VecDeque<NotificationEntry>,
        what: &str,
    ) {
        if let Some(job) = job_slot {
            if let Some(res) = job.poll() {
                match res {
                    Ok(value) => {
                        *result = Some(value);
                        *error = None;
                    }
                    Err(e) => {
                        *error = Some(e.to_string());
                        notifications.push_back(NotificationEntry::new(format!("{} failed: {}", what, e)));
                    }
                }
                *job_slot = None;
            }
        }
    }

    // ==================== settings ====================

    /// Validate the settings form, persist it, and reconnect the backend.
    pub(crate) fn apply_settings(&mut self) {
        let refresh_secs: u64 = match self.settings_form.refresh_secs.trim().parse() {
            Ok(v) if v > 0 => v,
            _ => {
                self.settings_form.error = Some("Refresh interval must be a positive number of seconds".to_string());
                return;
            }
        };
        let coin = &crate::config::COINS[self.settings_form.coin_index.min(crate::config::COINS.len() - 1)];
        let api_url = self.settings_form.api_url.trim().to_string();
        if api_url.is_empty() {
            self.settings_form.error = Some("API URL cannot be empty".to_string());
            return;
        }
        self.settings_form.error = None;

        self.user_settings.coin_ticker = coin.ticker.to_string();
        if api_url == coin.default_api_url {
            self.user_settings.set_api_url_override(coin.ticker, String::new());
        } else {
            self.user_settings.set_api_url_override(coin.ticker, api_url.clone());
        }
        self.user_settings.status_refresh_secs = refresh_secs;
        if let Err(e) = self.user_settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
            self.notifications
                .push_back(NotificationEntry::new(format!("Failed to save settings: {}", e)));
        }

        self.config.coin_ticker = coin.ticker.to_string();
        self.config.api_url = api_url;
        self.config.status_refresh_secs = refresh_secs;

        // Stale lookups belong to the old backend
        self.tx_lookup = TxLookupState::default();
        self.address_txs = AddressTxsState::default();
        self.blocks_view = BlocksViewState::default();
        self.richlist_view = RichListViewState::default();

        self.connect_backend();
        self.notifications.push_back(NotificationEntry::new(format!(
            "Switched to {} at {}",
            self.config.coin_label(),
            self.config.api_url
        )));
    }

    // ==================== chrome ====================

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(RichText::new("⛓ CHAINVIEW").size(22.0).color(self.theme.primary));
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(11.0)
                        .color(self.theme.text_secondary),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Notification tray toggle
                    let count = self.notifications.len();
                    let tray_label = if count > 0 {
                        format!("[!] {}", count)
                    } else {
                        "[!]".to_string()
                    };
                    let tray_color = if count > 0 {
                        self.theme.accent_amber
                    } else {
                        self.theme.text_secondary
                    };
                    if ui
                        .add(
                            egui::Button::new(RichText::new(tray_label).color(tray_color))
                                .fill(egui::Color32::TRANSPARENT)
                                .stroke(egui::Stroke::NONE),
                        )
                        .on_hover_text("Notification history")
                        .clicked()
                    {
                        self.show_notifications_popup = !self.show_notifications_popup;
                    }

                    ui.add_space(self.theme.spacing_sm);

                    // Live chain status chip
                    match &self.status {
                        Some(snapshot) => {
                            let height = snapshot
                                .block_height()
                                .map(|h| format!("#{}", h))
                                .unwrap_or_else(|| "#?".to_string());
                            ui.label(RichText::new(height).color(self.theme.success).monospace());
                            ui.label(RichText::new("●").color(self.theme.success).small());
                        }
                        None => {
                            ui.label(RichText::new("connecting").color(self.theme.text_secondary).small());
                            ui.label(RichText::new("●").color(self.theme.warning).small());
                        }
                    }

                    ui.add_space(self.theme.spacing_sm);
                    ui.label(
                        RichText::new(format!("{} ({})", self.config.coin_label(), self.config.coin_ticker))
                            .color(self.theme.text_secondary),
                    );
                });
            });
            ui.add_space(8.0);
        });
    }

    fn render_notifications_popup(&mut self, ctx: &egui::Context) {
        if !self.show_notifications_popup {
            return;
        }
        egui::Window::new("[#] Notifications")
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 50.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{} entries", self.notifications.len()))
                            .color(self.theme.text_secondary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(self.theme.button_secondary("Close")).clicked() {
                            self.show_notifications_popup = false;
                        }
                        if ui.add(self.theme.button_secondary("Clear")).clicked() {
                            self.notifications.clear();
                        }
                    });
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(280.0)
                    .show(ui, |ui| {
                        if self.notifications.is_empty() {
                            ui.label(RichText::new("No notifications yet.").color(self.theme.text_secondary));
                        } else {
                            for entry in self.notifications.iter().rev() {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(format!("[{}]", entry.time_ago()))
                                            .size(11.0)
                                            .color(self.theme.text_secondary),
                                    );
                                    ui.label(RichText::new(&entry.message).size(12.0));
                                });
                                ui.add_space(2.0);
                            }
                        }
                    });
            });
    }

    fn render_nav(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(160.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.surface)
                    .stroke(egui::Stroke::new(1.0, self.theme.secondary)),
            )
            .show(ctx, |ui| {
                ui.add_space(self.theme.spacing_md);

                let nav_items = [
                    (GuiSection::Home, "[H] Home"),
                    (GuiSection::Blocks, "[B] Blocks"),
                    (GuiSection::RichList, "[$] Rich List"),
                    (GuiSection::Settings, "[*] Settings"),
                ];

                let mut clicked = None;
                for (section, label) in nav_items {
                    let selected = self.section == section;
                    ui.horizontal(|ui| {
                        if selected {
                            ui.add_space(2.0);
                            let (rect, _) =
                                ui.allocate_exact_size(egui::vec2(3.0, 20.0), egui::Sense::hover());
                            ui.painter().rect_filled(rect, 0.0, self.theme.primary);
                            ui.add_space(4.0);
                        } else {
                            ui.add_space(9.0);
                        }

                        let text_color = if selected {
                            self.theme.text_primary
                        } else {
                            self.theme.text_secondary
                        };
                        let response = ui.add(
                            egui::Button::new(RichText::new(label).size(13.0).color(text_color))
                                .fill(egui::Color32::TRANSPARENT)
                                .stroke(egui::Stroke::NONE)
                                .sense(egui::Sense::click()),
                        );
                        if response.clicked() {
                            clicked = Some(section);
                        }
                    });
                    ui.add_space(self.theme.spacing_xs);
                }

                match clicked {
                    Some(GuiSection::Home) => self.go_home(),
                    Some(GuiSection::Blocks) => self.go_blocks(),
                    Some(GuiSection::RichList) => self.go_rich_list(),
                    Some(GuiSection::Settings) => self.go_settings(),
                    None => {}
                }
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();

        self.render_top_bar(ctx);
        self.render_notifications_popup(ctx);
        self.render_nav(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(self.theme.spacing_md);
            egui::ScrollArea::vertical().show(ui, |ui| match self.section {
                GuiSection::Home => self.view_home(ui),
                GuiSection::Blocks => self.view_blocks(ui),
                GuiSection::RichList => self.view_rich_list(ui),
                GuiSection::Settings => self.view_settings(ui),
            });
        });

        // Keep polling jobs and the status feed while idle
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}

pub fn launch(config: Config) -> Result<()> {
    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(GuiApp::new(config.clone(), &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]);
    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("Chainview - Blockchain Explorer", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
