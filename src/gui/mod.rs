//! GUI module for the Chainview application
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main GuiApp struct, view states, and core application logic
//! - `async_job` - Polling handles for background jobs
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `helpers` - Display formatting for amounts, hashes, and timestamps
//! - `notifications` - Notification tray entries
//! - `views` - View rendering functions (home, blocks, richlist, settings)
//! - `widgets` - Reusable UI widgets (TransactionView)
//!
//! ## Usage
//!
//! ```no_run
//! use chainview::config::Config;
//! use chainview::gui;
//!
//! let config = Config::default();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod async_job;
pub mod helpers;
pub mod notifications;
pub mod theme;
pub mod views;
pub mod widgets;

// Re-export main public API
pub use app::{launch, GuiApp, GuiSection};

// Re-export commonly used types from submodules for convenience
pub use async_job::JobHandle;
pub use helpers::{confirmations_text, format_coin, format_timestamp, short_hash};
pub use notifications::NotificationEntry;
pub use theme::{configure_style, AppTheme};
pub use widgets::TransactionView;
