//! View modules for the GUI
//!
//! Each submodule implements the rendering for one screen as methods on
//! `GuiApp`, called from the main `App::update` match in `app.rs`.
//!
//! - `home` - chain status, transaction lookup, address lookup
//! - `blocks` - recent block listing
//! - `richlist` - top addresses by balance/sent/received
//! - `settings` - backend and refresh configuration

pub mod blocks;
pub mod home;
pub mod richlist;
pub mod settings;
