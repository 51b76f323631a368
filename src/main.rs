#![windows_subsystem = "windows"]

use anyhow::Result;
use chainview::{config::Config, gui};
use tracing_subscriber;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Environment defaults - GUI will load user settings and update accordingly
    let config = Config::from_env();
    gui::launch(config)?;

    Ok(())
}
