mod app;
mod artwork;
mod player;
mod ui;

use app::cli::Args;
use app::config::Config;
use app::{
    App, AppConstructor, AppMainLoop,
    terminal::{detect_cell_fallback, init_terminal, restore_terminal},
};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if let Some(path) = &args.generate_config {
        let config_path = if path.is_dir() {
            path.join("config.toml")
        } else {
            path.clone()
        };
        Config::generate_default(config_path)?;
        return Ok(());
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let config_existed = config_path.exists();

    // Warnings are collected before the logger exists and logged once it does
    let (config, config_warnings) = Config::load(Some(config_path.clone()))?;

    let _logger = if config.logging.enabled {
        app::logging::ensure_log_directory(&config.logging)?;
        let handle = app::logging::init_logger(&config.logging)?;
        app::logging::log_startup_info(&config.logging);
        app::logging::log_config_loading(&config_path, !config_existed);
        for warning in &config_warnings {
            log::warn!("{}", warning);
        }
        Some(handle)
    } else {
        None
    };

    let logging_enabled = config.logging.enabled;
    let mut app = App::new_with_config(config, &args);

    let terminal = init_terminal()?;
    app.cell_fallback = detect_cell_fallback();
    if let Some((width, height)) = app.cell_fallback {
        log::info!("Terminal reports no pixel size, using {}x{} cells", width, height);
    }

    let result = app.run(terminal).await;

    if logging_enabled {
        app::logging::log_shutdown_info();
    }

    restore_terminal()?;
    result
}
