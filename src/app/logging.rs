use crate::app::config::LoggingConfig;
use crate::app::player_handler::PlayerAction;
use crate::player::ProviderError;
use flexi_logger::{Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};
use log::LevelFilter;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "hellcast";

/// Map the configured level name, defaulting to info
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize the file logger. The returned handle must stay alive for the
/// lifetime of the program, dropping it stops file output.
pub fn init_logger(config: &LoggingConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Debug.max(parse_level(&config.level))
    } else {
        parse_level(&config.level)
    };

    let mut logger = Logger::try_with_str(log_level.as_str().to_lowercase())?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir())
                .basename(LOG_BASENAME)
                .suppress_timestamp(),
        )
        .format_for_files(custom_log_format)
        .use_utc();

    if config.append_to_file {
        logger = logger.append();
    }

    if config.rotate_logs {
        logger = logger.rotate(
            Criterion::Size(config.rotation_size_mb * 1024 * 1024),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(config.keep_log_files as usize),
        );
    }

    // Writes over the display, only useful with stdout redirected
    if config.log_to_console {
        logger = logger.log_to_stdout();
    }

    let handle = logger.start()?;
    log::info!("Logger initialized with level: {}", log_level);
    log::info!("Log file location: {}", log_file_path(config).display());

    Ok(handle)
}

pub fn log_file_path(config: &LoggingConfig) -> PathBuf {
    config.log_dir().join(format!("{}.log", LOG_BASENAME))
}

/// Custom log format for file output
fn custom_log_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

pub fn ensure_log_directory(config: &LoggingConfig) -> color_eyre::Result<()> {
    let log_dir = config.log_dir();
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }
    Ok(())
}

pub fn log_startup_info(config: &LoggingConfig) {
    log::info!("=== hellcast starting ===");
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    log::info!("OS: {}", std::env::consts::OS);
    log::info!("Architecture: {}", std::env::consts::ARCH);
    log::info!("Log file: {}", log_file_path(config).display());
}

pub fn log_shutdown_info() {
    log::info!("=== hellcast shutting down ===");
}

pub fn log_config_loading(config_path: &Path, created: bool) {
    if created {
        log::info!("Created default config file at: {}", config_path.display());
    } else {
        log::info!("Loaded config file from: {}", config_path.display());
    }
}

/// Player commands are fire-and-forget: failures are only logged
pub fn log_player_command(action: &PlayerAction, result: &Result<(), ProviderError>) {
    match result {
        Ok(()) => log::debug!("Player command executed: {:?}", action),
        Err(e) => log::warn!("Player command failed: {:?} - {}", action, e),
    }
}

/// Log user interactions for debugging
pub fn log_user_interaction(action: &str, context: Option<&str>) {
    match context {
        Some(ctx) => log::debug!("User action: {} - {}", action, ctx),
        None => log::debug!("User action: {}", action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level(" warn "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_log_file_path_uses_configured_dir() {
        let config = LoggingConfig {
            log_dir: Some("/var/tmp/hc".to_string()),
            ..Default::default()
        };
        assert_eq!(log_file_path(&config), PathBuf::from("/var/tmp/hc/hellcast.log"));
    }
}
