use anyhow::Context;
use vigil_log::cli::{build_cli, parse_options};
use vigil_log::internal::config::get_version_info;
use vigil_log::{log_debug, log_info, LogManager, LogSettings};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let options = parse_options(&matches)?;

    let settings =
        LogSettings::load(options.config.as_deref()).context("Failed to load configuration")?;

    let (mut manager, mut logger) = LogManager::from_settings(&options.dir, &settings)
        .context("Failed to initialize logger")?;

    if let Some(level) = options.level {
        logger = manager.set_level(level)?;
    }
    if options.no_color {
        logger = manager.set_color_encoding(false)?;
    }
    if let Some(mode) = &options.mode {
        logger = manager.set_mode_label(mode)?;
    }

    log_info!(logger, "{}", get_version_info());
    log_debug!(logger, config = ?manager.config(), "effective logger configuration");
    log_info!(
        logger,
        log_file = %manager.log_file().display(),
        "{}",
        options.message
    );

    Ok(())
}
