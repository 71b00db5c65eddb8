use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use tracing::Level;

/// What the `vigil-log` binary was asked to do
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: Option<String>,
    pub dir: PathBuf,
    pub level: Option<Level>,
    pub mode: Option<String>,
    pub no_color: bool,
    pub message: String,
}

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str =
        Box::leak(crate::internal::config::get_version_info().into_boxed_str());

    Command::new("vigil-log")
        .version(version)
        .about("Bootstrap the BharatVigil logger and emit a message through it")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a settings file (default: ./vigil-log.{yaml,toml,json} if present)"),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .default_value(".")
                .help("Directory the log file is created in"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .help("Change the log level after initialization"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Prefix timestamps with BharatVigil(<mode>)"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Switch to the plain console encoder"),
        )
        .arg(
            Arg::new("message")
                .long("message")
                .default_value("logger ready")
                .help("Message to log once configured"),
        )
}

pub fn parse_options(matches: &clap::ArgMatches) -> anyhow::Result<RunOptions> {
    let level = matches
        .get_one::<String>("level")
        .map(|s| s.parse::<Level>())
        .transpose()
        .map_err(|e| anyhow::anyhow!("invalid level: {}", e))?;

    Ok(RunOptions {
        config: matches.get_one::<String>("config").cloned(),
        dir: matches
            .get_one::<String>("dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        level,
        mode: matches.get_one::<String>("mode").cloned(),
        no_color: matches.get_flag("no-color"),
        message: matches
            .get_one::<String>("message")
            .cloned()
            .unwrap_or_else(|| "logger ready".to_string()),
    })
}
