mod fixtures;

use fixtures::read_log;
use tempfile::TempDir;
use tracing::info;
use vigil_log::{LogError, LogManager, LogSettings, LOG_FILE_NAME};

/// Installing a global logger is process-wide, so it gets its own test binary
#[test]
fn test_install_global_only_once() {
    let dir = TempDir::new().unwrap();
    let settings = LogSettings {
        console: false,
        color: false,
        ..LogSettings::default()
    };
    let (manager, logger) = LogManager::from_settings(dir.path(), &settings).unwrap();

    logger.install_global().unwrap();
    info!("through the global logger");

    let second = manager.build().unwrap().install_global();
    assert!(matches!(second, Err(LogError::GlobalAlreadySet)));

    let contents = read_log(&dir.path().join(LOG_FILE_NAME));
    assert!(contents.contains("through the global logger"));
}
