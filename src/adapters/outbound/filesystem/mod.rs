/// Filesystem adapters for file I/O operations
mod config_manager;
mod file_writer;

pub use config_manager::{load_scan_config, ConfigManager, CONFIG_FILENAME};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
