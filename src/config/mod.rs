//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config, load_config_file, save_config, save_default_config};
pub use paths::{config_file_path, resolve_config_path};
pub use types::{ArchiveConfig, Config, EnrichConfig, PathsConfig};
pub use validate::validate_config;
