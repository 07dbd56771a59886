//! Process-level plumbing shared by Dayplan binaries: layered configuration,
//! home directory resolution and logging setup.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    AppConfig, AppConfigProvider, CliArgs, ConfigProvider, ConfigProviderExt, DatabaseConfig,
    LoggingConfig, Section, ServerConfig,
};
