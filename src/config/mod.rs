//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, ConsistencyConfig, CorsConfig, LogFormat, LoggingConfig, ServerConfig,
    StorageSettings,
};
