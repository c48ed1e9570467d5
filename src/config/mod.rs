//! Configuration Module
//!
//! 提供应用配置管理功能，支持多层级配置来源：
//! - 环境变量（最高优先级）
//! - 配置文件（TOML 格式）
//! - 默认值（最低优先级）
//!
//! 以及 handler 的文本指令格式解析（`directive`）。

pub mod directive;
mod loader;
mod types;

pub use directive::{Directive, DirectiveError};
pub use loader::{load_config, load_config_from_path, load_config_from_str, print_config, ConfigError};
pub use types::{AppConfig, HandlerSettings, LogConfig, ServerConfig, DEFAULT_HANDLER_NAME};
