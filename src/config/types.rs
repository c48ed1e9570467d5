//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 默认使用的 handler 名称
pub const DEFAULT_HANDLER_NAME: &str = "base64_redirect";

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Handler 配置
    #[serde(default)]
    pub handler: HandlerSettings,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Handler 配置
///
/// `file` 与 `target` 二选一：
/// - `file`：`.json` 结尾按 JSON 解析，其他按指令文本解析
/// - `target`：直接给出目标 URL，使用 `name` 指定的 handler
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerSettings {
    /// handler 名称（对应模块 ID `http.handlers.{name}`）
    #[serde(default = "default_handler_name")]
    pub name: String,

    /// handler 配置文件路径
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// 目标 URL
    #[serde(default)]
    pub target: Option<String>,
}

fn default_handler_name() -> String {
    DEFAULT_HANDLER_NAME.to_string()
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            name: default_handler_name(),
            file: None,
            target: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
