//! Handler Loader
//!
//! 启动时根据 `HandlerSettings` 解析并校验 handler，失败则拒绝启动。

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use super::{HandlerRegistry, HttpHandler, PluginError};
use crate::config::HandlerSettings;
use crate::domain::RedirectError;

pub fn load_handler(
    registry: &HandlerRegistry,
    settings: &HandlerSettings,
) -> Result<Arc<dyn HttpHandler>, PluginError> {
    match (&settings.file, &settings.target) {
        (Some(path), None) => load_handler_file(registry, path),
        (None, Some(target)) => registry.instantiate_value(json!({
            "handler": settings.name,
            "target": target,
        })),
        (Some(_), Some(_)) => Err(PluginError::ConflictingSources),
        (None, None) => Err(RedirectError::MissingTarget.into()),
    }
}

fn load_handler_file(
    registry: &HandlerRegistry,
    path: &Path,
) -> Result<Arc<dyn HttpHandler>, PluginError> {
    let text = std::fs::read_to_string(path).map_err(|source| PluginError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return registry.instantiate_json(&text);
    }

    let mut handlers = registry.instantiate_directives(&text)?;
    if handlers.len() != 1 {
        return Err(PluginError::HandlerCount(handlers.len()));
    }
    Ok(handlers.remove(0))
}
