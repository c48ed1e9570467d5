//! Handler Registry
//!
//! 模块通过显式调用 `register` 注册，没有任何加载期的隐式副作用。

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{HttpHandler, PluginError};
use crate::config::{directive, Directive};

/// HTTP handler 模块 ID 的命名空间前缀
pub const HANDLER_NAMESPACE: &str = "http.handlers.";

pub type JsonConstructor = fn(Map<String, Value>) -> Result<Arc<dyn HttpHandler>, PluginError>;
pub type DirectiveConstructor = fn(&Directive) -> Result<Arc<dyn HttpHandler>, PluginError>;

/// 模块信息
#[derive(Clone, Copy)]
pub struct ModuleInfo {
    /// 完整模块 ID，如 `http.handlers.base64_redirect`
    pub id: &'static str,
    /// 文本配置中的指令名
    pub directive: &'static str,
    pub from_json: JsonConstructor,
    pub from_directive: DirectiveConstructor,
}

impl ModuleInfo {
    /// JSON 配置中 `handler` 字段使用的短名称
    pub fn handler_name(&self) -> &'static str {
        self.id.strip_prefix(HANDLER_NAMESPACE).unwrap_or(self.id)
    }
}

impl std::fmt::Debug for ModuleInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleInfo")
            .field("id", &self.id)
            .field("directive", &self.directive)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct HandlerRegistry {
    modules: HashMap<&'static str, ModuleInfo>,
    /// 指令名 → 模块 ID
    directives: HashMap<&'static str, &'static str>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, info: ModuleInfo) -> Result<(), PluginError> {
        if self.modules.contains_key(info.id) {
            return Err(PluginError::DuplicateModule(info.id.to_string()));
        }
        if self.directives.contains_key(info.directive) {
            return Err(PluginError::DuplicateDirective(info.directive.to_string()));
        }

        self.directives.insert(info.directive, info.id);
        self.modules.insert(info.id, info);
        tracing::debug!(module = info.id, directive = info.directive, "Module registered");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ModuleInfo> {
        self.modules.get(id)
    }

    pub fn by_handler_name(&self, name: &str) -> Option<&ModuleInfo> {
        self.get(&format!("{HANDLER_NAMESPACE}{name}"))
    }

    pub fn by_directive(&self, name: &str) -> Option<&ModuleInfo> {
        self.directives.get(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// 从 JSON 文本实例化 handler：`{"handler": "<name>", ...}`
    pub fn instantiate_json(&self, text: &str) -> Result<Arc<dyn HttpHandler>, PluginError> {
        let value: Value = serde_json::from_str(text)?;
        self.instantiate_value(value)
    }

    /// `handler` 字段在交给模块之前被移除
    pub fn instantiate_value(&self, value: Value) -> Result<Arc<dyn HttpHandler>, PluginError> {
        let Value::Object(mut object) = value else {
            return Err(PluginError::NotAnObject);
        };

        let name = match object.remove("handler") {
            Some(Value::String(name)) => name,
            _ => return Err(PluginError::MissingHandlerName),
        };
        let info = self
            .by_handler_name(&name)
            .ok_or_else(|| PluginError::UnknownHandler(name.clone()))?;

        let handler = (info.from_json)(object)?;
        provision(info, handler)
    }

    /// 每条顶层指令实例化一个 handler，保持原有顺序
    pub fn instantiate_directives(
        &self,
        text: &str,
    ) -> Result<Vec<Arc<dyn HttpHandler>>, PluginError> {
        directive::parse(text)?
            .iter()
            .map(|d| {
                let info = self
                    .by_directive(&d.name)
                    .ok_or_else(|| PluginError::UnknownDirective {
                        line: d.line,
                        name: d.name.clone(),
                    })?;
                let handler = (info.from_directive)(d)?;
                provision(info, handler)
            })
            .collect()
    }
}

fn provision(
    info: &ModuleInfo,
    handler: Arc<dyn HttpHandler>,
) -> Result<Arc<dyn HttpHandler>, PluginError> {
    handler.validate()?;
    tracing::info!(module = info.id, "Handler provisioned");
    Ok(handler)
}
