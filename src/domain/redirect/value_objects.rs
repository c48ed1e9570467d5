//! Redirect Context - Value Objects

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::RedirectError;

/// 目标 URL 允许的前缀（大小写敏感）
const ALLOWED_PREFIXES: &[&str] = &["http://", "https://"];

/// subject URL 固定使用的 scheme，与入站请求实际的 scheme 无关
const SUBJECT_SCHEME: &str = "http://";

/// 重定向目标 - 编码后的 URL 追加在其后
///
/// 构造时不做校验，空值也允许存在；校验在 `validate` 中进行，
/// 由加载阶段和每次请求分别调用。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<(), RedirectError> {
        if self.0.is_empty() {
            return Err(RedirectError::MissingTarget);
        }
        if !ALLOWED_PREFIXES.iter().any(|p| self.0.starts_with(p)) {
            return Err(RedirectError::InvalidTargetScheme);
        }
        Ok(())
    }
}

impl std::fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 被编码的 URL
///
/// 形如 `http://{host}{path?query}`，按原始字节保存，host 和 path 不做任何校验。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectUrl(Vec<u8>);

impl SubjectUrl {
    pub fn from_request(host: &str, path_and_query: &str) -> Self {
        Self::from_raw(host.as_bytes(), path_and_query)
    }

    /// host 可能来自非 UTF-8 的请求头，按原样拼接
    pub fn from_raw(host: &[u8], path_and_query: &str) -> Self {
        let mut bytes =
            Vec::with_capacity(SUBJECT_SCHEME.len() + host.len() + path_and_query.len());
        bytes.extend_from_slice(SUBJECT_SCHEME.as_bytes());
        bytes.extend_from_slice(host);
        bytes.extend_from_slice(path_and_query.as_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// URL-safe base64，不带 `=` 填充
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }
}

impl std::fmt::Display for SubjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
