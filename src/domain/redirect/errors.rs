//! Redirect Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectError {
    #[error("Target URL is not set")]
    MissingTarget,

    #[error("Invalid Target URL")]
    InvalidTargetScheme,

    /// 拼接结果无法作为 Location 头（目标里含控制字符等）
    #[error("Invalid Target URL")]
    UnencodableLocation,
}
