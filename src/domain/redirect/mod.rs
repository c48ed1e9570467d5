//! Redirect Context
//!
//! 把请求 URL 编码后拼接到目标 URL 之后，得到重定向地址。
//! 纯函数，不持有任何跨请求状态。

mod errors;
mod value_objects;

pub use errors::RedirectError;
pub use value_objects::{RedirectTarget, SubjectUrl};

/// 构造重定向地址
///
/// 先校验目标 URL，再把 subject 的 base64 编码直接追加在目标之后（不插入分隔符）。
pub fn redirect_location(
    target: &RedirectTarget,
    subject: &SubjectUrl,
) -> Result<String, RedirectError> {
    target.validate()?;

    let encoded = subject.encode();
    let mut location = String::with_capacity(target.as_str().len() + encoded.len());
    location.push_str(target.as_str());
    location.push_str(&encoded);
    Ok(location)
}
