//! Base64 Redirect Handler
//!
//! 把请求 URL（`http://` + host + path?query）做 URL-safe 无填充 base64 编码，
//! 追加到配置的目标 URL 之后，以 302 重定向。

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use http::header::{HOST, LOCATION};
use http::request::Parts;
use http::{HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{HandlerRegistry, HttpHandler, ModuleInfo, PluginError};
use crate::config::{Directive, DirectiveError};
use crate::domain::{redirect_location, RedirectError, RedirectTarget, SubjectUrl};

pub const MODULE_ID: &str = "http.handlers.base64_redirect";
pub const DIRECTIVE: &str = "base64_redirect";

/// 块形式中唯一支持的子指令
const TARGET_SUBDIRECTIVE: &str = "target";

/// Handler 配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Base64RedirectConfig {
    /// 目标 URL；JSON 中缺省为空，由 `validate` 报错
    #[serde(default)]
    pub target: RedirectTarget,
}

#[derive(Debug, Clone)]
pub struct Base64Redirect {
    target: RedirectTarget,
}

impl Base64Redirect {
    pub fn new(config: Base64RedirectConfig) -> Self {
        Self {
            target: config.target,
        }
    }

    pub fn module_info() -> ModuleInfo {
        ModuleInfo {
            id: MODULE_ID,
            directive: DIRECTIVE,
            from_json: Self::from_json,
            from_directive: Self::from_directive,
        }
    }

    fn from_json(object: Map<String, Value>) -> Result<Arc<dyn HttpHandler>, PluginError> {
        let config: Base64RedirectConfig = serde_json::from_value(Value::Object(object))?;
        Ok(Arc::new(Self::new(config)))
    }

    fn from_directive(directive: &Directive) -> Result<Arc<dyn HttpHandler>, PluginError> {
        let config = unmarshal_directive(directive)?;
        Ok(Arc::new(Self::new(config)))
    }

    /// 目标校验失败时返回 500，否则 302
    pub fn respond(&self, host: &[u8], path_and_query: &str) -> Response {
        let subject = SubjectUrl::from_raw(host, path_and_query);

        let location = redirect_location(&self.target, &subject).and_then(|location| {
            HeaderValue::try_from(location).map_err(|_| RedirectError::UnencodableLocation)
        });

        match location {
            Ok(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
            Err(e) => e.into_response(),
        }
    }
}

impl HttpHandler for Base64Redirect {
    fn serve(&self, request: &Parts) -> Response {
        let host = request_host(request);
        let path_and_query = request
            .uri
            .path_and_query()
            .map_or("/", |pq| pq.as_str());

        tracing::debug!(
            host = %String::from_utf8_lossy(host),
            uri = %request.uri,
            "Handling base64 redirect"
        );

        self.respond(host, path_and_query)
    }

    fn validate(&self) -> Result<(), PluginError> {
        self.target.validate()?;
        Ok(())
    }
}

/// `Host` 头优先，HTTP/2 请求退回到 URI authority
fn request_host(request: &Parts) -> &[u8] {
    request
        .headers
        .get(HOST)
        .map(HeaderValue::as_bytes)
        .or_else(|| request.uri.authority().map(|a| a.as_str().as_bytes()))
        .unwrap_or_default()
}

/// 解析指令：
/// - `base64_redirect <target>`
/// - `base64_redirect { target <target> }`
pub fn unmarshal_directive(directive: &Directive) -> Result<Base64RedirectConfig, DirectiveError> {
    let mut target = match directive.args.len() {
        0 => None,
        1 => Some(directive.args[0].clone()),
        _ => {
            return Err(DirectiveError::ArgCount {
                line: directive.line,
                directive: directive.name.clone(),
            })
        }
    };

    for sub in &directive.block {
        if sub.name != TARGET_SUBDIRECTIVE {
            return Err(DirectiveError::UnknownSubdirective {
                line: sub.line,
                name: sub.name.clone(),
            });
        }
        let value = sub.single_arg()?;
        if target.is_some() {
            return Err(DirectiveError::Duplicate {
                line: sub.line,
                name: TARGET_SUBDIRECTIVE.to_string(),
            });
        }
        target = Some(value.to_string());
    }

    let target = target.ok_or_else(|| DirectiveError::ArgCount {
        line: directive.line,
        directive: directive.name.clone(),
    })?;

    Ok(Base64RedirectConfig {
        target: RedirectTarget::new(target),
    })
}

/// 注册到 host；重复注册返回错误
pub fn register(registry: &mut HandlerRegistry) -> Result<(), PluginError> {
    registry.register(Base64Redirect::module_info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use http::header::CONTENT_TYPE;
    use http::Request;

    use crate::config::directive;

    fn handler(target: &str) -> Base64Redirect {
        Base64Redirect::new(Base64RedirectConfig {
            target: RedirectTarget::new(target),
        })
    }

    fn parts(uri: &str, host: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header(HOST, host);
        }
        builder.body(()).unwrap().into_parts().0
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn parse_one(text: &str) -> Directive {
        directive::parse(text).unwrap().remove(0)
    }

    #[tokio::test]
    async fn test_redirects_with_encoded_url() {
        let response = handler("https://redir.example/go/").serve(&parts("/p?q=1", Some("a.com")));

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[LOCATION],
            "https://redir.example/go/aHR0cDovL2EuY29tL3A_cT0x"
        );
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_target_is_server_error() {
        let response = handler("").serve(&parts("/p?q=1", Some("a.com")));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(LOCATION).is_none());
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert!(body_string(response).await.contains("Target URL is not set"));
    }

    #[tokio::test]
    async fn test_bad_scheme_is_server_error() {
        let response = handler("ftp://bad").serve(&parts("/", Some("a.com")));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(LOCATION).is_none());
        assert!(body_string(response).await.contains("Invalid Target URL"));
    }

    #[tokio::test]
    async fn test_control_chars_in_target_are_server_error() {
        let response = handler("https://x/\n").serve(&parts("/", Some("a.com")));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("Invalid Target URL"));
    }

    #[test]
    fn test_location_round_trips() {
        let target = "http://redir.example/?u=";
        let cases = [
            ("/", "a.com"),
            ("/search?q=rust+lang&page=2", "shop.example:8443"),
            ("/%E4%B8%AD/%20?x=%2F", "b.example"),
        ];

        for (uri, host) in cases {
            let response = handler(target).serve(&parts(uri, Some(host)));
            assert_eq!(response.status(), StatusCode::FOUND);

            let location = response.headers()[LOCATION].to_str().unwrap();
            let encoded = location.strip_prefix(target).unwrap();
            assert!(!encoded.contains('='));
            let decoded = URL_SAFE_NO_PAD.decode(encoded).unwrap();
            assert_eq!(decoded, format!("http://{host}{uri}").into_bytes());
        }
    }

    #[test]
    fn test_host_falls_back_to_authority() {
        let response = handler("https://r/").serve(&parts("https://b.example/x", None));
        let location = response.headers()[LOCATION].to_str().unwrap();
        let decoded = URL_SAFE_NO_PAD
            .decode(location.strip_prefix("https://r/").unwrap())
            .unwrap();
        assert_eq!(decoded, b"http://b.example/x");
    }

    #[test]
    fn test_missing_host_encodes_path_only_after_scheme() {
        let response = handler("https://r/").serve(&parts("/x", None));
        let location = response.headers()[LOCATION].to_str().unwrap();
        let decoded = URL_SAFE_NO_PAD
            .decode(location.strip_prefix("https://r/").unwrap())
            .unwrap();
        assert_eq!(decoded, b"http:///x");
    }

    #[test]
    fn test_validate() {
        assert!(handler("https://x/").validate().is_ok());
        assert!(matches!(
            handler("").validate(),
            Err(PluginError::Invalid(RedirectError::MissingTarget))
        ));
        assert!(matches!(
            handler("x://").validate(),
            Err(PluginError::Invalid(RedirectError::InvalidTargetScheme))
        ));
    }

    #[test]
    fn test_json_config() {
        let config: Base64RedirectConfig =
            serde_json::from_str(r#"{"target": "https://x/"}"#).unwrap();
        assert_eq!(config.target.as_str(), "https://x/");

        let config: Base64RedirectConfig = serde_json::from_str("{}").unwrap();
        assert!(config.target.is_empty());

        assert!(serde_json::from_str::<Base64RedirectConfig>(r#"{"targt": "x"}"#).is_err());
    }

    #[test]
    fn test_directive_inline() {
        let config = unmarshal_directive(&parse_one("base64_redirect https://x/")).unwrap();
        assert_eq!(config.target.as_str(), "https://x/");
    }

    #[test]
    fn test_directive_block() {
        let config = unmarshal_directive(&parse_one(
            "base64_redirect {\n    target \"https://x/go/\"\n}\n",
        ))
        .unwrap();
        assert_eq!(config.target.as_str(), "https://x/go/");
    }

    #[test]
    fn test_directive_without_target() {
        assert!(matches!(
            unmarshal_directive(&parse_one("base64_redirect")),
            Err(DirectiveError::ArgCount { line: 1, .. })
        ));
        assert!(matches!(
            unmarshal_directive(&parse_one("base64_redirect {\n}\n")),
            Err(DirectiveError::ArgCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_directive_arg_count() {
        assert!(matches!(
            unmarshal_directive(&parse_one("base64_redirect a b")),
            Err(DirectiveError::ArgCount { line: 1, .. })
        ));
        assert!(matches!(
            unmarshal_directive(&parse_one("base64_redirect {\n target\n}")),
            Err(DirectiveError::ArgCount { line: 2, .. })
        ));
        assert!(matches!(
            unmarshal_directive(&parse_one("base64_redirect {\n target a b\n}")),
            Err(DirectiveError::ArgCount { line: 2, .. })
        ));
    }

    #[test]
    fn test_directive_rejects_unknown_and_duplicate() {
        assert!(matches!(
            unmarshal_directive(&parse_one("base64_redirect {\n url https://x/\n}")),
            Err(DirectiveError::UnknownSubdirective { line: 2, .. })
        ));
        assert!(matches!(
            unmarshal_directive(&parse_one(
                "base64_redirect https://x/ {\n target https://y/\n}"
            )),
            Err(DirectiveError::Duplicate { line: 2, .. })
        ));
        assert!(matches!(
            unmarshal_directive(&parse_one(
                "base64_redirect {\n target https://x/\n target https://y/\n}"
            )),
            Err(DirectiveError::Duplicate { line: 3, .. })
        ));
    }

    #[test]
    fn test_module_info() {
        let info = Base64Redirect::module_info();
        assert_eq!(info.id, "http.handlers.base64_redirect");
        assert_eq!(info.handler_name(), "base64_redirect");
        assert_eq!(info.directive, "base64_redirect");
    }
}
