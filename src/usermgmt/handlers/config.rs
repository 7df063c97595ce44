use crate::usermgmt::WebConfig;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Extension,
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Script assigning the runtime configuration to `window.USERMGMT_CONFIG`.
pub fn render(config: &WebConfig) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(&json!({ "api_base_url": config.api_base_url }))?;
    Ok(format!("window.USERMGMT_CONFIG = {payload};\n"))
}

// axum handler for /config.js
pub async fn config_js(Extension(config): Extension<Arc<WebConfig>>) -> impl IntoResponse {
    match render(&config) {
        Ok(script) => (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/javascript; charset=utf-8"),
                ),
                (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
            ],
            script,
        )
            .into_response(),
        Err(err) => {
            error!("Failed to render config.js: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn render_escapes_values() {
        let script = render(&WebConfig {
            api_base_url: r#"https://api.tld/"quoted""#.to_string(),
        })
        .unwrap();

        assert_eq!(
            script,
            "window.USERMGMT_CONFIG = {\"api_base_url\":\"https://api.tld/\\\"quoted\\\"\"};\n"
        );
    }

    #[tokio::test]
    async fn handler_sets_script_headers() {
        let config = Arc::new(WebConfig {
            api_base_url: "http://localhost:8080/api/users".to_string(),
        });
        let response = config_js(Extension(config)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }
}
