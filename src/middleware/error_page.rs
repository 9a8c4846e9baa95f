use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::error::error_page;

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"))
}

fn message_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "The page you were looking for doesn't exist.",
        StatusCode::METHOD_NOT_ALLOWED => "That action isn't available here.",
        s if s.is_client_error() => "The request could not be understood.",
        _ => "Something went wrong.",
    }
}

/// Replaces bodiless or non-HTML error responses (extractor rejections,
/// method mismatches) with the HTML error page for the same status.
///
/// Headers other than the body's content headers are carried over.
pub async fn error_page_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_html(&response) {
        return response;
    }

    tracing::debug!(status = status.as_u16(), "Rendering framework error as HTML");

    let (parts, _) = response.into_parts();
    let mut page = error_page(status, message_for(status));
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            page.headers_mut().insert(name.clone(), value.clone());
        }
    }
    page
}

#[cfg(test)]
mod tests {
    use axum::{middleware, routing::get, Json, Router};
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;

    fn server() -> TestServer {
        let app = Router::new()
            .route("/plain", get(|| async { (StatusCode::BAD_REQUEST, "bad field") }))
            .route("/empty", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/ok", get(|| async { Json(json!({ "status": "healthy" })) }))
            .route(
                "/page",
                get(|| async { error_page(StatusCode::CONFLICT, "already there") }),
            )
            .layer(middleware::from_fn(error_page_middleware));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_plain_text_rejection_becomes_html() {
        let response = server().get("/plain").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let text = response.text();
        assert!(text.contains("400"));
        assert!(text.contains("The request could not be understood."));
        assert!(!text.contains("bad field"));
    }

    #[tokio::test]
    async fn test_empty_server_error_becomes_html() {
        let response = server().get("/empty").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("Something went wrong."));
    }

    #[tokio::test]
    async fn test_method_not_allowed_keeps_allow_header() {
        let response = server().post("/ok").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.text().contains("405"));
        assert!(response.headers().get("allow").is_some());
    }

    #[tokio::test]
    async fn test_html_and_success_responses_pass_through() {
        let server = server();

        let ok = server.get("/ok").await;
        ok.assert_status_ok();
        assert_eq!(ok.json::<serde_json::Value>()["status"], "healthy");

        let page = server.get("/page").await;
        page.assert_status(StatusCode::CONFLICT);
        assert!(page.text().contains("already there"));
    }
}
