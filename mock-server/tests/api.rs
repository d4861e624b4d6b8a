use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_mode, CheckResponse, Mode, MALFORMED_BODY, NO_VARIABLES_MESSAGE};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

const TWO_VALIDATIONS: &str =
    r#"{"validations":[{"id":"first","variables":{"name":"x"}},{"id":"second","variables":{}}]}"#;

// --- echo ---

#[tokio::test]
async fn echo_returns_one_valid_result_per_validation() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/check", TWO_VALIDATIONS))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: CheckResponse = body_json(resp).await;
    let ids: Vec<_> = body.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["first", "second"]);
    assert!(body.results.iter().all(|r| r.is_valid && r.message.is_empty()));
}

#[tokio::test]
async fn echo_accepts_any_version_segment() {
    let resp = app()
        .oneshot(json_request("POST", "/v2/check", TWO_VALIDATIONS))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn echo_accepts_empty_batch() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/check", r#"{"validations":[]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"results": []}));
}

// --- routing and extraction ---

#[tokio::test]
async fn get_is_not_allowed() {
    let resp = app()
        .oneshot(Request::builder().uri("/v1/check").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/validate", TWO_VALIDATIONS))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_request_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/check", r#"{"validations":[{"no_id":1}]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- modes ---

#[tokio::test]
async fn require_variables_rejects_empty_variables() {
    let resp = app_with_mode(Mode::RequireVariables)
        .oneshot(json_request("POST", "/v1/check", TWO_VALIDATIONS))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: CheckResponse = body_json(resp).await;
    assert!(body.results[0].is_valid);
    assert!(!body.results[1].is_valid);
    assert_eq!(body.results[1].message, NO_VARIABLES_MESSAGE);
}

#[tokio::test]
async fn malformed_mode_returns_non_json() {
    let resp = app_with_mode(Mode::Malformed)
        .oneshot(json_request("POST", "/v1/check", TWO_VALIDATIONS))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], MALFORMED_BODY.as_bytes());
}

#[tokio::test]
async fn server_error_mode_still_sends_results() {
    let resp = app_with_mode(Mode::ServerError)
        .oneshot(json_request("POST", "/v1/check", TWO_VALIDATIONS))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: CheckResponse = body_json(resp).await;
    assert_eq!(body.results.len(), 2);
}
