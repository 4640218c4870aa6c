//! HTTP request envelope for the XTM REST API

use std::fmt;
use std::time::Duration;

use reqwest::{header, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::core::errors::{Result, XtmError};
use crate::core::models::ApiResponse;

/// Authorization scheme the API expects in front of the bearer token
const AUTH_SCHEME: &str = "XTM-Basic";

/// Content-type marker for binary payloads
const OCTET_STREAM: &str = "application/octet-stream";

/// Request verbs used across the XTM API surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReqMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
}

impl fmt::Display for ReqMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReqMethod::Get => write!(f, "GET"),
            ReqMethod::Post => write!(f, "POST"),
        }
    }
}

/// Performs exactly one HTTP exchange per call and normalizes its outcome
#[derive(Debug, Clone)]
pub struct Transport {
    /// Connection pool with the per-request timeout applied
    http: reqwest::Client,
}

impl Transport {
    /// Build the underlying HTTP client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Send one request and classify the response.
    ///
    /// A present token is attached as `Authorization: XTM-Basic <token>`.
    /// The API expects a JSON body on every call, GET included, so an absent
    /// body goes out as an explicit `null`. Responses declaring an
    /// octet-stream content type are returned as raw bytes; everything else
    /// is decoded as JSON. No retries happen at this layer.
    pub async fn send(
        &self,
        url: &str,
        method: ReqMethod,
        token: Option<&str>,
        body: Option<&Value>,
        params: &[(&'static str, String)],
    ) -> Result<ApiResponse> {
        debug!("{} {}", method, url);

        let mut request = match method {
            ReqMethod::Get => self.http.get(url),
            ReqMethod::Post => self.http.post(url),
        };

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("{} {}", AUTH_SCHEME, token));
        }

        if !params.is_empty() {
            request = request.query(params);
        }

        let payload = body.cloned().unwrap_or(Value::Null);
        let response = request.json(&payload).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // The API has been seen returning both shapes here: a JSON error
            // body, and an entirely empty body where only the reason phrase
            // is available.
            let reason = status.canonical_reason().unwrap_or("Not Found");
            let text = response.text().await?;
            if text.is_empty() {
                return Err(XtmError::api_reason(reason));
            }
            return Err(XtmError::api_json(serde_json::from_str(&text)?));
        }
        if !status.is_success() {
            let text = response.text().await?;
            return Err(XtmError::api_json(serde_json::from_str(&text)?));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.contains(OCTET_STREAM) {
            return Ok(ApiResponse::Binary(response.bytes().await?.to_vec()));
        }

        let text = response.text().await?;
        Ok(ApiResponse::Json(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorPayload;
    use assert_json_diff::assert_json_eq;
    use mockito::Matcher;
    use serde_json::json;

    fn transport() -> Transport {
        Transport::new(Duration::from_secs(60)).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_round_trips() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 42, "name": "Website relaunch", "status": "ACTIVE"}"#)
            .create_async()
            .await;

        let url = format!("{}/projects/42", server.url());
        let response = transport()
            .send(&url, ReqMethod::Get, None, None, &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_json_eq!(
            response.into_json().unwrap(),
            json!({"id": 42, "name": "Website relaunch", "status": "ACTIVE"})
        );
    }

    #[tokio::test]
    async fn test_octet_stream_passes_through_unchanged() {
        let archive = vec![0x50u8, 0x4b, 0x03, 0x04, 0x00, 0xff, 0x10];

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files/download")
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(archive.clone())
            .create_async()
            .await;

        let url = format!("{}/files/download", server.url());
        let response = transport()
            .send(&url, ReqMethod::Get, None, None, &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.into_bytes().unwrap(), archive);
    }

    #[tokio::test]
    async fn test_not_found_with_empty_body_carries_reason() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/999")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/projects/999", server.url());
        let err = transport()
            .send(&url, ReqMethod::Get, None, None, &[])
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            XtmError::ApiError { message } => {
                assert_eq!(message, ErrorPayload::Reason("Not Found".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_with_body_carries_decoded_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/999")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorMessage": "Project does not exist"}"#)
            .create_async()
            .await;

        let url = format!("{}/projects/999", server.url());
        let err = transport()
            .send(&url, ReqMethod::Get, None, None, &[])
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            XtmError::ApiError { message } => {
                assert_eq!(
                    message,
                    ErrorPayload::Json(json!({"errorMessage": "Project does not exist"}))
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_non_success_carries_decoded_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/projects/1/files/generate")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorCode": "INTERNAL", "errorMessage": "boom"}"#)
            .create_async()
            .await;

        let url = format!("{}/projects/1/files/generate", server.url());
        let err = transport()
            .send(&url, ReqMethod::Post, None, None, &[])
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            XtmError::ApiError { message } => {
                assert_eq!(
                    message,
                    ErrorPayload::Json(json!({"errorCode": "INTERNAL", "errorMessage": "boom"}))
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_token_sets_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users")
            .match_header("authorization", "XTM-Basic secret-token")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let url = format!("{}/users", server.url());
        transport()
            .send(&url, ReqMethod::Get, Some("secret-token"), None, &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_token_omits_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/token")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"token": "abc"}"#)
            .create_async()
            .await;

        let url = format!("{}/auth/token", server.url());
        transport()
            .send(&url, ReqMethod::Post, None, None, &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_absent_body_is_sent_as_json_null() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/7")
            .match_header("content-type", "application/json")
            .match_body("null")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let url = format!("{}/projects/7", server.url());
        transport()
            .send(&url, ReqMethod::Get, None, None, &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_pairs_are_repeated_per_list_entry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/lqa")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("projectIds".into(), "1".into()),
                Matcher::UrlEncoded("projectIds".into(), "2".into()),
                Matcher::UrlEncoded("type".into(), "LANGUAGE".into()),
            ]))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let url = format!("{}/projects/lqa", server.url());
        let params = vec![
            ("projectIds", "1".to_string()),
            ("projectIds", "2".to_string()),
            ("type", "LANGUAGE".to_string()),
        ];
        transport()
            .send(&url, ReqMethod::Get, None, None, &params)
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
