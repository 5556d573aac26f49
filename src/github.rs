//! GitHub Contents API client.
//!
//! Only the two calls a read-modify-write needs are exposed: fetching a
//! file's metadata (and with it the current revision sha) and replacing the
//! file's content conditioned on that sha.
use async_trait::async_trait;
use log::*;
#[cfg(test)]
use mockall::automock;
use reqwest::{
    Client, Request, RequestBuilder, Response, StatusCode, Url,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{NavSyncError, Result};

pub mod types;

pub use types::{FileMetadata, PutFileRequest, PutFileResponse};

use types::GithubErrorBody;

/// Media type for the v3 REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15000);
/// GitHub rejects requests without a user agent.
pub const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Remote file operations against the GitHub Contents API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// `GET` the file at `url`. The token is optional for public repos.
    async fn get_file(
        &self,
        url: Url,
        token: Option<SecretString>,
    ) -> Result<FileMetadata>;

    /// `PUT` new content at `url`, scoped by the sha in `body`.
    async fn put_file(
        &self,
        url: Url,
        token: SecretString,
        body: PutFileRequest,
    ) -> Result<PutFileResponse>;
}

/// [`ContentsApi`] implementation backed by reqwest.
pub struct GithubContents {
    client: Client,
}

impl GithubContents {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::default_headers())
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn get_request(
        &self,
        url: Url,
        token: Option<&SecretString>,
    ) -> Result<Request> {
        Ok(Self::authorize(self.client.get(url), token).build()?)
    }

    fn put_request(
        &self,
        url: Url,
        token: &SecretString,
        body: &PutFileRequest,
    ) -> Result<Request> {
        Ok(Self::authorize(self.client.put(url).json(body), Some(token))
            .build()?)
    }

    fn authorize(
        builder: RequestBuilder,
        token: Option<&SecretString>,
    ) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn parse_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();

        Err(NavSyncError::RemoteError {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }
}

/// Extract the human readable message from a failed API response, falling
/// back to the raw body and then the status reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GithubErrorBody>(body)
        && !parsed.message.is_empty()
    {
        return parsed.message;
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

#[async_trait]
impl ContentsApi for GithubContents {
    async fn get_file(
        &self,
        url: Url,
        token: Option<SecretString>,
    ) -> Result<FileMetadata> {
        debug!("fetching file metadata: {url}");

        let request = self.get_request(url, token.as_ref())?;
        let response = self.client.execute(request).await?;

        Self::parse_response(response).await
    }

    async fn put_file(
        &self,
        url: Url,
        token: SecretString,
        body: PutFileRequest,
    ) -> Result<PutFileResponse> {
        debug!("updating file {url} from sha {}", body.sha);

        let request = self.put_request(url, &token, &body)?;
        let response = self.client.execute(request).await?;

        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn error_message_prefers_json_message() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
        assert_eq!(error_message(StatusCode::NOT_FOUND, body), "Not Found");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream exploded\n"),
            "upstream exploded"
        );
    }

    #[test]
    fn error_message_falls_back_to_status_reason() {
        assert_eq!(error_message(StatusCode::CONFLICT, ""), "Conflict");
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":""}"#),
            r#"{"message":""}"#
        );
    }

    #[test]
    fn deserializes_file_metadata() {
        let json = r#"{
            "type": "file",
            "encoding": "base64",
            "size": 5,
            "name": "nav.json",
            "path": "nav.json",
            "content": "e30K\n",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1"
        }"#;

        let meta: FileMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.sha, "3d21ec53a331a6f037a91c368710b99387d012c1");
        assert_eq!(meta.encoding.as_deref(), Some("base64"));
        assert_eq!(meta.path.as_deref(), Some("nav.json"));
    }

    #[test]
    fn serializes_put_request() {
        let req = PutFileRequest {
            message: "Update navigation data".into(),
            content: "e30K".into(),
            sha: "abc".into(),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "Update navigation data",
                "content": "e30K",
                "sha": "abc",
            })
        );
    }

    #[test]
    fn builds_client() {
        assert!(GithubContents::new().is_ok());
    }

    fn test_response(status: u16, body: &str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn test_url() -> Url {
        Url::parse("https://api.github.com/repos/test/links/contents/nav.json")
            .unwrap()
    }

    #[tokio::test]
    #[test_log::test]
    async fn parse_response_reports_remote_message() {
        let response = test_response(409, r#"{"message":"sha mismatch"}"#);

        let result =
            GithubContents::parse_response::<FileMetadata>(response).await;

        match result {
            Err(NavSyncError::RemoteError { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "sha mismatch");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    #[test_log::test]
    async fn parse_response_deserializes_success_body() {
        let response = test_response(
            200,
            r#"{"sha":"abc","path":"nav.json","content":"e30K"}"#,
        );

        let meta = GithubContents::parse_response::<FileMetadata>(response)
            .await
            .unwrap();

        assert_eq!(meta.sha, "abc");
        assert_eq!(meta.content.as_deref(), Some("e30K"));
    }

    #[tokio::test]
    #[test_log::test]
    async fn undecodable_success_body_is_a_network_error() {
        let response = test_response(200, "<html>maintenance</html>");

        let result =
            GithubContents::parse_response::<FileMetadata>(response).await;

        assert!(matches!(result, Err(NavSyncError::NetworkError(_))));
    }

    #[test]
    fn default_headers_request_v3_json() {
        let headers = GithubContents::default_headers();

        assert_eq!(headers.get(ACCEPT).unwrap(), GITHUB_ACCEPT);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn get_request_sends_bearer_token_when_configured() {
        let api = GithubContents::new().unwrap();
        let token = SecretString::from("test-token");

        let request = api.get_request(test_url(), Some(&token)).unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer test-token"
        );

        let request = api.get_request(test_url(), None).unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn put_request_carries_token_and_json_body() {
        let api = GithubContents::new().unwrap();
        let token = SecretString::from("test-token");
        let body = PutFileRequest {
            message: "Update navigation data".into(),
            content: "e30K".into(),
            sha: "abc".into(),
        };

        let request = api.put_request(test_url(), &token, &body).unwrap();

        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer test-token"
        );
        let sent: serde_json::Value = serde_json::from_slice(
            request.body().and_then(|b| b.as_bytes()).unwrap(),
        )
        .unwrap();
        assert_eq!(sent["sha"], "abc");
    }
}
