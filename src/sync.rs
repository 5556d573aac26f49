//! Read and write the configured data file through the Contents API.
//!
//! A write is always a fresh fetch of the file's sha followed by a `PUT`
//! carrying that sha, so GitHub rejects the write if someone else changed the
//! file in between. The sha is never cached between writes.
use base64::{Engine, prelude::BASE64_STANDARD};
use log::*;

use crate::{
    config::ConfigStore,
    error::{NavSyncError, Result},
    github::{ContentsApi, PutFileRequest, PutFileResponse},
};

/// Commit message used for every content update.
pub const UPDATE_COMMIT_MESSAGE: &str = "Update navigation data";

/// Decoded content of the remote file together with its revision sha.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFile {
    pub sha: String,
    pub content: String,
}

/// Base64 encode the UTF-8 bytes of `content`.
pub fn encode_content(content: &str) -> String {
    BASE64_STANDARD.encode(content.as_bytes())
}

/// Decode a Contents API payload, ignoring the line breaks GitHub inserts.
pub fn decode_content(encoded: &str) -> Result<String> {
    let compact: String =
        encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64_STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Fetch and decode the configured file. A token is sent when configured but
/// is not required.
pub async fn fetch_file(
    store: &ConfigStore,
    api: &dyn ContentsApi,
) -> Result<RemoteFile> {
    fetch_and_decode(store, api)
        .await
        .inspect_err(|err| error!("Failed to fetch GitHub file: {err}"))
}

async fn fetch_and_decode(
    store: &ConfigStore,
    api: &dyn ContentsApi,
) -> Result<RemoteFile> {
    let url = store.api_url()?;

    let metadata = api
        .get_file(url, store.token().cloned())
        .await
        .map_err(|err| NavSyncError::FetchFailed(err.remote_message()))?;

    let encoded = match (metadata.encoding.as_deref(), metadata.content) {
        (Some("base64") | None, Some(content)) => content,
        (encoding, _) => {
            return Err(NavSyncError::FetchFailed(format!(
                "file content unavailable (encoding: {})",
                encoding.unwrap_or("none")
            )));
        }
    };

    let content = decode_content(&encoded).map_err(|err| {
        NavSyncError::FetchFailed(format!("invalid file content: {err}"))
    })?;

    debug!(
        "fetched {} bytes at sha {}",
        content.len(),
        metadata.sha
    );

    Ok(RemoteFile {
        sha: metadata.sha,
        content,
    })
}

/// Replace the configured file with `content`.
///
/// Requires a token and fails before touching the network without one. The
/// current sha is fetched first; if that fetch fails no write is attempted.
pub async fn update_file(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    content: &str,
) -> Result<PutFileResponse> {
    write_with_fresh_sha(store, api, content)
        .await
        .inspect_err(|err| error!("Failed to update GitHub file: {err}"))
}

async fn write_with_fresh_sha(
    store: &ConfigStore,
    api: &dyn ContentsApi,
    content: &str,
) -> Result<PutFileResponse> {
    let token = store.token().cloned().ok_or(NavSyncError::TokenRequired)?;
    let url = store.api_url()?;

    let metadata = api
        .get_file(url.clone(), Some(token.clone()))
        .await
        .map_err(|err| NavSyncError::FetchFailed(err.remote_message()))?;

    info!("updating {url} at sha {}", metadata.sha);

    let body = PutFileRequest {
        message: UPDATE_COMMIT_MESSAGE.to_string(),
        content: encode_content(content),
        sha: metadata.sha,
    };

    let response = api
        .put_file(url, token, body)
        .await
        .map_err(|err| NavSyncError::SaveFailed(err.remote_message()))?;

    if let Some(commit) = &response.commit {
        info!("saved navigation data in commit {}", commit.sha);
    }

    Ok(response)
}
