use serde::{Deserialize, Serialize};

/// Subset of the Contents API file object needed for a read-modify-write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileMetadata {
    /// Blob sha, used as the revision marker for the next write.
    pub sha: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    /// Base64 payload, wrapped at 60 columns by GitHub.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Body of a Contents API `PUT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    pub content: String,
    pub sha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentRef {
    pub sha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Response of a successful Contents API `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PutFileResponse {
    #[serde(default)]
    pub content: Option<ContentRef>,
    #[serde(default)]
    pub commit: Option<CommitRef>,
}

/// Error body returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
pub struct GithubErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
