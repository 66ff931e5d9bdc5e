//! Google Drive v3 upload client
//!
//! The shared [`DriveClient`] only owns the HTTP connection pool and the
//! upload endpoint. Credentials never live on it: each call borrows the
//! caller's delegated access token through [`DriveClient::authorize`], so
//! concurrent requests for different users cannot see each other's tokens.

use reqwest::{header, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

pub const TEXT_MIME_TYPE: &str = "text/plain";

const UPLOAD_PATH: &str = "upload/drive/v3/files";

#[derive(Debug, Error)]
pub enum DriveError {
    /// The API answered with a non-success status.
    #[error("Drive API responded with {status}")]
    Remote { status: StatusCode, body: String },

    /// No usable response at all (connect, TLS, body read).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidBaseUrl(String),
}

/// A plain-text file to create in the user's Drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub name: String,
    pub content: String,
}

/// Successful `files.create` response
#[derive(Debug, Clone)]
pub struct CreatedFile {
    pub status: StatusCode,
    pub id: Option<String>,
}

#[derive(Deserialize)]
struct FileResource {
    id: Option<String>,
}

#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    upload_url: Url,
}

impl DriveClient {
    /// `base_url` is the Google APIs host, e.g. `https://www.googleapis.com`.
    pub fn new(base_url: &str) -> Result<Self, DriveError> {
        Ok(Self {
            http: reqwest::Client::new(),
            upload_url: Self::upload_url(base_url)?,
        })
    }

    fn upload_url(base_url: &str) -> Result<Url, DriveError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| DriveError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut url = base
            .join(UPLOAD_PATH)
            .map_err(|e| DriveError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        url.query_pairs_mut().append_pair("uploadType", "multipart");
        Ok(url)
    }

    /// Borrow the client for calls made with one user's access token.
    pub fn authorize<'a>(&'a self, access_token: &'a str) -> AuthorizedDrive<'a> {
        AuthorizedDrive {
            client: self,
            access_token,
        }
    }
}

/// Drive client bound to a single delegated access token for the duration of a request
pub struct AuthorizedDrive<'a> {
    client: &'a DriveClient,
    access_token: &'a str,
}

impl AuthorizedDrive<'_> {
    /// Create a plain-text file with a single multipart upload. No retries.
    pub async fn create_text_file(&self, file: &TextFile) -> Result<CreatedFile, DriveError> {
        let boundary = format!("notes-{}", Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, file);

        let response = self
            .client
            .http
            .post(self.client.upload_url.clone())
            .bearer_auth(self.access_token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(DriveError::Remote { status, body: text });
        }

        let id = serde_json::from_str::<FileResource>(&text)
            .ok()
            .and_then(|resource| resource.id);
        tracing::info!("Created Drive file {:?} ({})", id, status);

        Ok(CreatedFile { status, id })
    }
}

/// Build a `multipart/related` payload: JSON metadata part, then the media part.
fn multipart_related_body(boundary: &str, file: &TextFile) -> String {
    let metadata = json!({
        "name": file.name,
        "mimeType": TEXT_MIME_TYPE,
    });

    format!(
        "--{b}\r\n\
         Content-Type: application/json; charset=UTF-8\r\n\r\n\
         {metadata}\r\n\
         --{b}\r\n\
         Content-Type: {mime}\r\n\r\n\
         {content}\r\n\
         --{b}--\r\n",
        b = boundary,
        metadata = metadata,
        mime = TEXT_MIME_TYPE,
        content = file.content,
    )
}
