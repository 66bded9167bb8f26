//! Frontend upload client

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use serde::Deserialize;

use crate::domain::ports::PushError;

/// Upload URI used with `--local` when none is configured
pub const DEFAULT_LOCAL_FRONTEND_URL: &str = "http://localhost:3001/upload";

/// Where packaged apps are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendEndpoints {
    /// Configured frontend upload URI
    pub frontend_url: Option<String>,
    /// Upload URI of a frontend running on this machine
    pub local_frontend_url: String,
}

impl Default for FrontendEndpoints {
    fn default() -> Self {
        Self {
            frontend_url: None,
            local_frontend_url: DEFAULT_LOCAL_FRONTEND_URL.to_string(),
        }
    }
}

impl FrontendEndpoints {
    /// Pick the upload URI for a push.
    pub fn upload_uri(&self, use_local: bool) -> Result<&str, PushError> {
        if use_local {
            return Ok(&self.local_frontend_url);
        }
        self.frontend_url
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| PushError::Request {
                uri: String::new(),
                message: "no frontend_url configured (set it in appix.toml or APPIX_FRONTEND_URL, or use --local)"
                    .to_string(),
            })
    }
}

#[derive(Debug, Default, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    links: UploadLinks,
}

#[derive(Debug, Default, Deserialize)]
struct UploadLinks {
    #[serde(default)]
    progress: Option<String>,
}

/// Extract the progress URI from an upload response body.
///
/// The frontend answers `{"links": {"progress": "<uri>"}}`.
pub fn parse_upload_response(body: &str) -> Result<String, PushError> {
    let response: UploadResponse = serde_json::from_str(body)
        .map_err(|e| PushError::InvalidUploadResponse(e.to_string()))?;

    match response.links.progress {
        Some(uri) if !uri.trim().is_empty() => Ok(uri.trim().to_string()),
        _ => Err(PushError::InvalidUploadResponse(
            "missing progress link".to_string(),
        )),
    }
}

/// Blocking HTTP client for the frontend.
pub struct FrontendClient {
    client: Client,
}

impl FrontendClient {
    pub fn new(request_timeout: Duration) -> Result<Self, PushError> {
        let client = Client::builder()
            .user_agent(format!("appix/{}", env!("CARGO_PKG_VERSION")))
            .timeout(request_timeout)
            .build()
            .map_err(|e| PushError::Request {
                uri: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Upload a zap for bundling. Returns the progress URI.
    pub fn upload(
        &self,
        uri: &str,
        zap: &Path,
        app_name: &str,
        verbose: bool,
    ) -> Result<String, PushError> {
        let request_failed = |e: reqwest::Error| PushError::Request {
            uri: uri.to_string(),
            message: e.to_string(),
        };

        if verbose {
            log::info!("Uploading the app to the frontend: {uri}");
        }

        let file_name = zap
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{app_name}.zap"));
        let part = multipart::Part::bytes(std::fs::read(zap)?)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(request_failed)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("name", app_name.to_string());

        let response = self
            .client
            .post(uri)
            .multipart(form)
            .send()
            .map_err(request_failed)?;

        let status = response.status();
        if verbose {
            log::info!("Frontend responded with status {status}");
        }
        if status != reqwest::StatusCode::OK {
            return Err(PushError::UploadStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(request_failed)?;
        log::trace!("upload response: {body}");
        let progress = parse_upload_response(&body)?;

        log::info!("The app has been uploaded to the frontend successfully.");
        Ok(progress)
    }
}
