// HTTP transfer adapter - Multipart submission to the processing service using reqwest

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode, Url};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::adapters::toml_config::ClientConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Form field carrying the raw video bytes
pub const VIDEO_FIELD: &str = "video";
/// Form field carrying the settings JSON
pub const SETTINGS_FIELD: &str = "settings";

/// Body returned by the processing endpoint
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    success: Option<bool>,
    error: Option<String>,
    download_url: Option<String>,
    file_size: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<f64>,
}

impl ServiceResponse {
    fn into_result(self) -> Result<ProcessingResult, TransferError> {
        if self.success != Some(true) {
            return Err(TransferError::rejected(self.error));
        }

        Ok(ProcessingResult {
            download_url: required(self.download_url, "download_url")?,
            file_size: required(self.file_size, "file_size")?,
            width: required(self.width, "width")?,
            height: required(self.height, "height")?,
            duration: required(self.duration, "duration")?,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, TransferError> {
    value.ok_or_else(|| TransferError::MalformedResponse(format!("missing field `{}`", field)))
}

/// Interpret a service answer.
///
/// A non-success status wins over whatever the body says.
pub fn interpret_response(status: u16, body: &str) -> Result<ProcessingResult, TransferError> {
    let status = StatusCode::from_u16(status)
        .map_err(|e| TransferError::MalformedResponse(format!("invalid status: {}", e)))?;
    if !status.is_success() {
        return Err(TransferError::Status(status.as_u16()));
    }
    interpret_body(body)
}

fn interpret_body(body: &str) -> Result<ProcessingResult, TransferError> {
    let response: ServiceResponse = serde_json::from_str(body)
        .map_err(|e| TransferError::MalformedResponse(e.to_string()))?;
    response.into_result()
}

/// reqwest-backed client for the processing service
pub struct HttpTransferAdapter {
    client: Client,
    endpoint: Url,
}

impl HttpTransferAdapter {
    /// Create new HTTP transfer adapter from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, DomainError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            DomainError::ConfigFail(format!("Invalid endpoint '{}': {}", config.endpoint, e))
        })?;

        // Only the connect phase is bounded; processing may take arbitrarily long.
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigFail(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve a download reference, which may be relative to the endpoint
    pub fn resolve_url(&self, download_url: &str) -> Result<Url, TransferError> {
        self.endpoint.join(download_url).map_err(|e| {
            TransferError::MalformedResponse(format!(
                "invalid download url '{}': {}",
                download_url, e
            ))
        })
    }

    /// Fetch the processed artifact and write it to `destination`.
    ///
    /// Returns the number of bytes written.
    pub async fn fetch_artifact(
        &self,
        download_url: &str,
        destination: &Path,
    ) -> Result<u64, TransferError> {
        let url = self.resolve_url(download_url)?;
        info!(%url, destination = %destination.display(), "Downloading artifact");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransferError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Artifact download refused");
            return Err(TransferError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransferError::Transport(e.to_string()))?;
        tokio::fs::write(destination, &bytes)
            .await
            .map_err(|e| TransferError::Io(format!("{}: {}", destination.display(), e)))?;

        Ok(bytes.len() as u64)
    }

    /// Assemble the upload; the video is streamed from disk, not buffered
    async fn build_form(
        &self,
        file: &VideoFile,
        settings: &Settings,
    ) -> Result<Form, TransferError> {
        let source = tokio::fs::File::open(&file.path)
            .await
            .map_err(|e| TransferError::Io(format!("{}: {}", file.path.display(), e)))?;
        let length = source
            .metadata()
            .await
            .map_err(|e| TransferError::Io(format!("{}: {}", file.path.display(), e)))?
            .len();
        let settings_json = settings
            .to_json()
            .map_err(|e| TransferError::Encoding(e.to_string()))?;

        let body = Body::wrap_stream(ReaderStream::new(source));
        let video = Part::stream_with_length(body, length)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| TransferError::Encoding(e.to_string()))?;

        Ok(Form::new()
            .part(VIDEO_FIELD, video)
            .text(SETTINGS_FIELD, settings_json))
    }
}

#[async_trait]
impl TransferPort for HttpTransferAdapter {
    async fn submit(
        &self,
        file: &VideoFile,
        settings: &Settings,
    ) -> Result<ProcessingResult, TransferError> {
        let form = self.build_form(file, settings).await?;
        let started = Instant::now();

        debug!(
            endpoint = %self.endpoint,
            file = %file.name,
            size = file.size,
            "Submitting video"
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransferError::Transport(e.to_string()))?;

        let status = response.status();
        info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Processing service responded"
        );

        let body = response
            .text()
            .await
            .map_err(|e| TransferError::Transport(e.to_string()))?;
        interpret_response(status.as_u16(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let body = r#"{"success": true, "download_url": "/download/out.mp4",
            "file_size": 1048576, "width": 1920, "height": 1080, "duration": 12.7}"#;
        let result = interpret_response(200, body).unwrap();
        assert_eq!(result.download_url, "/download/out.mp4");
        assert_eq!(result.file_size, 1_048_576);
        assert_eq!((result.width, result.height), (1920, 1080));
        assert_eq!(result.duration, 12.7);
    }

    #[test]
    fn test_error_status_ignores_body() {
        let body = r#"{"success": true, "download_url": "/x", "file_size": 1,
            "width": 1, "height": 1, "duration": 1}"#;
        assert_eq!(interpret_response(500, body), Err(TransferError::Status(500)));
        assert_eq!(interpret_response(404, "not json"), Err(TransferError::Status(404)));
        assert_eq!(TransferError::Status(502).to_string(), "processing error");
    }

    #[test]
    fn test_application_failure() {
        assert_eq!(
            interpret_response(200, r#"{"success": false, "error": "codec unsupported"}"#),
            Err(TransferError::Rejected("codec unsupported".to_string()))
        );
        assert_eq!(
            interpret_response(200, r#"{"success": false}"#),
            Err(TransferError::Rejected("unknown error".to_string()))
        );
        assert_eq!(
            interpret_response(200, r#"{"error": ""}"#),
            Err(TransferError::Rejected("unknown error".to_string()))
        );
    }

    #[test]
    fn test_null_success_is_rejection() {
        assert_eq!(
            interpret_response(200, r#"{"success": null, "error": "busy"}"#),
            Err(TransferError::Rejected("busy".to_string()))
        );
        assert_eq!(
            interpret_response(200, r#"{"success": null, "error": null}"#),
            Err(TransferError::Rejected("unknown error".to_string()))
        );
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            interpret_response(200, "<html>oops</html>"),
            Err(TransferError::MalformedResponse(_))
        ));
        assert!(matches!(
            interpret_response(200, r#"{"success": true, "download_url": "/x"}"#),
            Err(TransferError::MalformedResponse(msg)) if msg.contains("file_size")
        ));
    }

    #[test]
    fn test_resolve_relative_download_url() {
        let config = ClientConfig {
            endpoint: "http://media.local:8000/api/process".to_string(),
            ..ClientConfig::default()
        };
        let adapter = HttpTransferAdapter::new(&config).unwrap();

        assert_eq!(
            adapter.resolve_url("/download/out.mp4").unwrap().as_str(),
            "http://media.local:8000/download/out.mp4"
        );
        assert_eq!(
            adapter.resolve_url("https://cdn.example.com/a.mp4").unwrap().as_str(),
            "https://cdn.example.com/a.mp4"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = ClientConfig {
            endpoint: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpTransferAdapter::new(&config),
            Err(DomainError::ConfigFail(_))
        ));
    }
}
