// Probe adapter - Builds a video file descriptor from a local path

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::VideoFile;

/// Bytes read from the head of a file for content sniffing
const SNIFF_LEN: u64 = 8192;

/// Reported when the content matches no known signature
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Describe the file at `path`: name, size and sniffed MIME type.
///
/// The file is not validated here; that is the workflow's job.
pub async fn probe_video_file(path: &Path) -> Result<VideoFile, DomainError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| DomainError::FsFail(format!("{}: {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(DomainError::FsFail(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| DomainError::FsFail(format!("{}: {}", path.display(), e)))?;
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut head)
        .await
        .map_err(|e| DomainError::FsFail(format!("{}: {}", path.display(), e)))?;

    let mime_type = sniff_mime(&head);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %name, size = metadata.len(), mime = mime_type, "Probed local file");
    Ok(VideoFile::new(name, mime_type, metadata.len(), path))
}

/// MIME type from magic bytes
pub fn sniff_mime(head: &[u8]) -> &'static str {
    infer::get(head)
        .map(|kind| kind.mime_type())
        .unwrap_or(UNKNOWN_MIME)
}
