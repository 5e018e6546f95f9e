//! HTTP client for the extraction backend. The backend is opaque: one
//! multipart upload endpoint plus two small GET endpoints for health and
//! format discovery.

use std::time::Duration;

use futures_util::StreamExt;

use crate::core::{
    models::SupportedFormats,
    ExtractionResult,
    RefscanError,
    SelectedFile,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Ceiling documented by the backend for OCR + LLM analysis of large files.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

pub type ProgressCallback = Box<dyn Fn(u8) + Send + Sync>;

fn http_client() -> Result<reqwest::Client, RefscanError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| RefscanError::Custom(format!("HTTP client build failed: {e}")))
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub async fn health_check(base_url: &str) -> Result<(), RefscanError> {
    http_client()?.get(endpoint(base_url, "/")).send().await?.error_for_status()?;
    Ok(())
}

/// Asks the backend which formats it accepts, falling back to the built-in
/// list when the backend is unreachable.
pub async fn supported_formats(base_url: &str) -> SupportedFormats {
    match fetch_supported_formats(base_url).await {
        Ok(formats) => formats,
        Err(e) => {
            eprintln!("Failed to fetch supported formats: {}", e);
            SupportedFormats::default()
        }
    }
}

async fn fetch_supported_formats(base_url: &str) -> Result<SupportedFormats, RefscanError> {
    let formats = http_client()?
        .get(endpoint(base_url, "supported-formats"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(formats)
}

/// Uploads `file` as the single multipart `file` field and decodes the
/// structured result. The file is streamed in chunks so `progress` can report
/// percent-complete as the body is consumed.
pub async fn upload(
    base_url: &str,
    file: &SelectedFile,
    progress: Option<ProgressCallback>,
) -> Result<ExtractionResult, RefscanError> {
    let bytes = tokio::fs::read(&file.path).await?;
    let total = bytes.len() as u64;

    let chunks: Vec<Vec<u8>> =
        bytes.chunks(UPLOAD_CHUNK_SIZE).map(|chunk| chunk.to_vec()).collect();

    let mut sent: u64 = 0;
    let body_stream = futures_util::stream::iter(chunks).map(move |chunk: Vec<u8>| {
        sent += chunk.len() as u64;
        if let Some(callback) = progress.as_ref() {
            callback(((sent * 100) / total.max(1)).min(100) as u8);
        }
        Ok::<Vec<u8>, std::io::Error>(chunk)
    });

    let part =
        reqwest::multipart::Part::stream_with_length(reqwest::Body::wrap_stream(body_stream), total)
            .file_name(file.name.clone())
            .mime_str(file.file_type.mime())?;

    let form = reqwest::multipart::Form::new().part("file", part);

    let response =
        http_client()?.post(endpoint(base_url, "upload")).multipart(form).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(RefscanError::Backend(backend_detail(&body).unwrap_or_else(|| {
            format!("Upload failed with status {}", status)
        })));
    }

    Ok(response.json::<ExtractionResult>().await?)
}

/// Pulls the human-readable message out of an error body. The backend sends
/// either FastAPI-style `{"detail": ...}` or its own `{"error": ...}` shape.
fn backend_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("error"))
        .and_then(|detail| detail.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(endpoint("http://localhost:8000", "upload"), "http://localhost:8000/upload");
        assert_eq!(endpoint("http://localhost:8000/", "/upload"), "http://localhost:8000/upload");
        assert_eq!(endpoint("http://localhost:8000", "/"), "http://localhost:8000/");
    }

    #[test]
    fn test_backend_detail_shapes() {
        assert_eq!(
            backend_detail(r#"{"detail": "Text extraction failed"}"#).as_deref(),
            Some("Text extraction failed")
        );
        assert_eq!(
            backend_detail(r#"{"job_id": "x", "error": "Could not extract sufficient text from document"}"#)
                .as_deref(),
            Some("Could not extract sufficient text from document")
        );
        assert_eq!(backend_detail("<html>502</html>"), None);
    }
}
