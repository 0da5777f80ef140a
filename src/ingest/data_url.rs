use std::path::Path;

use base64::Engine;

use super::{IngestError, Result};

/// Guess a mime type from a file extension
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "rtf" => "application/rtf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "zip" => "application/zip",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Encode bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, payload)
}

/// Decode a base64 data URL into its mime type and bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| IngestError::InvalidDataUrl("missing data: prefix".to_string()))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| IngestError::InvalidDataUrl("missing ;base64, delimiter".to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| IngestError::InvalidDataUrl(format!("invalid base64: {}", e)))?;

    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_is_case_insensitive() {
        assert_eq!(guess_mime(Path::new("Photo.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("lecture.pdf")), "application/pdf");
        assert_eq!(guess_mime(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_decode_data_url() {
        let (mime, bytes) = decode_data_url("data:application/pdf;base64,JVBERg==").unwrap();
        assert_eq!(mime, "application/pdf");
        assert_eq!(bytes, b"%PDF");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_data_url("http://example.com/a.png").is_err());
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(decode_data_url("data:text/plain;base64,@@@").is_err());
    }
}
