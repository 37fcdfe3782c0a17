//! Inline image encoding.
//!
//! Uploaded images are stored inside the listing itself as
//! `data:<mime>;base64,<payload>` URLs, since the only persistence is the
//! key-value store.

#[cfg(test)]
#[path = "image_test.rs"]
mod image_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file picked in the sell form, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type reported by the picker; may be empty.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(file_name: &str, mime: &str, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.to_owned(), mime: mime.to_owned(), bytes }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Encode as an inline `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        let mime = if self.mime.trim().is_empty() { sniff_mime(&self.file_name, &self.bytes) } else { self.mime.trim() };
        to_data_url(&self.bytes, mime)
    }
}

#[must_use]
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Guess an image MIME type from magic bytes, then the file extension.
#[must_use]
pub fn sniff_mime(file_name: &str, bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return "image/png";
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }
    if bytes.starts_with(b"GIF8") {
        return "image/gif";
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return "image/webp";
    }
    let ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

/// Split the comma-separated image URL field into trimmed, non-empty URLs.
#[must_use]
pub fn split_image_urls(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}
