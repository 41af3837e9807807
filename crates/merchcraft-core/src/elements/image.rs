//! Image element content: uploaded pictures kept as data URIs.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// MIME types offered by the upload picker.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/bmp",
];

/// Image format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageFormat {
    /// Every supported format.
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::WebP,
        ImageFormat::Bmp,
    ];

    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    /// File extensions for the native file dialog filter.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::Gif => &["gif"],
            ImageFormat::WebP => &["webp"],
            ImageFormat::Bmp => &["bmp"],
        }
    }

    /// Look up a format from its MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mime_type() == mime)
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF8") {
            return Some(ImageFormat::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        if data.starts_with(b"BM") {
            return Some(ImageFormat::Bmp);
        }

        None
    }
}

/// Displayable payload of an uploaded picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Format sniffed from the file contents.
    pub format: ImageFormat,
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
}

impl ImagePayload {
    /// Encode raw file bytes. Returns None if the format is not recognized.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let format = ImageFormat::from_magic_bytes(data)?;
        Some(Self {
            format,
            data_uri: format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(data)),
        })
    }

    /// Get the raw file bytes back out of the data URI.
    pub fn decode_bytes(&self) -> Option<Vec<u8>> {
        let (_, encoded) = self.data_uri.split_once(";base64,")?;
        STANDARD.decode(encoded).ok()
    }

    /// Approximate size of the raw file in bytes.
    pub fn data_size(&self) -> usize {
        let encoded = self
            .data_uri
            .split_once(";base64,")
            .map_or(0, |(_, payload)| payload.len());
        // Base64 is ~4/3 the size of raw data
        encoded * 3 / 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::from_magic_bytes(&PNG_HEADER), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_magic_bytes(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_magic_bytes(b"BM\0\0\0\0"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_magic_bytes(b"%PDF-1.7"), None);
        assert_eq!(ImageFormat::from_magic_bytes(&[0x89]), None);
    }

    #[test]
    fn test_extension_and_mime_lookup() {
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_extension("svg"), None);
        assert_eq!(ImageFormat::from_mime("image/gif"), Some(ImageFormat::Gif));
        for mime in ACCEPTED_MIME_TYPES {
            assert!(ImageFormat::from_mime(mime).is_some(), "{mime} has no format");
        }
    }

    #[test]
    fn test_data_uri() {
        let payload = ImagePayload::from_bytes(&PNG_HEADER).unwrap();
        assert!(payload.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(payload.decode_bytes().unwrap(), PNG_HEADER.to_vec());
        assert!(ImagePayload::from_bytes(b"not an image").is_none());
    }
}
