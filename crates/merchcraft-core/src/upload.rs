//! Upload decoding and result tickets.
//!
//! Reading a picked file and encoding it to a data URI runs off the UI
//! thread. The controller hands out an [`UploadTicket`] before the work
//! starts and only applies a result that carries a ticket it issued.

use crate::elements::{ImageFormat, ImagePayload};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Recommended upload limit shown to the user.
pub const UPLOAD_GUIDANCE_BYTES: usize = 10 * 1024 * 1024;

/// Upload errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("file is empty")]
    Empty,
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("could not read file: {0}")]
    Read(String),
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Read(err.to_string())
    }
}

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Size restrictions for uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadLimits {
    /// Largest accepted file in bytes. None accepts anything.
    pub max_bytes: Option<usize>,
}

impl UploadLimits {
    /// No restriction.
    pub fn unlimited() -> Self {
        Self { max_bytes: None }
    }

    /// The 10 MB guidance limit.
    pub fn guidance() -> Self {
        Self {
            max_bytes: Some(UPLOAD_GUIDANCE_BYTES),
        }
    }

    /// Check a file size against the limit.
    pub fn check(&self, size: usize) -> UploadResult<()> {
        match self.max_bytes {
            Some(limit) if size > limit => Err(UploadError::TooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}

/// Encode raw file bytes into a displayable payload.
pub fn encode_upload(bytes: &[u8], limits: &UploadLimits) -> UploadResult<ImagePayload> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    limits.check(bytes.len())?;
    ImagePayload::from_bytes(bytes).ok_or(UploadError::UnsupportedFormat)
}

/// Read a file from disk and encode it.
pub fn read_upload(path: &Path, limits: &UploadLimits) -> UploadResult<ImagePayload> {
    let size = std::fs::metadata(path)?.len();
    limits.check(usize::try_from(size).unwrap_or(usize::MAX))?;

    let bytes = std::fs::read(path)?;
    let payload = encode_upload(&bytes, limits)?;
    log::debug!(
        "Encoded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        payload.format.mime_type()
    );
    Ok(payload)
}

/// File-dialog extensions for every accepted format.
pub fn accepted_extensions() -> Vec<&'static str> {
    ImageFormat::ALL
        .iter()
        .flat_map(|format| format.extensions().iter().copied())
        .collect()
}

/// Claim on the result of one in-flight upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket {
    pub(crate) instance: Uuid,
    pub(crate) sequence: u64,
}

impl UploadTicket {
    /// Designer instance that issued the ticket.
    pub fn instance(&self) -> Uuid {
        self.instance
    }
}
