//! Native file picking and off-thread upload decoding.

use merchcraft_core::elements::ImagePayload;
use merchcraft_core::upload::{UploadResult, accepted_extensions, read_upload};
use merchcraft_core::{UploadLimits, UploadTicket};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// A finished upload on its way back to the UI thread.
#[derive(Debug)]
pub struct UploadMessage {
    pub ticket: UploadTicket,
    pub result: UploadResult<ImagePayload>,
}

/// Show the native open dialog filtered to supported images.
pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Upload image")
        .add_filter("Images", accepted_extensions().as_slice())
        .pick_file()
}

/// Read and encode a file on a worker thread. The result is sent back
/// tagged with its ticket; a closed receiver just drops it.
pub fn spawn_upload(
    path: PathBuf,
    ticket: UploadTicket,
    limits: UploadLimits,
    tx: Sender<UploadMessage>,
) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("upload".to_string())
        .spawn(move || {
            let result = read_upload(&path, &limits);
            match &result {
                Ok(payload) => log::info!(
                    "Read {} ({} bytes)",
                    display_name(&path),
                    payload.data_size()
                ),
                Err(err) => log::warn!("Upload of {} failed: {err}", display_name(&path)),
            }
            if tx.send(UploadMessage { ticket, result }).is_err() {
                log::debug!("Upload finished after the app stopped listening");
            }
        })?;
    Ok(())
}

/// File name for log lines.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
