mod browser;
mod recording;

pub use browser::BrowserHost;
pub use recording::{HostEvent, RecordedAnchor, RecordedBlob, RecordedDownload, RecordingHost};

use crate::ExportError;

/// The environment an export runs in.
///
/// Everything the exporter needs from the browser goes through this trait, so
/// the download sequence can be driven against a fake just as well as against
/// a real window.
pub trait Host {
    type Blob;
    type Anchor;

    /// Whether the host offers a native "save or open blob" call.
    fn supports_native_save(&self) -> bool;

    fn create_blob(&self, bytes: &[u8], mime_type: &str) -> Result<Self::Blob, ExportError>;

    fn native_save(&self, blob: &Self::Blob, filename: &str) -> Result<(), ExportError>;

    fn create_object_url(&self, blob: &Self::Blob) -> Result<String, ExportError>;

    fn revoke_object_url(&self, url: &str) -> Result<(), ExportError>;

    /// Creates an anchor that is not attached to the document yet.
    fn create_anchor(&self) -> Result<Self::Anchor, ExportError>;

    fn set_anchor_target(
        &self,
        anchor: &Self::Anchor,
        href: &str,
        download: &str,
    ) -> Result<(), ExportError>;

    fn hide_anchor(&self, anchor: &Self::Anchor) -> Result<(), ExportError>;

    fn attach_anchor(&self, anchor: &Self::Anchor) -> Result<(), ExportError>;

    fn activate_anchor(&self, anchor: &Self::Anchor) -> Result<(), ExportError>;

    fn detach_anchor(&self, anchor: &Self::Anchor) -> Result<(), ExportError>;
}
