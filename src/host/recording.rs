use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::Host;
use crate::{ExportError, HostStep};

/// One call made against a [`RecordingHost`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    BlobCreated {
        blob: usize,
        bytes: Vec<u8>,
        mime_type: String,
    },
    NativeSave {
        blob: usize,
        filename: String,
    },
    ObjectUrlCreated {
        blob: usize,
        url: String,
    },
    ObjectUrlRevoked {
        url: String,
    },
    AnchorCreated {
        anchor: usize,
    },
    AnchorTargetSet {
        anchor: usize,
        href: String,
        download: String,
    },
    AnchorHidden {
        anchor: usize,
    },
    AnchorAttached {
        anchor: usize,
    },
    AnchorActivated {
        anchor: usize,
        attached: bool,
    },
    AnchorDetached {
        anchor: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBlob {
    pub id: usize,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedAnchor {
    pub id: usize,
}

/// A download the host would have started, reconstructed from the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub native: bool,
}

#[derive(Default)]
struct State {
    next_id: usize,
    events: Vec<HostEvent>,
    blobs: BTreeMap<usize, RecordedBlob>,
    urls: BTreeMap<String, usize>,
    live_urls: BTreeSet<String>,
    attached: BTreeSet<usize>,
}

impl State {
    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory [`Host`] that records every call instead of touching a page.
///
/// It can pretend to offer the native save call and can be told to fail at a
/// given step, which is how the exporter's error paths are exercised.
#[derive(Default)]
pub struct RecordingHost {
    native_save: bool,
    fail_at: Option<HostStep>,
    state: RefCell<State>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native_save() -> Self {
        RecordingHost {
            native_save: true,
            ..Self::default()
        }
    }

    pub fn failing_at(mut self, step: HostStep) -> Self {
        self.fail_at = Some(step);
        self
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.state.borrow().events.clone()
    }

    pub fn attached_anchors(&self) -> usize {
        self.state.borrow().attached.len()
    }

    pub fn live_object_urls(&self) -> Vec<String> {
        self.state.borrow().live_urls.iter().cloned().collect()
    }

    pub fn anchors_created(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|event| matches!(event, HostEvent::AnchorCreated { .. }))
            .count()
    }

    /// Downloads the host would have started: native saves, plus activations
    /// of anchors that were attached to the document at the time.
    pub fn downloads(&self) -> Vec<RecordedDownload> {
        let state = self.state.borrow();
        let mut targets: BTreeMap<usize, (String, String)> = BTreeMap::new();
        let mut downloads = Vec::new();

        for event in &state.events {
            match event {
                HostEvent::NativeSave { blob, filename } => {
                    if let Some(blob) = state.blobs.get(blob) {
                        downloads.push(RecordedDownload {
                            filename: filename.clone(),
                            bytes: blob.bytes.clone(),
                            mime_type: blob.mime_type.clone(),
                            native: true,
                        });
                    }
                }
                HostEvent::AnchorTargetSet {
                    anchor,
                    href,
                    download,
                } => {
                    targets.insert(*anchor, (href.clone(), download.clone()));
                }
                HostEvent::AnchorActivated {
                    anchor,
                    attached: true,
                } => {
                    let blob = targets
                        .get(anchor)
                        .and_then(|(href, filename)| Some((state.urls.get(href)?, filename)))
                        .and_then(|(id, filename)| Some((state.blobs.get(id)?, filename)));
                    if let Some((blob, filename)) = blob {
                        downloads.push(RecordedDownload {
                            filename: filename.clone(),
                            bytes: blob.bytes.clone(),
                            mime_type: blob.mime_type.clone(),
                            native: false,
                        });
                    }
                }
                _ => {}
            }
        }
        downloads
    }

    fn check(&self, step: HostStep) -> Result<(), ExportError> {
        if self.fail_at == Some(step) {
            return Err(ExportError::host(step, "injected failure"));
        }
        Ok(())
    }

    fn record(&self, event: HostEvent) {
        self.state.borrow_mut().events.push(event);
    }
}

impl Host for RecordingHost {
    type Blob = RecordedBlob;
    type Anchor = RecordedAnchor;

    fn supports_native_save(&self) -> bool {
        self.native_save
    }

    fn create_blob(&self, bytes: &[u8], mime_type: &str) -> Result<RecordedBlob, ExportError> {
        self.check(HostStep::CreateBlob)?;
        let mut state = self.state.borrow_mut();
        let blob = RecordedBlob {
            id: state.next_id(),
            bytes: bytes.to_vec(),
            mime_type: mime_type.to_owned(),
        };
        state.events.push(HostEvent::BlobCreated {
            blob: blob.id,
            bytes: blob.bytes.clone(),
            mime_type: blob.mime_type.clone(),
        });
        state.blobs.insert(blob.id, blob.clone());
        Ok(blob)
    }

    fn native_save(&self, blob: &RecordedBlob, filename: &str) -> Result<(), ExportError> {
        self.check(HostStep::NativeSave)?;
        if !self.native_save {
            return Err(ExportError::host(
                HostStep::NativeSave,
                "not supported by this host",
            ));
        }
        self.record(HostEvent::NativeSave {
            blob: blob.id,
            filename: filename.to_owned(),
        });
        Ok(())
    }

    fn create_object_url(&self, blob: &RecordedBlob) -> Result<String, ExportError> {
        self.check(HostStep::CreateObjectUrl)?;
        let mut state = self.state.borrow_mut();
        let url = format!("blob:recording/{}", state.next_id());
        state.urls.insert(url.clone(), blob.id);
        state.live_urls.insert(url.clone());
        state.events.push(HostEvent::ObjectUrlCreated {
            blob: blob.id,
            url: url.clone(),
        });
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) -> Result<(), ExportError> {
        self.check(HostStep::RevokeObjectUrl)?;
        let mut state = self.state.borrow_mut();
        state.live_urls.remove(url);
        state.events.push(HostEvent::ObjectUrlRevoked {
            url: url.to_owned(),
        });
        Ok(())
    }

    fn create_anchor(&self) -> Result<RecordedAnchor, ExportError> {
        self.check(HostStep::CreateAnchor)?;
        let mut state = self.state.borrow_mut();
        let anchor = RecordedAnchor {
            id: state.next_id(),
        };
        state
            .events
            .push(HostEvent::AnchorCreated { anchor: anchor.id });
        Ok(anchor)
    }

    fn set_anchor_target(
        &self,
        anchor: &RecordedAnchor,
        href: &str,
        download: &str,
    ) -> Result<(), ExportError> {
        self.check(HostStep::SetAnchorTarget)?;
        self.record(HostEvent::AnchorTargetSet {
            anchor: anchor.id,
            href: href.to_owned(),
            download: download.to_owned(),
        });
        Ok(())
    }

    fn hide_anchor(&self, anchor: &RecordedAnchor) -> Result<(), ExportError> {
        self.check(HostStep::HideAnchor)?;
        self.record(HostEvent::AnchorHidden { anchor: anchor.id });
        Ok(())
    }

    fn attach_anchor(&self, anchor: &RecordedAnchor) -> Result<(), ExportError> {
        self.check(HostStep::AttachAnchor)?;
        let mut state = self.state.borrow_mut();
        state.attached.insert(anchor.id);
        state
            .events
            .push(HostEvent::AnchorAttached { anchor: anchor.id });
        Ok(())
    }

    fn activate_anchor(&self, anchor: &RecordedAnchor) -> Result<(), ExportError> {
        self.check(HostStep::ActivateAnchor)?;
        let mut state = self.state.borrow_mut();
        let attached = state.attached.contains(&anchor.id);
        state.events.push(HostEvent::AnchorActivated {
            anchor: anchor.id,
            attached,
        });
        Ok(())
    }

    fn detach_anchor(&self, anchor: &RecordedAnchor) -> Result<(), ExportError> {
        self.check(HostStep::DetachAnchor)?;
        let mut state = self.state.borrow_mut();
        state.attached.remove(&anchor.id);
        state
            .events
            .push(HostEvent::AnchorDetached { anchor: anchor.id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn activation_of_detached_anchor_is_not_a_download() {
        let host = RecordingHost::new();
        let blob = host.create_blob(b"x", "text/plain").unwrap();
        let url = host.create_object_url(&blob).unwrap();
        let anchor = host.create_anchor().unwrap();
        host.set_anchor_target(&anchor, &url, "x.txt").unwrap();
        host.activate_anchor(&anchor).unwrap();

        assert!(host.downloads().is_empty());

        host.attach_anchor(&anchor).unwrap();
        host.activate_anchor(&anchor).unwrap();
        host.detach_anchor(&anchor).unwrap();

        assert_eq!(1, host.downloads().len());
        assert_eq!(0, host.attached_anchors());
    }

    #[wasm_bindgen_test]
    fn injected_failure_records_nothing() {
        let host = RecordingHost::new().failing_at(HostStep::CreateBlob);
        let error = host.create_blob(b"x", "text/plain").unwrap_err();

        assert_eq!(Some(HostStep::CreateBlob), error.step());
        assert!(host.events().is_empty());
    }

    #[wasm_bindgen_test]
    fn native_save_requires_capability() {
        let host = RecordingHost::new();
        let blob = host.create_blob(b"x", "text/plain").unwrap();

        assert!(host.native_save(&blob, "x.txt").is_err());
        assert!(host.downloads().is_empty());
    }
}
