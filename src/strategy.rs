use log::warn;

use crate::{ExportConfig, ExportError, Host, StrategyPreference};

/// Hands a blob to the host under a suggested filename.
pub trait TriggerDownload {
    fn trigger<H: Host>(&self, host: &H, blob: &H::Blob, filename: &str) -> Result<(), ExportError>;
}

/// Delegates to the host's own "save blob" call. No DOM involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeSaveStrategy;

impl TriggerDownload for NativeSaveStrategy {
    fn trigger<H: Host>(&self, host: &H, blob: &H::Blob, filename: &str) -> Result<(), ExportError> {
        host.native_save(blob, filename)
    }
}

/// Points a throwaway anchor at an object URL for the blob and clicks it.
///
/// The anchor is attached before the click and detached after it, even when
/// the click fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorTriggerStrategy {
    pub hide_anchor: bool,
    pub revoke_object_url: bool,
}

impl Default for AnchorTriggerStrategy {
    fn default() -> Self {
        AnchorTriggerStrategy {
            hide_anchor: true,
            revoke_object_url: true,
        }
    }
}

impl AnchorTriggerStrategy {
    fn click_through<H: Host>(&self, host: &H, url: &str, filename: &str) -> Result<(), ExportError> {
        let anchor = host.create_anchor()?;
        host.set_anchor_target(&anchor, url, filename)?;
        if self.hide_anchor {
            host.hide_anchor(&anchor)?;
        }

        host.attach_anchor(&anchor)?;
        let activated = host.activate_anchor(&anchor);
        let detached = host.detach_anchor(&anchor);
        activated.and(detached)
    }
}

impl TriggerDownload for AnchorTriggerStrategy {
    fn trigger<H: Host>(&self, host: &H, blob: &H::Blob, filename: &str) -> Result<(), ExportError> {
        let url = host.create_object_url(blob)?;
        let result = self.click_through(host, &url, filename);

        if self.revoke_object_url {
            if let Err(error) = host.revoke_object_url(&url) {
                warn!("Leaking object url {}: {}", url, error);
            }
        }
        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStrategy {
    Native(NativeSaveStrategy),
    AnchorTrigger(AnchorTriggerStrategy),
}

impl SaveStrategy {
    /// Picks the strategy for one export. `Auto` follows the host's
    /// capability flag; the other preferences override it.
    pub fn select<H: Host>(host: &H, config: &ExportConfig) -> Self {
        let native = match config.strategy {
            StrategyPreference::Auto => host.supports_native_save(),
            StrategyPreference::Native => true,
            StrategyPreference::AnchorTrigger => false,
        };

        if native {
            SaveStrategy::Native(NativeSaveStrategy)
        } else {
            SaveStrategy::AnchorTrigger(AnchorTriggerStrategy {
                hide_anchor: config.hide_anchor,
                revoke_object_url: config.revoke_object_url,
            })
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SaveStrategy::Native(_) => "native save",
            SaveStrategy::AnchorTrigger(_) => "anchor trigger",
        }
    }
}

impl TriggerDownload for SaveStrategy {
    fn trigger<H: Host>(&self, host: &H, blob: &H::Blob, filename: &str) -> Result<(), ExportError> {
        match self {
            SaveStrategy::Native(strategy) => strategy.trigger(host, blob, filename),
            SaveStrategy::AnchorTrigger(strategy) => strategy.trigger(host, blob, filename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HostEvent, HostStep, RecordingHost};
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn auto_follows_capability() {
        let config = ExportConfig::default();

        assert_eq!(
            SaveStrategy::Native(NativeSaveStrategy),
            SaveStrategy::select(&RecordingHost::with_native_save(), &config)
        );
        assert_eq!(
            SaveStrategy::AnchorTrigger(AnchorTriggerStrategy::default()),
            SaveStrategy::select(&RecordingHost::new(), &config)
        );
    }

    #[wasm_bindgen_test]
    fn preference_overrides_capability() {
        let config = ExportConfig {
            strategy: StrategyPreference::AnchorTrigger,
            ..ExportConfig::default()
        };
        let strategy = SaveStrategy::select(&RecordingHost::with_native_save(), &config);
        assert_eq!("anchor trigger", strategy.name());

        let config = ExportConfig {
            strategy: StrategyPreference::Native,
            ..ExportConfig::default()
        };
        let strategy = SaveStrategy::select(&RecordingHost::new(), &config);
        assert_eq!("native save", strategy.name());
    }

    #[wasm_bindgen_test]
    fn anchor_sequence_order() {
        let host = RecordingHost::new();
        let blob = host.create_blob(b"abc", "text/plain").unwrap();
        AnchorTriggerStrategy::default()
            .trigger(&host, &blob, "abc.txt")
            .unwrap();

        let events = host.events();
        let url = match &events[1] {
            HostEvent::ObjectUrlCreated { url, .. } => url.clone(),
            other => panic!("unexpected event {:?}", other),
        };
        let anchor = match &events[2] {
            HostEvent::AnchorCreated { anchor } => *anchor,
            other => panic!("unexpected event {:?}", other),
        };
        assert_eq!(
            &events[3..],
            &[
                HostEvent::AnchorTargetSet {
                    anchor,
                    href: url.clone(),
                    download: "abc.txt".to_string(),
                },
                HostEvent::AnchorHidden { anchor },
                HostEvent::AnchorAttached { anchor },
                HostEvent::AnchorActivated {
                    anchor,
                    attached: true,
                },
                HostEvent::AnchorDetached { anchor },
                HostEvent::ObjectUrlRevoked { url },
            ][..]
        );
    }

    #[wasm_bindgen_test]
    fn failed_activation_still_detaches_and_revokes() {
        let host = RecordingHost::new().failing_at(HostStep::ActivateAnchor);
        let blob = host.create_blob(b"abc", "text/plain").unwrap();
        let error = AnchorTriggerStrategy::default()
            .trigger(&host, &blob, "abc.txt")
            .unwrap_err();

        assert_eq!(Some(HostStep::ActivateAnchor), error.step());
        assert_eq!(0, host.attached_anchors());
        assert!(host.live_object_urls().is_empty());
        assert!(host.downloads().is_empty());
    }

    #[wasm_bindgen_test]
    fn revoke_failure_does_not_fail_download() {
        let host = RecordingHost::new().failing_at(HostStep::RevokeObjectUrl);
        let blob = host.create_blob(b"abc", "text/plain").unwrap();
        AnchorTriggerStrategy::default()
            .trigger(&host, &blob, "abc.txt")
            .unwrap();

        assert_eq!(1, host.downloads().len());
        assert_eq!(1, host.live_object_urls().len());
    }

    #[wasm_bindgen_test]
    fn keeps_url_and_visibility_when_configured() {
        let host = RecordingHost::new();
        let blob = host.create_blob(b"abc", "text/plain").unwrap();
        let strategy = AnchorTriggerStrategy {
            hide_anchor: false,
            revoke_object_url: false,
        };
        strategy.trigger(&host, &blob, "abc.txt").unwrap();

        assert!(!host
            .events()
            .iter()
            .any(|event| matches!(event, HostEvent::AnchorHidden { .. })));
        assert_eq!(1, host.live_object_urls().len());
    }
}
