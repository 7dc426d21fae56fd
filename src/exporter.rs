use anyhow::Context;
use log::{debug, error};

use crate::{ExportError, ExportRequest, Host, Payload, SaveStrategy, TriggerDownload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyPreference {
    Auto,
    Native,
    AnchorTrigger,
}

impl Default for StrategyPreference {
    fn default() -> Self {
        StrategyPreference::Auto
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub strategy: StrategyPreference,
    /// Revoke the object URL once the anchor has been clicked and detached.
    pub revoke_object_url: bool,
    pub hide_anchor: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            strategy: StrategyPreference::Auto,
            revoke_object_url: true,
            hide_anchor: true,
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid export config")
    }
}

/// Presents in-memory bytes to the user as a downloaded file.
///
/// Every export is independent: the exporter keeps no state between calls
/// beyond the host and its configuration.
pub struct FileExporter<H> {
    host: H,
    config: ExportConfig,
}

impl<H: Host> FileExporter<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, ExportConfig::default())
    }

    pub fn with_config(host: H, config: ExportConfig) -> Self {
        FileExporter { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Fire-and-forget export. Whether the user saves, cancels, or the host
    /// refuses is not observable; host faults are only logged.
    pub fn export_file(&self, filename: &str, payload: impl Into<Payload>, mime_type: &str) {
        self.export(&ExportRequest::new(filename, payload, mime_type));
    }

    pub fn export(&self, request: &ExportRequest) {
        if let Err(err) = self.try_export(request) {
            error!("Export of {} failed: {}", request.filename, err);
        }
    }

    /// Same as [`export`](Self::export) but hands host faults back to the
    /// caller. Nothing is retried.
    pub fn try_export(&self, request: &ExportRequest) -> Result<(), ExportError> {
        let strategy = SaveStrategy::select(&self.host, &self.config);
        debug!(
            "Exporting {} ({} bytes, {}) via {}",
            request.filename,
            request.payload.len(),
            request.mime_type,
            strategy.name()
        );

        let blob = self
            .host
            .create_blob(request.payload.as_bytes(), &request.mime_type)?;
        strategy.trigger(&self.host, &blob, &request.filename)
    }
}
