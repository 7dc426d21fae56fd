use std::fmt;

use wasm_bindgen::JsValue;

/// The host call that was being made when an export failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStep {
    CreateBlob,
    NativeSave,
    CreateObjectUrl,
    RevokeObjectUrl,
    CreateAnchor,
    SetAnchorTarget,
    HideAnchor,
    AttachAnchor,
    ActivateAnchor,
    DetachAnchor,
}

impl HostStep {
    pub fn as_str(self) -> &'static str {
        match self {
            HostStep::CreateBlob => "create blob",
            HostStep::NativeSave => "native save",
            HostStep::CreateObjectUrl => "create object url",
            HostStep::RevokeObjectUrl => "revoke object url",
            HostStep::CreateAnchor => "create anchor",
            HostStep::SetAnchorTarget => "set anchor target",
            HostStep::HideAnchor => "hide anchor",
            HostStep::AttachAnchor => "attach anchor",
            HostStep::ActivateAnchor => "activate anchor",
            HostStep::DetachAnchor => "detach anchor",
        }
    }
}

impl fmt::Display for HostStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Only produced by [`ExportRequest::checked`](crate::ExportRequest::checked).
    EmptyFilename,
    /// The window or document could not be reached.
    HostUnavailable(String),
    Host { step: HostStep, message: String },
}

impl ExportError {
    pub fn host(step: HostStep, message: impl Into<String>) -> Self {
        ExportError::Host {
            step,
            message: message.into(),
        }
    }

    /// Maps a thrown JS value into a host fault for `step`.
    pub(crate) fn js(step: HostStep) -> impl FnOnce(JsValue) -> Self {
        move |value| ExportError::host(step, format!("{:?}", value))
    }

    pub fn step(&self) -> Option<HostStep> {
        match self {
            ExportError::Host { step, .. } => Some(*step),
            _ => None,
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyFilename => f.write_str("export filename is empty"),
            ExportError::HostUnavailable(what) => write!(f, "{} not available", what),
            ExportError::Host { step, message } => write!(f, "{} failed: {}", step, message),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<ExportError> for JsValue {
    fn from(error: ExportError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}
