use crate::ExportError;

/// Raw content of an export.
///
/// Text is stored as UTF-8, which is also what the browser produces when a
/// string is handed to the `Blob` constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Bytes(bytes) => bytes,
            Payload::Text(text) => text.as_bytes(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

/// A single file handed to the exporter. Built right before the export and
/// dropped after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Suggested save name, used verbatim.
    pub filename: String,
    pub payload: Payload,
    pub mime_type: String,
}

impl ExportRequest {
    pub fn new(
        filename: impl Into<String>,
        payload: impl Into<Payload>,
        mime_type: impl Into<String>,
    ) -> Self {
        ExportRequest {
            filename: filename.into(),
            payload: payload.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Rejects an empty filename. The exporter never calls this on its own;
    /// callers that want the check opt into it.
    pub fn checked(self) -> Result<Self, ExportError> {
        if self.filename.is_empty() {
            return Err(ExportError::EmptyFilename);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn text_payload_is_utf8() {
        let payload = Payload::from("grüße");
        assert_eq!("grüße".as_bytes(), payload.as_bytes());
        assert_eq!(7, payload.len());
    }

    #[wasm_bindgen_test]
    fn filename_is_kept_verbatim() {
        let request = ExportRequest::new("../odd name?.csv", "a", "text/csv");
        assert_eq!("../odd name?.csv", request.filename);
    }

    #[wasm_bindgen_test]
    fn checked_rejects_empty_filename() {
        let request = ExportRequest::new("", vec![1u8, 2, 3], "application/octet-stream");
        assert_eq!(Err(ExportError::EmptyFilename), request.checked());

        let request = ExportRequest::new("a.bin", Vec::new(), "application/octet-stream");
        assert!(request.checked().is_ok());
    }
}
