use js_sys::{Array, Function, Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Navigator, Url, Window};

use super::Host;
use crate::{ExportError, HostStep};

// Older Edge and IE expose these on `navigator` instead of honouring `download`.
const NATIVE_SAVE_PROBE: &str = "msSaveOrOpenBlob";
const NATIVE_SAVE_CALL: &str = "msSaveBlob";

/// [`Host`] backed by a real browser window.
pub struct BrowserHost {
    navigator: Navigator,
    document: Document,
    native_save: Option<Function>,
}

impl BrowserHost {
    pub fn current() -> Result<Self, ExportError> {
        let window = web_sys::window()
            .ok_or_else(|| ExportError::HostUnavailable("window".to_string()))?;
        Self::from_window(&window)
    }

    pub fn from_window(window: &Window) -> Result<Self, ExportError> {
        let document = window
            .document()
            .ok_or_else(|| ExportError::HostUnavailable("document".to_string()))?;
        let navigator = window.navigator();
        let native_save = probe_native_save(&navigator);
        Ok(BrowserHost {
            navigator,
            document,
            native_save,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn probe_native_save(navigator: &Navigator) -> Option<Function> {
    let target: &JsValue = navigator.as_ref();
    let probe = Reflect::get(target, &JsValue::from_str(NATIVE_SAVE_PROBE)).ok()?;
    if !probe.is_function() {
        return None;
    }
    Reflect::get(target, &JsValue::from_str(NATIVE_SAVE_CALL))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

impl Host for BrowserHost {
    type Blob = Blob;
    type Anchor = HtmlAnchorElement;

    fn supports_native_save(&self) -> bool {
        self.native_save.is_some()
    }

    fn create_blob(&self, bytes: &[u8], mime_type: &str) -> Result<Blob, ExportError> {
        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes));

        let options = BlobPropertyBag::new();
        options.set_type(mime_type);

        Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(ExportError::js(HostStep::CreateBlob))
    }

    fn native_save(&self, blob: &Blob, filename: &str) -> Result<(), ExportError> {
        let save = self
            .native_save
            .as_ref()
            .ok_or_else(|| ExportError::host(HostStep::NativeSave, "not supported by this browser"))?;
        save.call2(&self.navigator, blob, &JsValue::from_str(filename))
            .map(|_| ())
            .map_err(ExportError::js(HostStep::NativeSave))
    }

    fn create_object_url(&self, blob: &Blob) -> Result<String, ExportError> {
        Url::create_object_url_with_blob(blob).map_err(ExportError::js(HostStep::CreateObjectUrl))
    }

    fn revoke_object_url(&self, url: &str) -> Result<(), ExportError> {
        Url::revoke_object_url(url).map_err(ExportError::js(HostStep::RevokeObjectUrl))
    }

    fn create_anchor(&self) -> Result<HtmlAnchorElement, ExportError> {
        self.document
            .create_element("a")
            .map_err(ExportError::js(HostStep::CreateAnchor))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ExportError::host(HostStep::CreateAnchor, "not an anchor element"))
    }

    fn set_anchor_target(
        &self,
        anchor: &HtmlAnchorElement,
        href: &str,
        download: &str,
    ) -> Result<(), ExportError> {
        anchor.set_href(href);
        anchor.set_download(download);
        Ok(())
    }

    fn hide_anchor(&self, anchor: &HtmlAnchorElement) -> Result<(), ExportError> {
        anchor.set_hidden(true);
        Ok(())
    }

    fn attach_anchor(&self, anchor: &HtmlAnchorElement) -> Result<(), ExportError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| ExportError::host(HostStep::AttachAnchor, "document has no body"))?;
        body.append_child(anchor)
            .map(|_| ())
            .map_err(ExportError::js(HostStep::AttachAnchor))
    }

    fn activate_anchor(&self, anchor: &HtmlAnchorElement) -> Result<(), ExportError> {
        anchor.click();
        Ok(())
    }

    fn detach_anchor(&self, anchor: &HtmlAnchorElement) -> Result<(), ExportError> {
        anchor.remove();
        Ok(())
    }
}
