#[macro_use]
extern crate serde_derive;

mod calendar;
mod error;
mod export_button;
mod exporter;
mod filename;
mod host;
pub mod mime;
mod request;
mod strategy;

pub use calendar::{
    attach_calendar, attach_calendar_with, read_calendar_value, CalendarHandle, CalendarOptions,
    CalendarValue, DisplayMode, PickerKind,
};
pub use error::{ExportError, HostStep};
pub use export_button::{ExportButton, PayloadSource};
pub use exporter::{ExportConfig, FileExporter, StrategyPreference};
pub use filename::{timestamped_filename, timestamped_filename_now};
pub use host::{
    BrowserHost, Host, HostEvent, RecordedAnchor, RecordedBlob, RecordedDownload, RecordingHost,
};
pub use request::{ExportRequest, Payload};
pub use strategy::{AnchorTriggerStrategy, NativeSaveStrategy, SaveStrategy, TriggerDownload};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Installs the console logger. Call once from the page before exporting.
#[wasm_bindgen]
pub fn init() {
    wasm_logger::init(wasm_logger::Config::default());
}

pub fn init_with_level(level: log::Level) {
    wasm_logger::init(wasm_logger::Config::new(level));
}

// JS-facing exports throw on host faults instead of logging them.
#[wasm_bindgen(js_name = exportFile)]
pub fn export_bytes(filename: &str, data: &[u8], mime_type: &str) -> Result<(), JsValue> {
    let exporter = FileExporter::new(BrowserHost::current()?);
    exporter.try_export(&ExportRequest::new(filename, data, mime_type))?;
    Ok(())
}

#[wasm_bindgen(js_name = exportText)]
pub fn export_text(filename: &str, text: &str, mime_type: &str) -> Result<(), JsValue> {
    let exporter = FileExporter::new(BrowserHost::current()?);
    exporter.try_export(&ExportRequest::new(filename, text, mime_type))?;
    Ok(())
}
