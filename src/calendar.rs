use anyhow::{anyhow, Context};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/src/calendar.js")]
extern "C" {
    /// Whatever `bulmaCalendar.attach` returned. Opaque on this side.
    pub type CalendarHandle;

    #[wasm_bindgen(js_name = bc_attach_shim)]
    fn bc_attach(selector: &str, options: &JsValue) -> CalendarHandle;

    #[wasm_bindgen(js_name = bc_value_shim)]
    fn bc_value(calendar: &CalendarHandle) -> String;
}

/// Attaches the calendar widget to every element matching `selector`.
/// `options` is handed to the widget untouched.
pub fn attach_calendar(selector: &str, options: &JsValue) -> CalendarHandle {
    bc_attach(selector, options)
}

pub fn read_calendar_value(handle: &CalendarHandle) -> String {
    bc_value(handle)
}

pub fn attach_calendar_with(
    selector: &str,
    options: &CalendarOptions,
) -> anyhow::Result<CalendarHandle> {
    let options = options.to_js()?;
    Ok(attach_calendar(selector, &options))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerKind {
    Date,
    Time,
    Datetime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Default,
    Dialog,
    Inline,
}

/// The subset of widget options this crate sets. Unset fields are left out
/// so the widget falls back to its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOptions {
    #[serde(rename = "type")]
    pub kind: PickerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
    pub is_range: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_header: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_footer: Option<bool>,
}

impl CalendarOptions {
    pub fn new(kind: PickerKind) -> Self {
        CalendarOptions {
            kind,
            date_format: None,
            time_format: None,
            display_mode: None,
            is_range: false,
            start_date: None,
            start_time: None,
            show_header: None,
            show_footer: None,
        }
    }

    pub fn to_js(&self) -> anyhow::Result<JsValue> {
        let json = serde_json::to_string(self).context("serializing calendar options")?;
        js_sys::JSON::parse(&json).map_err(|err| anyhow!("parsing calendar options: {:?}", err))
    }
}

/// A value read back from the widget. Range pickers report `"start - end"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarValue {
    pub start: String,
    pub end: Option<String>,
}

impl CalendarValue {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(" - ") {
            Some((start, end)) => CalendarValue {
                start: start.trim().to_owned(),
                end: Some(end.trim().to_owned()).filter(|end| !end.is_empty()),
            },
            None => CalendarValue {
                start: raw.trim().to_owned(),
                end: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_none()
    }

    pub fn read(handle: &CalendarHandle) -> Self {
        Self::parse(&read_calendar_value(handle))
    }
}
