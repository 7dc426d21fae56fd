//! MIME types for the formats this crate usually exports.

pub const TEXT_CSV: &str = "text/csv";
pub const TEXT_CALENDAR: &str = "text/calendar";
pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
