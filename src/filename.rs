use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Builds `{stem}_{YYYYmmdd_HHMMSS}.{extension}` so repeated exports don't
/// collide in the user's download folder.
pub fn timestamped_filename(stem: &str, extension: &str, at: DateTime<Utc>) -> String {
    let stamp = at.format(TIMESTAMP_FORMAT);
    if extension.is_empty() {
        format!("{}_{}", stem, stamp)
    } else {
        format!("{}_{}.{}", stem, stamp, extension.trim_start_matches('.'))
    }
}

pub fn timestamped_filename_now(stem: &str, extension: &str) -> String {
    timestamped_filename(stem, extension, Utc::now())
}
