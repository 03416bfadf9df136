//! Compact recording-timestamp formatting

/// Reformat a compact `YYYYMMDDHHMM` timestamp as `YYYY/MM/DD HH:MM`.
///
/// Anything that is not exactly 12 ASCII characters is passed through
/// unmodified; this is a defensive no-op, not an error.
pub fn format_rec_time(raw: &str) -> String {
    if raw.len() != 12 || !raw.is_ascii() {
        return raw.to_string();
    }
    format!(
        "{}/{}/{} {}:{}",
        &raw[0..4],
        &raw[4..6],
        &raw[6..8],
        &raw[8..10],
        &raw[10..12]
    )
}
