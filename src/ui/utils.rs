use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to fit within the given display width, handling Unicode properly
pub fn truncate_by_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let char_width = ch.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(ch);
        current_width += char_width;
    }

    result
}

/// Column that centers `s` on a line of `columns` cells. Text wider than the line
/// starts at column 0.
pub fn centered_x(s: &str, columns: u16) -> u16 {
    let width = u16::try_from(s.width()).unwrap_or(u16::MAX);
    columns.saturating_sub(width) / 2
}

/// Format microseconds as M:SS
pub fn format_clock(micros: u64) -> String {
    let total_seconds = micros / 1_000_000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
