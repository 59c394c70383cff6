use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colors accept "#RRGGBB", a color name ("cyan", "lightred") or "reset" for the
/// terminal's default.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ColorsConfig {
    #[serde(default = "ColorsConfig::default_album")]
    pub album: String,
    #[serde(default = "ColorsConfig::default_artist")]
    pub artist: String,
    #[serde(default = "ColorsConfig::default_title")]
    pub title: String,
    #[serde(default = "ColorsConfig::default_time")]
    pub time: String,
    #[serde(default = "ColorsConfig::default_progress_filled")]
    pub progress_filled: String,
    #[serde(default = "ColorsConfig::default_progress_empty")]
    pub progress_empty: String,
    #[serde(default = "ColorsConfig::default_footer")]
    pub footer: String,
}

impl ColorsConfig {
    fn default_album() -> String {
        "cyan".to_string()
    }
    fn default_artist() -> String {
        "reset".to_string()
    }
    fn default_title() -> String {
        "red".to_string()
    }
    fn default_time() -> String {
        "red".to_string()
    }
    fn default_progress_filled() -> String {
        "green".to_string()
    }
    fn default_progress_empty() -> String {
        "reset".to_string()
    }
    fn default_footer() -> String {
        "yellow".to_string()
    }

    /// Parse a hex color string like "#FF5500" into RGB values
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// Parse a configured color, falling back when it is empty or unrecognized
    pub fn parse_color(value: &str, fallback: Color) -> Color {
        let value = value.trim();
        if value.starts_with('#') {
            return Self::parse_hex(value)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(fallback);
        }
        value.parse::<Color>().unwrap_or(fallback)
    }

    pub fn album_color(&self) -> Color {
        Self::parse_color(&self.album, Color::Cyan)
    }

    pub fn artist_color(&self) -> Color {
        Self::parse_color(&self.artist, Color::Reset)
    }

    pub fn title_color(&self) -> Color {
        Self::parse_color(&self.title, Color::Red)
    }

    pub fn time_color(&self) -> Color {
        Self::parse_color(&self.time, Color::Red)
    }

    pub fn progress_filled_color(&self) -> Color {
        Self::parse_color(&self.progress_filled, Color::Green)
    }

    pub fn progress_empty_color(&self) -> Color {
        Self::parse_color(&self.progress_empty, Color::Reset)
    }

    pub fn footer_color(&self) -> Color {
        Self::parse_color(&self.footer, Color::Yellow)
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            album: Self::default_album(),
            artist: Self::default_artist(),
            title: Self::default_title(),
            time: Self::default_time(),
            progress_filled: Self::default_progress_filled(),
            progress_empty: Self::default_progress_empty(),
            footer: Self::default_footer(),
        }
    }
}
