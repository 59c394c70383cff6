use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    /// Show the status footer on startup
    #[serde(default)]
    pub show_status_bar: bool,
    #[serde(default = "UiConfig::default_bar_filled")]
    pub bar_filled: String,
    #[serde(default = "UiConfig::default_bar_empty")]
    pub bar_empty: String,
    /// Drawn in the clickable cell left of the progress bar
    #[serde(default = "UiConfig::default_previous_glyph")]
    pub previous_glyph: String,
    /// Drawn in the clickable cell right of the progress bar
    #[serde(default = "UiConfig::default_next_glyph")]
    pub next_glyph: String,
}

impl UiConfig {
    /// Reset any glyph that is not exactly one cell wide, since the bar and its buttons
    /// must line up with the click zones. Returns a warning per replaced glyph.
    pub fn validate_glyphs(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        let glyphs: [(&str, &mut String, fn() -> String); 4] = [
            ("bar_filled", &mut self.bar_filled, Self::default_bar_filled),
            ("bar_empty", &mut self.bar_empty, Self::default_bar_empty),
            ("previous_glyph", &mut self.previous_glyph, Self::default_previous_glyph),
            ("next_glyph", &mut self.next_glyph, Self::default_next_glyph),
        ];

        for (name, glyph, default) in glyphs {
            if glyph.width() != 1 {
                let fallback = default();
                warnings.push(format!(
                    "[ui] {} = {:?} must be exactly one cell wide, using {:?}",
                    name, glyph, fallback
                ));
                *glyph = fallback;
            }
        }
        warnings
    }

    fn default_bar_filled() -> String {
        "█".to_string()
    }
    fn default_bar_empty() -> String {
        "░".to_string()
    }
    fn default_previous_glyph() -> String {
        "«".to_string()
    }
    fn default_next_glyph() -> String {
        "»".to_string()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: false,
            bar_filled: Self::default_bar_filled(),
            bar_empty: Self::default_bar_empty(),
            previous_glyph: Self::default_previous_glyph(),
            next_glyph: Self::default_next_glyph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_glyphs_are_valid() {
        let mut ui = UiConfig::default();
        assert!(ui.validate_glyphs().is_empty());
    }

    #[test]
    fn test_wrong_width_glyphs_fall_back() {
        let mut ui = UiConfig {
            bar_filled: "==".to_string(),
            bar_empty: String::new(),
            previous_glyph: "<".to_string(),
            next_glyph: "界".to_string(),
            ..Default::default()
        };

        let warnings = ui.validate_glyphs();
        assert_eq!(warnings.len(), 3, "{:?}", warnings);
        assert_eq!(ui.bar_filled, "█");
        assert_eq!(ui.bar_empty, "░");
        assert_eq!(ui.previous_glyph, "<");
        assert_eq!(ui.next_glyph, "»");
    }
}
