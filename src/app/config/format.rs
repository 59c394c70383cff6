use crate::app::config::{
    ArtworkConfig, BindsConfig, ColorsConfig, LoggingConfig, PlayerConfig, UiConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub artwork: ArtworkConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub binds: BindsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

const KNOWN_SECTIONS: &[(&str, &[&str])] = &[
    (
        "player",
        &["name", "playerctl_path", "seek_step_secs", "poll_interval_ms"],
    ),
    (
        "artwork",
        &[
            "enabled",
            "cache_dir",
            "renderer_command",
            "renderer_args",
            "fetch_timeout_secs",
            "user_agent",
        ],
    ),
    (
        "ui",
        &[
            "show_status_bar",
            "bar_filled",
            "bar_empty",
            "previous_glyph",
            "next_glyph",
        ],
    ),
    (
        "colors",
        &[
            "album",
            "artist",
            "title",
            "time",
            "progress_filled",
            "progress_empty",
            "footer",
        ],
    ),
    (
        "binds",
        &[
            "quit",
            "toggle_play_pause",
            "seek_backward",
            "seek_forward",
            "previous",
            "next",
            "toggle_status_bar",
        ],
    ),
    (
        "logging",
        &[
            "enabled",
            "level",
            "log_to_console",
            "append_to_file",
            "rotate_logs",
            "rotation_size_mb",
            "keep_log_files",
            "log_dir",
        ],
    ),
];

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();

    if a_chars.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a_chars.len();
    }

    // Two rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Find the closest candidate within a few edits
fn find_similar<'a>(unknown: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let unknown_lower = unknown.to_lowercase();

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein_distance(&unknown_lower, &candidate.to_lowercase());
            let threshold = (unknown.len().max(candidate.len()) / 2).max(3);
            (distance <= threshold).then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

fn format_unknown_section(key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("Unknown config section: [{}] (did you mean: [{}]?)", key, s),
        None => format!("Unknown config section: [{}]", key),
    }
}

fn format_unknown_option(section: &str, key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(
            "Unknown option in [{}]: {} (did you mean: {}?)",
            section, key, s
        ),
        None => format!("Unknown option in [{}]: {}", section, key),
    }
}

impl Config {
    /// Platform config location, e.g. `~/.config/hellcast/config.toml` on Linux
    pub fn default_config_path() -> color_eyre::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;
        Ok(config_dir.join("hellcast").join("config.toml"))
    }

    /// Load the config, writing a default one first if none exists.
    ///
    /// Problems that do not stop the program (unknown keys, a file that does not
    /// parse) come back as warnings so they can be logged once the logger is up.
    pub fn load(config_path: Option<PathBuf>) -> color_eyre::Result<(Self, Vec<String>)> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            if let Some(parent) = config_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }

            let default_config = Config::default();
            let toml_string = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_path, &toml_string)?;

            return Ok((default_config, Vec::new()));
        }

        let contents = std::fs::read_to_string(&config_path)?;
        Ok(Self::parse(&contents, &config_path))
    }

    fn parse(contents: &str, origin: &Path) -> (Self, Vec<String>) {
        let mut warnings = Self::check_unknown_fields(contents);

        let mut config = match toml::from_str::<Config>(contents) {
            Ok(config) => config,
            Err(e) => {
                warnings.push(format!(
                    "Failed to parse {}, using defaults: {}",
                    origin.display(),
                    e.message()
                ));
                Config::default()
            }
        };
        warnings.extend(config.ui.validate_glyphs());
        (config, warnings)
    }

    /// Check for unknown sections and keys, suggesting the closest known name
    fn check_unknown_fields(contents: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        // Syntax errors are reported by the typed parse
        let Ok(table) = toml::from_str::<toml::Table>(contents) else {
            return warnings;
        };

        for (key, value) in &table {
            let Some((section, fields)) = KNOWN_SECTIONS.iter().find(|(name, _)| name == key)
            else {
                let suggestion = find_similar(key, KNOWN_SECTIONS.iter().map(|(name, _)| *name));
                warnings.push(format_unknown_section(key, suggestion));
                continue;
            };

            if let toml::Value::Table(entries) = value {
                for field in entries.keys() {
                    if !fields.contains(&field.as_str()) {
                        let suggestion = find_similar(field, fields.iter().copied());
                        warnings.push(format_unknown_option(section, field, suggestion));
                    }
                }
            }
        }

        warnings
    }

    /// Write a default config file to `path`, refusing to overwrite
    pub fn generate_default(path: PathBuf) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Err(color_eyre::eyre::eyre!(
                "Config file already exists at: {}",
                path.display()
            ));
        }

        let toml_string = toml::to_string_pretty(&Config::default())?;
        std::fs::write(&path, &toml_string)?;

        println!("Generated default config at: {}", path.display());
        Ok(())
    }
}
