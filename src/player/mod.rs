//! Media player access: the polling source the display mirrors and the transport
//! commands that clicks and keys turn into.

pub mod playerctl;
pub mod snapshot;

use std::fmt;
use thiserror::Error;

pub use playerctl::PlayerctlSource;
pub use snapshot::{PlaybackSnapshot, SnapshotCapture};

/// Transport state as reported by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayStatus {
    Playing,
    Paused,
    Stopped,
    #[default]
    Unknown,
}

impl PlayStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Playing" => PlayStatus::Playing,
            "Paused" => PlayStatus::Paused,
            "Stopped" => PlayStatus::Stopped,
            _ => PlayStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayStatus::Playing => "Playing",
            PlayStatus::Paused => "Paused",
            PlayStatus::Stopped => "Stopped",
            PlayStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PlayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{args}` failed: {stderr}")]
    Command { args: String, stderr: String },

    #[error("unexpected {field} value: {value:?}")]
    Parse { field: &'static str, value: String },
}

/// One poll's worth of raw player fields, before normalization into a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub art_source_id: String,
    pub status: PlayStatus,
    /// Microseconds, `None` when the player could not report it
    pub position: Option<u64>,
    /// Microseconds, 0 when unknown
    pub duration: u64,
}

/// A media player that can be polled for metadata and driven with transport commands.
///
/// Getters fail with [`ProviderError`] when the player is gone or the field is missing;
/// callers treat those as empty/zero. Positions and durations are in microseconds.
pub trait PlaybackSource {
    fn get_title(&self) -> Result<String, ProviderError>;
    fn get_artist(&self) -> Result<String, ProviderError>;
    fn get_album(&self) -> Result<String, ProviderError>;
    fn get_art_source_id(&self) -> Result<String, ProviderError>;
    fn get_status(&self) -> Result<PlayStatus, ProviderError>;
    fn get_position(&self) -> Result<u64, ProviderError>;
    fn get_duration(&self) -> Result<u64, ProviderError>;

    fn play_pause(&self) -> Result<(), ProviderError>;
    fn seek(&self, delta_us: i64) -> Result<(), ProviderError>;
    fn next(&self) -> Result<(), ProviderError>;
    fn previous(&self) -> Result<(), ProviderError>;
    fn set_position(&self, position_us: u64) -> Result<(), ProviderError>;

    /// Read every displayed field, defaulting the ones that fail.
    fn read_metadata(&self) -> Metadata {
        Metadata {
            title: or_default("title", self.get_title()),
            artist: or_default("artist", self.get_artist()),
            album: or_default("album", self.get_album()),
            art_source_id: or_default("art url", self.get_art_source_id()),
            status: or_default("status", self.get_status()),
            position: self
                .get_position()
                .inspect_err(|e| log::debug!("Failed to get position: {}", e))
                .ok(),
            duration: or_default("duration", self.get_duration()),
        }
    }
}

pub(crate) fn or_default<T: Default>(field: &str, result: Result<T, ProviderError>) -> T {
    result.unwrap_or_else(|e| {
        log::debug!("Failed to get {}: {}", field, e);
        T::default()
    })
}

/// Parse a microsecond count as printed by players (integer, negative or float).
pub(crate) fn parse_micros(field: &'static str, value: &str) -> Result<u64, ProviderError> {
    let trimmed = value.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return Ok(v);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v.max(0) as u64);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v.max(0.0) as u64),
        _ => Err(ProviderError::Parse {
            field,
            value: trimmed.to_string(),
        }),
    }
}
