use std::process::{Command, Stdio};

use super::{Metadata, PlayStatus, PlaybackSource, ProviderError, or_default, parse_micros};

/// Unit separator, unlikely to show up inside a title
const FIELD_SEPARATOR: char = '\u{1f}';

/// Field order of [`PlayerctlSource::read_metadata`]'s single query
const METADATA_FIELDS: [&str; 7] = [
    "status",
    "title",
    "artist",
    "album",
    "mpris:artUrl",
    "mpris:length",
    "position",
];

/// MPRIS player driven through the `playerctl` command line tool.
///
/// Every call is a blocking subprocess run on the caller's thread.
#[derive(Debug, Clone)]
pub struct PlayerctlSource {
    program: String,
    player: Option<String>,
}

impl PlayerctlSource {
    pub fn new(program: impl Into<String>, player: Option<String>) -> Self {
        Self {
            program: program.into(),
            player,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(ref player) = self.player {
            cmd.arg("--player").arg(player);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<String, ProviderError> {
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|source| ProviderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::Command {
                args: format!("{} {}", self.program, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .trim_end_matches(['\n', '\r'])
            .to_string())
    }

    fn metadata_field(&self, key: &str) -> Result<String, ProviderError> {
        self.run(&["metadata", key])
    }
}

/// Build the `--format` template for one metadata query
fn metadata_format() -> String {
    METADATA_FIELDS
        .iter()
        .map(|field| format!("{{{{{}}}}}", field))
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string())
}

/// Split the output of the [`metadata_format`] query into fields
fn parse_metadata_line(line: &str) -> Option<Metadata> {
    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if parts.len() != METADATA_FIELDS.len() {
        return None;
    }

    Some(Metadata {
        status: PlayStatus::parse(parts[0]),
        title: parts[1].to_string(),
        artist: parts[2].to_string(),
        album: parts[3].to_string(),
        art_source_id: parts[4].trim().to_string(),
        duration: parse_micros("mpris:length", parts[5]).unwrap_or(0),
        position: parse_micros("position", parts[6]).ok(),
    })
}

/// playerctl takes positions in (fractional) seconds
fn micros_to_secs(us: u64) -> String {
    format!("{}", us as f64 / 1_000_000.0)
}

impl PlaybackSource for PlayerctlSource {
    fn get_title(&self) -> Result<String, ProviderError> {
        self.metadata_field("title")
    }

    fn get_artist(&self) -> Result<String, ProviderError> {
        self.metadata_field("artist")
    }

    fn get_album(&self) -> Result<String, ProviderError> {
        self.metadata_field("album")
    }

    fn get_art_source_id(&self) -> Result<String, ProviderError> {
        self.metadata_field("mpris:artUrl").map(|s| s.trim().to_string())
    }

    fn get_status(&self) -> Result<PlayStatus, ProviderError> {
        self.run(&["status"]).map(|s| PlayStatus::parse(&s))
    }

    fn get_position(&self) -> Result<u64, ProviderError> {
        let raw = self.run(&["metadata", "--format", "{{position}}"])?;
        parse_micros("position", &raw)
    }

    fn get_duration(&self) -> Result<u64, ProviderError> {
        let raw = self.metadata_field("mpris:length")?;
        parse_micros("mpris:length", &raw)
    }

    fn play_pause(&self) -> Result<(), ProviderError> {
        self.run(&["play-pause"]).map(drop)
    }

    fn seek(&self, delta_us: i64) -> Result<(), ProviderError> {
        let sign = if delta_us < 0 { '-' } else { '+' };
        let offset = format!("{}{}", micros_to_secs(delta_us.unsigned_abs()), sign);
        self.run(&["position", &offset]).map(drop)
    }

    fn next(&self) -> Result<(), ProviderError> {
        self.run(&["next"]).map(drop)
    }

    fn previous(&self) -> Result<(), ProviderError> {
        self.run(&["previous"]).map(drop)
    }

    fn set_position(&self, position_us: u64) -> Result<(), ProviderError> {
        self.run(&["position", &micros_to_secs(position_us)])
            .map(drop)
    }

    fn read_metadata(&self) -> Metadata {
        let format = metadata_format();
        let line = match self.run(&["metadata", "--format", &format]) {
            Ok(line) => line,
            // Most commonly "No players found", every other query would fail the same way
            Err(e) => {
                log::debug!("Metadata query failed: {}", e);
                return Metadata::default();
            }
        };

        if let Some(metadata) = parse_metadata_line(&line) {
            return metadata;
        }
        log::debug!("Unexpected playerctl metadata output: {:?}", line);

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
