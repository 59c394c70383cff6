use super::{Metadata, PlayStatus, PlaybackSource};

/// Everything visible on screen as of one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub art_source_id: String,
    pub status: PlayStatus,
    /// Microseconds
    pub position: u64,
    /// Microseconds, never 0
    pub duration: u64,
    pub rows: u16,
    pub columns: u16,
}

/// Turns raw player reads into snapshots, carrying the position across polls.
///
/// The position only advances while the player reports `Playing`; paused or
/// stopped players keep showing the last observed position.
#[derive(Debug, Default)]
pub struct SnapshotCapture {
    last_position: Option<u64>,
}

impl SnapshotCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture<S: PlaybackSource + ?Sized>(
        &mut self,
        source: &S,
        rows: u16,
        columns: u16,
    ) -> PlaybackSnapshot {
        self.normalize(source.read_metadata(), rows, columns)
    }

    pub fn normalize(&mut self, meta: Metadata, rows: u16, columns: u16) -> PlaybackSnapshot {
        let position = match self.last_position {
            Some(last) if meta.status != PlayStatus::Playing => last,
            _ => meta.position.or(self.last_position).unwrap_or(0),
        };
        self.last_position = Some(position);

        PlaybackSnapshot {
            title: meta.title,
            artist: meta.artist,
            album: meta.album,
            art_source_id: meta.art_source_id,
            status: meta.status,
            position,
            duration: meta.duration.max(1),
            rows,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::tests::FakeSource;

    fn meta(status: PlayStatus, position: Option<u64>, duration: u64) -> Metadata {
        Metadata {
            title: "Song".to_string(),
            status,
            position,
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_duration_is_normalized() {
        let mut capture = SnapshotCapture::new();
        let snap = capture.normalize(meta(PlayStatus::Playing, Some(0), 0), 24, 80);
        assert_eq!(snap.duration, 1);
    }

    #[test]
    fn test_first_capture_reads_position_even_when_paused() {
        let mut capture = SnapshotCapture::new();
        let snap = capture.normalize(meta(PlayStatus::Paused, Some(7_000_000), 10), 24, 80);
        assert_eq!(snap.position, 7_000_000);
    }

    #[test]
    fn test_position_frozen_while_not_playing() {
        let mut capture = SnapshotCapture::new();
        capture.normalize(meta(PlayStatus::Playing, Some(5_000_000), 10), 24, 80);

        let paused = capture.normalize(meta(PlayStatus::Paused, Some(9_000_000), 10), 24, 80);
        assert_eq!(paused.position, 5_000_000);

        let playing = capture.normalize(meta(PlayStatus::Playing, Some(9_000_000), 10), 24, 80);
        assert_eq!(playing.position, 9_000_000);
    }

    #[test]
    fn test_failed_position_read_keeps_last() {
        let mut capture = SnapshotCapture::new();
        capture.normalize(meta(PlayStatus::Playing, Some(3_000_000), 10), 24, 80);
        let snap = capture.normalize(meta(PlayStatus::Playing, None, 10), 24, 80);
        assert_eq!(snap.position, 3_000_000);
    }

    #[test]
    fn test_capture_without_player_yields_empty_snapshot() {
        let mut capture = SnapshotCapture::new();
        let snap = capture.capture(&FakeSource::default(), 30, 100);

        assert_eq!(snap.title, "");
        assert_eq!(snap.status, PlayStatus::Unknown);
        assert_eq!(snap.duration, 1);
        assert_eq!((snap.rows, snap.columns), (30, 100));
    }
}
