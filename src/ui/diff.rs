//! Redraw suppression.
//!
//! The display is redrawn as a whole whenever any visible field differs from what was
//! last drawn. This is an equality filter, not a dirty-region tracker: the win is
//! skipping the artwork blit on idle polls, not partial repaints.

use crate::player::PlaybackSnapshot;

/// The snapshot that is currently on screen.
#[derive(Debug, Default)]
pub struct DisplayBaseline {
    previous: Option<PlaybackSnapshot>,
}

impl DisplayBaseline {
    /// Create an empty baseline (forces the initial render)
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `current` differs from what is on screen in any visible field.
    pub fn has_changed(&self, current: &PlaybackSnapshot) -> bool {
        let Some(prev) = &self.previous else {
            return true;
        };

        prev.title != current.title
            || prev.artist != current.artist
            || prev.album != current.album
            || prev.art_source_id != current.art_source_id
            || prev.status != current.status
            || prev.position != current.position
            || prev.duration != current.duration
            || prev.rows != current.rows
            || prev.columns != current.columns
    }

    /// Record `current` as drawn
    pub fn commit(&mut self, current: PlaybackSnapshot) {
        self.previous = Some(current);
    }

    /// Check and adopt in one step: returns `true` and takes `current` as the new
    /// baseline when it differs, otherwise leaves the baseline alone.
    pub fn should_render(&mut self, current: &PlaybackSnapshot) -> bool {
        if self.has_changed(current) {
            self.commit(current.clone());
            true
        } else {
            false
        }
    }

    /// Forget what is on screen, e.g. after the terminal was erased
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn current(&self) -> Option<&PlaybackSnapshot> {
        self.previous.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayStatus;

    fn snapshot() -> PlaybackSnapshot {
        PlaybackSnapshot {
            title: "Title".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            art_source_id: "https://art/a".to_string(),
            status: PlayStatus::Playing,
            position: 1_000_000,
            duration: 200_000_000,
            rows: 40,
            columns: 120,
        }
    }

    #[test]
    fn test_first_call_renders() {
        let mut baseline = DisplayBaseline::new();
        assert!(baseline.should_render(&snapshot()));
        assert_eq!(baseline.current(), Some(&snapshot()));
    }

    #[test]
    fn test_identical_snapshot_is_suppressed() {
        let mut baseline = DisplayBaseline::new();
        assert!(baseline.should_render(&snapshot()));
        assert!(!baseline.should_render(&snapshot()));
    }

    #[test]
    fn test_any_single_field_change_renders() {
        let mutations: [fn(&mut PlaybackSnapshot); 9] = [
            |s| s.title.push('!'),
            |s| s.artist.clear(),
            |s| s.album = "Other".to_string(),
            |s| s.art_source_id = "https://art/b".to_string(),
            |s| s.status = PlayStatus::Paused,
            |s| s.position += 1,
            |s| s.duration -= 1,
            |s| s.rows += 1,
            |s| s.columns -= 1,
        ];

        for mutate in mutations {
            let mut baseline = DisplayBaseline::new();
            baseline.commit(snapshot());

            let mut changed = snapshot();
            mutate(&mut changed);
            assert!(baseline.should_render(&changed), "{:?}", changed);
            assert_eq!(baseline.current(), Some(&changed));
        }
    }

    #[test]
    fn test_has_changed_does_not_adopt() {
        let mut baseline = DisplayBaseline::new();
        baseline.commit(snapshot());

        let mut changed = snapshot();
        changed.position += 1;
        assert!(baseline.has_changed(&changed));
        assert_eq!(baseline.current(), Some(&snapshot()));
    }

    #[test]
    fn test_invalidate_forces_render() {
        let mut baseline = DisplayBaseline::new();
        baseline.commit(snapshot());
        baseline.invalidate();
        assert!(baseline.should_render(&snapshot()));
    }
}
