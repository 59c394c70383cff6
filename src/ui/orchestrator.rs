//! One poll cycle: snapshot, layout, diff, text, artwork.

use std::path::Path;

use ratatui::{Terminal, backend::Backend};

use crate::app::config::Config;
use crate::artwork::{
    ArtworkCache, ArtworkError, ArtworkFetcher, ArtworkTransformer, HttpFetcher, SquareCrop,
};
use crate::player::{PlaybackSnapshot, PlaybackSource, SnapshotCapture};
use crate::ui::blit::{BitmapRenderer, ExternalBlit};
use crate::ui::diff::DisplayBaseline;
use crate::ui::layout::{self, LayoutSet, TerminalGeometry};

/// What happened to the artwork during a rendered cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkOutcome {
    /// Bitmap for the current track and size was blitted
    Fresh,
    /// Resolution failed and the last good bitmap was blitted instead
    Stale,
    /// Nothing to show: disabled, no source, empty box or a cold cache that failed
    Skipped,
    BlitFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing visible changed; no drawing or artwork work was done
    Unchanged,
    Rendered { artwork: ArtworkOutcome },
}

pub struct RenderOrchestrator<F = HttpFetcher, T = SquareCrop, R = ExternalBlit> {
    capture: SnapshotCapture,
    baseline: DisplayBaseline,
    cache: ArtworkCache<F, T>,
    renderer: R,
    artwork_enabled: bool,
    layout: LayoutSet,
}

impl<F, T, R> RenderOrchestrator<F, T, R>
where
    F: ArtworkFetcher,
    T: ArtworkTransformer,
    R: BitmapRenderer,
{
    pub fn new(cache: ArtworkCache<F, T>, renderer: R, artwork_enabled: bool) -> Self {
        Self {
            capture: SnapshotCapture::new(),
            baseline: DisplayBaseline::new(),
            cache,
            renderer,
            artwork_enabled,
            layout: LayoutSet::default(),
        }
    }

    /// Run one poll cycle against `terminal`.
    ///
    /// Only terminal I/O errors are returned. Player, artwork and blit failures
    /// are logged and degrade the affected element.
    pub fn cycle<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        source: &S,
        geometry: &TerminalGeometry,
        show_status_bar: bool,
        config: &Config,
    ) -> std::io::Result<CycleOutcome>
    where
        B: Backend,
        S: PlaybackSource + ?Sized,
    {
        let snapshot = self
            .capture
            .capture(source, geometry.rows, geometry.columns);
        self.layout = layout::compute(geometry, show_status_bar);

        let had_artwork = self
            .baseline
            .current()
            .is_some_and(|previous| !previous.art_source_id.is_empty());
        if !self.baseline.should_render(&snapshot) {
            return Ok(CycleOutcome::Unchanged);
        }

        if let Err(e) = self.draw_text(terminal, &snapshot, had_artwork, config) {
            // Nothing reliable is on screen, retry the whole frame next cycle
            self.baseline.invalidate();
            return Err(e);
        }

        let artwork = self.draw_artwork(&snapshot.art_source_id);
        Ok(CycleOutcome::Rendered { artwork })
    }

    fn draw_text<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        snapshot: &PlaybackSnapshot,
        had_artwork: bool,
        config: &Config,
    ) -> std::io::Result<()> {
        // A blitted bitmap is invisible to ratatui, so erase it explicitly when the
        // track no longer has artwork.
        if had_artwork && snapshot.art_source_id.is_empty() {
            terminal.clear()?;
        }

        let layout = self.layout;
        terminal.draw(|frame| crate::ui::renderer::render(frame, snapshot, &layout, config))?;
        Ok(())
    }

    fn draw_artwork(&mut self, source_id: &str) -> ArtworkOutcome {
        let artwork = self.layout.artwork;
        if !self.artwork_enabled
            || artwork.cells.width == 0
            || artwork.cells.height == 0
            || artwork.pixel_width == 0
            || artwork.pixel_height == 0
        {
            return ArtworkOutcome::Skipped;
        }

        let resolved = self
            .cache
            .resolve(source_id, artwork.pixel_width, artwork.pixel_height)
            .map(Path::to_path_buf);

        let (path, outcome) = match resolved {
            Ok(path) => (path, ArtworkOutcome::Fresh),
            Err(ArtworkError::MissingSource) => return ArtworkOutcome::Skipped,
            Err(e) => {
                log::warn!("Artwork unavailable for {}: {}", source_id, e);
                match self.cache.last_good() {
                    Some(path) => (path.to_path_buf(), ArtworkOutcome::Stale),
                    None => return ArtworkOutcome::Skipped,
                }
            }
        };

        match self.renderer.blit(&path, artwork.cells.x, artwork.cells.y) {
            Ok(()) => outcome,
            Err(e) => {
                log::warn!("Failed to draw artwork: {}", e);
                ArtworkOutcome::BlitFailed
            }
        }
    }

    /// Force the next cycle to redraw, e.g. after the screen was cleared
    pub fn invalidate(&mut self) {
        self.baseline.invalidate();
    }

    /// Layout used by the most recent cycle, for mouse hit-testing
    pub fn layout(&self) -> &LayoutSet {
        &self.layout
    }

    pub fn cache(&self) -> &ArtworkCache<F, T> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::cache::tests::{CountingFetcher, CountingTransformer};
    use crate::player::{Metadata, PlayStatus, tests::FakeSource};
    use crate::ui::blit::RenderError;
    use crate::ui::renderer::tests::row_text;
    use ratatui::backend::TestBackend;
    use std::cell::{Cell, RefCell};
    use std::path::PathBuf;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingBlit {
        calls: Rc<RefCell<Vec<(PathBuf, u16, u16)>>>,
        fail: Rc<Cell<bool>>,
    }

    impl BitmapRenderer for CountingBlit {
        fn blit(&mut self, path: &Path, x: u16, y: u16) -> Result<(), RenderError> {
            self.calls.borrow_mut().push((path.to_path_buf(), x, y));
            if self.fail.get() {
                return Err(RenderError::Spawn {
                    command: "img2sixel".to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            Ok(())
        }
    }

    impl CountingBlit {
        fn count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    struct Harness {
        orchestrator: RenderOrchestrator<CountingFetcher, CountingTransformer, CountingBlit>,
        fetcher: CountingFetcher,
        transformer: CountingTransformer,
        blit: CountingBlit,
        terminal: Terminal<TestBackend>,
        source: FakeSource,
        config: Config,
        _dir: tempfile::TempDir,
    }

    const GEOMETRY: TerminalGeometry = TerminalGeometry {
        rows: 40,
        columns: 120,
        cell_width: 10,
        cell_height: 20,
    };

    fn metadata(art: &str) -> Metadata {
        Metadata {
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            art_source_id: art.to_string(),
            status: PlayStatus::Playing,
            position: Some(50_000_000),
            duration: 200_000_000,
        }
    }

    fn harness(art: &str) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = CountingFetcher::default();
        let transformer = CountingTransformer::default();
        let blit = CountingBlit::default();
        let cache = ArtworkCache::new(dir.path(), fetcher.clone(), transformer.clone());

        Harness {
            orchestrator: RenderOrchestrator::new(cache, blit.clone(), true),
            fetcher,
            transformer,
            blit,
            terminal: Terminal::new(TestBackend::new(GEOMETRY.columns, GEOMETRY.rows)).unwrap(),
            source: FakeSource::with(metadata(art)),
            config: Config::default(),
            _dir: dir,
        }
    }

    impl Harness {
        fn cycle(&mut self) -> CycleOutcome {
            self.orchestrator
                .cycle(
                    &mut self.terminal,
                    &self.source,
                    &GEOMETRY,
                    false,
                    &self.config,
                )
                .unwrap()
        }

        fn set_art(&self, art: &str) {
            if let Some(meta) = self.source.metadata.borrow_mut().as_mut() {
                meta.art_source_id = art.to_string();
            }
        }

        fn title_row(&self) -> String {
            row_text(self.terminal.backend().buffer(), 3)
        }
    }

    fn rendered(artwork: ArtworkOutcome) -> CycleOutcome {
        CycleOutcome::Rendered { artwork }
    }

    #[test]
    fn test_first_cycle_draws_text_and_artwork() {
        let mut h = harness("https://art/a");

        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Fresh));
        assert!(h.title_row().contains("Song"));
        assert_eq!(h.fetcher.count(), 1);
        assert_eq!(*h.transformer.targets.borrow(), vec![400]);

        let calls = h.blit.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, h.orchestrator.cache().scaled_path());
        // Artwork box top-left cell
        assert_eq!((calls[0].1, calls[0].2), (40, 7));
    }

    #[test]
    fn test_unchanged_cycle_does_no_work() {
        let mut h = harness("https://art/a");
        h.cycle();

        assert_eq!(h.cycle(), CycleOutcome::Unchanged);
        assert_eq!(h.fetcher.count(), 1);
        assert_eq!(h.transformer.count(), 1);
        assert_eq!(h.blit.count(), 1);
    }

    #[test]
    fn test_position_change_reblits_without_refetch() {
        let mut h = harness("https://art/a");
        h.cycle();

        if let Some(meta) = h.source.metadata.borrow_mut().as_mut() {
            meta.position = Some(51_000_000);
        }
        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Fresh));
        assert_eq!(h.fetcher.count(), 1);
        assert_eq!(h.transformer.count(), 1);
        assert_eq!(h.blit.count(), 2);
    }

    #[test]
    fn test_cold_fetch_failure_still_draws_text() {
        let mut h = harness("https://art/a");
        h.fetcher.fail.set(true);

        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Skipped));
        assert!(h.title_row().contains("Song"));
        assert_eq!(h.blit.count(), 0);
    }

    #[test]
    fn test_warm_fetch_failure_shows_stale_artwork() {
        let mut h = harness("https://art/a");
        h.cycle();

        h.fetcher.fail.set(true);
        h.set_art("https://art/b");
        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Stale));
        assert_eq!(h.blit.count(), 2);
        assert_eq!(h.fetcher.count_for("https://art/b"), 1);
    }

    #[test]
    fn test_blit_failure_is_not_fatal() {
        let mut h = harness("https://art/a");
        h.blit.fail.set(true);

        assert_eq!(h.cycle(), rendered(ArtworkOutcome::BlitFailed));
        assert!(h.title_row().contains("Song"));
        // The snapshot still became the baseline
        assert_eq!(h.cycle(), CycleOutcome::Unchanged);
    }

    #[test]
    fn test_missing_source_skips_artwork() {
        let mut h = harness("");

        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Skipped));
        assert_eq!(h.fetcher.count(), 0);
        assert_eq!(h.blit.count(), 0);
    }

    #[test]
    fn test_artwork_disabled() {
        let mut h = harness("https://art/a");
        h.orchestrator.artwork_enabled = false;

        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Skipped));
        assert_eq!(h.fetcher.count(), 0);
    }

    #[test]
    fn test_invalidate_forces_redraw() {
        let mut h = harness("https://art/a");
        h.cycle();
        h.orchestrator.invalidate();

        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Fresh));
        assert_eq!(h.fetcher.count(), 1);
        assert_eq!(h.blit.count(), 2);
    }

    #[test]
    fn test_player_gone_renders_empty_display() {
        let mut h = harness("https://art/a");
        h.cycle();

        *h.source.metadata.borrow_mut() = None;
        assert_eq!(h.cycle(), rendered(ArtworkOutcome::Skipped));
        assert!(!h.title_row().contains("Song"));
    }

    #[test]
    fn test_layout_tracks_last_cycle() {
        let mut h = harness("https://art/a");
        h.cycle();
        assert_eq!(h.orchestrator.layout().progress_bar.x, 30);
        assert_eq!(h.orchestrator.layout().progress_bar.width, 60);
    }
}
