//! Single-slot artwork cache.
//!
//! Only one track's cover is ever on screen, so the cache holds exactly one entry keyed
//! first by source identifier and then by the scaled edge length. Changing the source
//! re-fetches and re-scales; changing only the box size (terminal resize) re-scales
//! from the persisted original without touching the network.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::{ArtworkError, ArtworkFetcher, ArtworkTransformer, HttpFetcher, SquareCrop};

const ORIGINAL_FILE: &str = "art_original";
const SCALED_FILE: &str = "art_scaled.png";
const SCALED_TMP_FILE: &str = "art_scaled.png.tmp";

/// What the persisted slots currently hold.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtworkCacheState {
    /// Source identifier whose bytes sit in the original slot
    pub source_id: Option<String>,
    /// Edge length of the scaled slot, if it was derived from the current original
    pub scaled_size: Option<u32>,
    /// Whether the scaled slot holds a successfully encoded image (possibly stale)
    pub has_scaled: bool,
}

#[derive(Debug)]
pub struct ArtworkCache<F = HttpFetcher, T = SquareCrop> {
    fetcher: F,
    transformer: T,
    dir: PathBuf,
    original_path: PathBuf,
    scaled_path: PathBuf,
    state: ArtworkCacheState,
    hits: u64,
    misses: u64,
}

impl<F: ArtworkFetcher, T: ArtworkTransformer> ArtworkCache<F, T> {
    pub fn new(dir: impl Into<PathBuf>, fetcher: F, transformer: T) -> Self {
        let dir = dir.into();
        Self {
            fetcher,
            transformer,
            original_path: dir.join(ORIGINAL_FILE),
            scaled_path: dir.join(SCALED_FILE),
            dir,
            state: ArtworkCacheState::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Return a displayable square bitmap for `source_id` sized to fit a
    /// `box_w` x `box_h` pixel area, fetching and rescaling only when needed.
    pub fn resolve(
        &mut self,
        source_id: &str,
        box_w: u32,
        box_h: u32,
    ) -> Result<&Path, ArtworkError> {
        if source_id.is_empty() {
            return Err(ArtworkError::MissingSource);
        }

        let target = box_w.min(box_h);
        let need_fetch = self.state.source_id.as_deref() != Some(source_id);
        let need_rescale = need_fetch || self.state.scaled_size != Some(target);

        if !need_rescale {
            self.hits += 1;
            return Ok(&self.scaled_path);
        }
        self.misses += 1;

        let fetched = if need_fetch {
            Some(self.fetch_original(source_id)?)
        } else {
            None
        };

        self.rescale(fetched, target)?;
        Ok(&self.scaled_path)
    }

    fn fetch_original(&mut self, source_id: &str) -> Result<Vec<u8>, ArtworkError> {
        log::debug!("Fetching artwork: {}", source_id);
        let bytes = self.fetcher.fetch(source_id)?;

        self.ensure_dir()?;
        std::fs::write(&self.original_path, &bytes)
            .map_err(|e| ArtworkError::persist(&self.original_path, e))?;

        self.state.source_id = Some(source_id.to_owned());
        // The scaled slot still shows the previous source
        self.state.scaled_size = None;
        log::debug!("Stored {} bytes of original artwork", bytes.len());
        Ok(bytes)
    }

    fn rescale(&mut self, fetched: Option<Vec<u8>>, target: u32) -> Result<(), ArtworkError> {
        let bytes = match fetched {
            Some(bytes) => bytes,
            None => std::fs::read(&self.original_path).map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    // Original vanished underneath us, fetch it again next time
                    self.state.source_id = None;
                }
                ArtworkError::persist(&self.original_path, e)
            })?,
        };

        let raster = self.transformer.transform(&bytes, target)?;

        // Encode beside the live file so a failed write leaves the last good image intact
        let tmp_path = self.dir.join(SCALED_TMP_FILE);
        raster
            .save_with_format(&tmp_path, ImageFormat::Png)
            .map_err(|source| ArtworkError::Encode {
                path: tmp_path.clone(),
                source,
            })?;
        std::fs::rename(&tmp_path, &self.scaled_path)
            .map_err(|e| ArtworkError::persist(&self.scaled_path, e))?;

        self.state.scaled_size = Some(target);
        self.state.has_scaled = true;
        log::debug!("Rescaled artwork to {}x{}", target, target);
        Ok(())
    }

    fn ensure_dir(&self) -> Result<(), ArtworkError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| ArtworkError::persist(&self.dir, e))?;
        }
        Ok(())
    }

    /// Last successfully encoded bitmap, which may belong to an earlier track or size
    pub fn last_good(&self) -> Option<&Path> {
        (self.state.has_scaled && self.scaled_path.exists()).then_some(self.scaled_path.as_path())
    }

    #[cfg(test)]
    pub fn state(&self) -> &ArtworkCacheState {
        &self.state
    }

    #[cfg(test)]
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    #[cfg(test)]
    pub fn scaled_path(&self) -> &Path {
        &self.scaled_path
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Log cache statistics
    pub fn log_stats(&self) {
        let (hits, misses) = self.stats();
        let total = hits + misses;
        if total > 0 {
            let hit_rate = (hits as f64 / total as f64) * 100.0;
            log::debug!(
                "Artwork cache: {} hits, {} misses ({:.1}% hit rate)",
                hits,
                misses,
                hit_rate
            );
        }
    }
}
