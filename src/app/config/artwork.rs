use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ArtworkConfig {
    /// Show album artwork at all
    #[serde(default = "ArtworkConfig::default_enabled")]
    pub enabled: bool,
    /// Where the original and scaled artwork are kept
    #[serde(default)]
    pub cache_dir: Option<String>,
    /// Program that draws a bitmap file at the cursor position
    #[serde(default = "ArtworkConfig::default_renderer_command")]
    pub renderer_command: String,
    /// Extra arguments passed before the file path
    #[serde(default)]
    pub renderer_args: Vec<String>,
    /// Give up on a download after this many seconds; unbounded when unset
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
    /// User-Agent header for artwork downloads
    #[serde(default = "ArtworkConfig::default_user_agent")]
    pub user_agent: String,
}

impl ArtworkConfig {
    fn default_enabled() -> bool {
        true
    }
    fn default_renderer_command() -> String {
        "img2sixel".to_string()
    }
    fn default_user_agent() -> String {
        format!("hellcast/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the cache directory: configured path, then the platform cache dir,
    /// then the system temp dir.
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.cache_dir {
            return expand_home(dir);
        }
        dirs::cache_dir()
            .map(|d| d.join("hellcast"))
            .unwrap_or_else(|| std::env::temp_dir().join("hellcast"))
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            cache_dir: None,
            renderer_command: Self::default_renderer_command(),
            renderer_args: Vec::new(),
            fetch_timeout_secs: None,
            user_agent: Self::default_user_agent(),
        }
    }
}
