use super::App;
use crate::app::cli::Args;
use crate::app::config::Config;
use crate::artwork::{ArtworkCache, HttpFetcher, SquareCrop};
use crate::player::{PlaybackSource, PlayerctlSource};
use crate::ui::{ExternalBlit, RenderOrchestrator};

/// Trait for App construction
pub trait AppConstructor {
    fn new_with_config(config: Config, args: &Args) -> Self
    where
        Self: Sized;

    fn with_source(config: Config, source: Box<dyn PlaybackSource>) -> Self
    where
        Self: Sized;
}

impl AppConstructor for App {
    /// Build the app around `playerctl`, with command-line overrides applied.
    fn new_with_config(mut config: Config, args: &Args) -> Self {
        if let Some(player) = &args.player {
            config.player.name = Some(player.clone());
        }
        if args.status_bar {
            config.ui.show_status_bar = true;
        }

        let source = PlayerctlSource::new(
            config.player.playerctl_path.clone(),
            config.player.name.clone(),
        );
        Self::with_source(config, Box::new(source))
    }

    fn with_source(config: Config, source: Box<dyn PlaybackSource>) -> Self {
        let artwork = &config.artwork;
        let fetcher = HttpFetcher::new(&artwork.user_agent, artwork.fetch_timeout());
        let cache = ArtworkCache::new(artwork.cache_dir(), fetcher, SquareCrop);
        let blit = ExternalBlit::new(
            artwork.renderer_command.clone(),
            artwork.renderer_args.clone(),
        );
        log::debug!("Artwork cache directory: {}", artwork.cache_dir().display());

        let orchestrator = RenderOrchestrator::new(cache, blit, artwork.enabled);

        let (key_map, warnings) = config.binds.build_key_map();
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Self {
            running: false,
            show_status_bar: config.ui.show_status_bar,
            config,
            source,
            orchestrator,
            key_map,
            resized: false,
            cell_fallback: None,
        }
    }
}
