use crate::app::config::PlayerConfig;
use crate::player::{PlaybackSource, ProviderError};

/// Things a key press or click can ask for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    // Playback
    TogglePlayPause,
    Next,
    Previous,

    // Seeking
    SeekForward,
    SeekBackward,
    /// Jump to a fraction of the track, `0.0..1.0`
    SeekTo(f64),

    // Application
    ToggleStatusBar,
    Quit,
}

impl PlayerAction {
    /// Send the action to the player. App-level actions are a no-op here.
    pub fn execute<S: PlaybackSource + ?Sized>(
        &self,
        source: &S,
        config: &PlayerConfig,
    ) -> Result<(), ProviderError> {
        match self {
            PlayerAction::TogglePlayPause => source.play_pause(),
            PlayerAction::Next => source.next(),
            PlayerAction::Previous => source.previous(),
            PlayerAction::SeekForward => source.seek(config.seek_step_us()),
            PlayerAction::SeekBackward => source.seek(-config.seek_step_us()),
            PlayerAction::SeekTo(fraction) => {
                let duration = source.get_duration()?.max(1);
                let target = (fraction.clamp(0.0, 1.0) * duration as f64) as u64;
                source.set_position(target)
            }
            PlayerAction::ToggleStatusBar | PlayerAction::Quit => Ok(()),
        }
    }
}
