use crate::app::config::Config;
use crate::app::config::binds::KeyMap;
use crate::player::PlaybackSource;
use crate::ui::RenderOrchestrator;

pub use constructor::AppConstructor;
pub use main_loop::AppMainLoop;

// Module declarations
pub mod cli;
pub mod config;
pub mod constructor;
pub mod event_handlers;
pub mod logging;
pub mod main_loop;
pub mod player_handler;
pub mod terminal;

/// Application state shared by the poll loop and input handling.
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub config: Config,
    pub source: Box<dyn PlaybackSource>,
    pub orchestrator: RenderOrchestrator,
    pub key_map: KeyMap,
    pub show_status_bar: bool,
    /// Set by resize events, consumed at the top of the next cycle
    pub resized: bool,
    /// Cell size to use when the terminal does not report pixel dimensions
    pub cell_fallback: Option<(u16, u16)>,
}
