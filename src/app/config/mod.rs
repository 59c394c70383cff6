pub mod artwork;
pub mod binds;
pub mod colors;
pub mod format;
pub mod logging;
pub mod player;
pub mod ui;

pub use artwork::ArtworkConfig;
pub use binds::BindsConfig;
pub use colors::ColorsConfig;
pub use format::Config;
pub use logging::LoggingConfig;
pub use player::PlayerConfig;
pub use ui::UiConfig;
