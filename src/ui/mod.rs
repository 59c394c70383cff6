pub mod blit;
pub mod diff;
pub mod layout;
pub mod orchestrator;
pub mod renderer;
pub mod utils;

pub use blit::ExternalBlit;
pub use orchestrator::{CycleOutcome, RenderOrchestrator};
