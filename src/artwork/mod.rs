//! Album artwork pipeline: fetch the cover behind an art URL, crop it square,
//! scale it to the terminal's artwork box and keep both copies on disk.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod transform;

pub use cache::ArtworkCache;
pub use error::ArtworkError;
pub use fetch::{ArtworkFetcher, HttpFetcher};
pub use transform::{ArtworkTransformer, SquareCrop};
