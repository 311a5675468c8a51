//! vidgate library
//!
//! Video validation and transcoding orchestration. Story-length checks
//! prefer the optional native validator and fall back to ffprobe; probing,
//! compression, thumbnails and conversion run ffmpeg/ffprobe as child
//! processes under hard timeouts.
//!
//! Layout follows ports and adapters: [`domain`] holds the types and rules,
//! [`ports`] the traits, [`adapters`] the ffmpeg/ffprobe/native/config
//! implementations and [`app`] the interactors wired by
//! [`app::DefaultAppContainer`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, MediaInteractor, ValidationOrchestrator};
pub use domain::errors::{DomainError, ErrorKind};
pub use domain::model::{
    CompressionReport, ConversionReport, DurationReport, Outcome, ThumbnailReport,
    ValidationMethod, ValidationResult, VideoMetadata,
};
