pub mod commands;
pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod manifest;
pub mod runner;

// Re-export commonly used types at the crate root for convenience
pub use config::Config;
pub use error::ClipError;
pub use ffmpeg::FFmpeg;
pub use manifest::{ClipRow, Manifest};
pub use runner::{ClipJob, Runner, Trimmer};
