use anyhow::Result;
use std::path::PathBuf;

/// How the external trimming tool is invoked
#[derive(Debug, Clone)]
pub struct FFmpegConfig {
    /// Program name or path, resolved through PATH when bare
    pub program: String,
}

/// Where clips are written
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Put loose filenames in a directory named after the source video
    pub group_by_source: bool,
}

/// Main configuration structure for a clipping run
#[derive(Debug, Clone)]
pub struct Config {
    /// Source video to cut clips from
    pub input_file: PathBuf,
    /// CSV manifest describing the clips
    pub manifest_file: PathBuf,
    pub ffmpeg: FFmpegConfig,
    pub output: OutputConfig,
}

impl Default for FFmpegConfig {
    fn default() -> Self {
        Self {
            program: String::from("ffmpeg"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            group_by_source: true,
        }
    }
}

impl Config {
    /// Create configuration from CLI arguments
    ///
    /// # Arguments
    /// * `input` - Path to the source video file
    /// * `manifest` - Path to the CSV manifest
    pub fn from_cli(input: PathBuf, manifest: PathBuf) -> Self {
        Self {
            input_file: input,
            manifest_file: manifest,
            ffmpeg: FFmpegConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            anyhow::bail!("Input video path is required");
        }

        if self.manifest_file.as_os_str().is_empty() {
            anyhow::bail!("Manifest path is required");
        }

        if self.ffmpeg.program.trim().is_empty() {
            anyhow::bail!("FFmpeg program must not be empty");
        }

        Ok(())
    }
}
