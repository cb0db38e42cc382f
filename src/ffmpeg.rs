use log::debug;
use std::ffi::OsString;
use std::process::Command;

use crate::config::FFmpegConfig;
use crate::error::ClipError;
use crate::runner::{ClipJob, Trimmer};

/// Runs the system ffmpeg to cut clips
pub struct FFmpeg {
    program: String,
}

impl FFmpeg {
    pub fn new(config: &FFmpegConfig) -> Self {
        Self {
            program: config.program.clone(),
        }
    }

    /// Arguments for a lossless trim of `job`.
    ///
    /// `-ss` goes before `-i` so ffmpeg seeks the input instead of decoding
    /// up to the start point.
    pub fn trim_args(job: &ClipJob) -> Vec<OsString> {
        vec![
            "-ss".into(),
            job.start_time.clone().into(),
            "-i".into(),
            job.source.clone().into_os_string(),
            "-t".into(),
            job.duration.clone().into(),
            "-vcodec".into(),
            "copy".into(), // Copy video stream without re-encoding
            "-an".into(),  // Drop audio
            job.output.clone().into_os_string(),
        ]
    }
}

impl Trimmer for FFmpeg {
    /// Creates a clip and waits for ffmpeg to exit
    ///
    /// The child inherits stdio, so ffmpeg's own output and prompts reach the user.
    fn trim(&mut self, job: &ClipJob) -> Result<(), ClipError> {
        let args = Self::trim_args(job);
        debug!("Running: {} {:?}", self.program, args);

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| ClipError::ToolLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            debug!("{} failed on row {} with {}", self.program, job.row, status);
            return Err(ClipError::ToolFailed {
                program: self.program.clone(),
                status,
            });
        }

        Ok(())
    }
}
