use anyhow::Result;
use log::info;

use super::Cli;
use crate::config::Config;
use crate::ffmpeg::FFmpeg;
use crate::manifest::Manifest;
use crate::runner::Runner;

/// Cut every clip in the manifest, returning how many were created
pub fn run(args: Cli) -> Result<usize> {
    let config = Config::from_cli(args.input, args.manifest);
    config.validate()?;

    let manifest = Manifest::open(&config.manifest_file)?;
    info!(
        "Clipping {} using {}",
        config.input_file.display(),
        config.manifest_file.display()
    );

    let mut runner = Runner::new(
        &config.input_file,
        &config.output,
        FFmpeg::new(&config.ffmpeg),
    );
    let created = runner.run(manifest.rows())?;

    Ok(created)
}
