use clap::Parser;
use std::path::PathBuf;

pub mod clip;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the video file to clip
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the CSV file describing the clips to create
    #[arg(short, long)]
    pub manifest: PathBuf,
}
