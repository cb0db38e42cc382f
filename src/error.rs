use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Everything that can stop a clipping run
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Row {row} in your CSV is missing a required column: {column}")]
    MissingColumn { row: usize, column: &'static str },

    #[error("Row {row} in your CSV has an empty value for {column}!")]
    EmptyValue { row: usize, column: &'static str },

    #[error("Failed to open manifest {}", path.display())]
    ManifestOpen {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Row {row} in your CSV could not be read")]
    ManifestParse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to create output directory {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Something went wrong launching {program}. Do you have {program} installed?")]
    ToolLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Something went wrong running {program}: {status}. Do you have {program} installed?")]
    ToolFailed { program: String, status: ExitStatus },
}

impl ClipError {
    /// Row number the error points at, if it came from the manifest
    pub fn row(&self) -> Option<usize> {
        match self {
            ClipError::MissingColumn { row, .. }
            | ClipError::EmptyValue { row, .. }
            | ClipError::ManifestParse { row, .. } => Some(*row),
            _ => None,
        }
    }
}
