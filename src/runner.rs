use log::{debug, info};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::error::ClipError;
use crate::manifest::ClipRow;

/// A single trim to perform, derived from one manifest row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipJob {
    /// Manifest row this job came from
    pub row: usize,
    pub start_time: String,
    pub duration: String,
    /// Source video to read from
    pub source: PathBuf,
    /// Where the clip is written
    pub output: PathBuf,
}

impl ClipJob {
    /// Derive a job from a validated row
    ///
    /// # Arguments
    /// * `row` - Validated manifest row
    /// * `source` - Path to the source video
    /// * `output` - Output layout settings
    pub fn from_row(row: ClipRow, source: &Path, output: &OutputConfig) -> Self {
        let output_path = output_path(&row.filename, source, output.group_by_source);
        Self {
            row: row.row,
            start_time: row.start_time,
            duration: row.duration,
            source: source.to_path_buf(),
            output: output_path,
        }
    }

    /// Directory the clip lands in; empty means the current directory
    pub fn output_dir(&self) -> &Path {
        self.output.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Target directory for a manifest filename.
///
/// A filename with a directory part keeps it. A bare filename goes into a
/// directory named after the source video's file stem when grouping is on,
/// or into the current directory otherwise.
pub fn target_dir(filename: &str, source: &Path, group_by_source: bool) -> PathBuf {
    match Path::new(filename).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ if group_by_source => source.file_stem().map(PathBuf::from).unwrap_or_default(),
        _ => PathBuf::new(),
    }
}

/// Full output path for a manifest filename
pub fn output_path(filename: &str, source: &Path, group_by_source: bool) -> PathBuf {
    let name = Path::new(filename)
        .file_name()
        .unwrap_or_else(|| OsStr::new(filename));
    target_dir(filename, source, group_by_source).join(name)
}

/// Create `dir` and any missing parents. An existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<(), ClipError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| ClipError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })
}

/// Something that can cut a clip out of a source video
pub trait Trimmer {
    fn trim(&mut self, job: &ClipJob) -> Result<(), ClipError>;
}

/// Drives manifest rows through a trimmer, one at a time, in order
pub struct Runner<'a, T> {
    source: &'a Path,
    output: &'a OutputConfig,
    trimmer: T,
}

impl<'a, T: Trimmer> Runner<'a, T> {
    pub fn new(source: &'a Path, output: &'a OutputConfig, trimmer: T) -> Self {
        Self {
            source,
            output,
            trimmer,
        }
    }

    /// Process every row, stopping at the first error.
    ///
    /// Returns the number of clips created.
    pub fn run<I>(&mut self, rows: I) -> Result<usize, ClipError>
    where
        I: IntoIterator<Item = Result<ClipRow, ClipError>>,
    {
        let mut created = 0;

        for row in rows {
            let job = ClipJob::from_row(row?, self.source, self.output);
            debug!("Row {}: {:?}", job.row, job);

            ensure_dir(job.output_dir())?;
            self.trimmer.trim(&job)?;

            info!("Created {}", job.output.display());
            created += 1;
        }

        Ok(created)
    }

    /// Give back the trimmer, e.g. to inspect what it recorded
    pub fn into_trimmer(self) -> T {
        self.trimmer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use tempfile::tempdir;

    /// Records jobs instead of running anything; fails on a chosen row
    #[derive(Default)]
    struct Recorder {
        jobs: Vec<ClipJob>,
        fail_on_row: Option<usize>,
    }

    impl Trimmer for Recorder {
        fn trim(&mut self, job: &ClipJob) -> Result<(), ClipError> {
            self.jobs.push(job.clone());
            if self.fail_on_row == Some(job.row) {
                return Err(ClipError::ToolLaunch {
                    program: "ffmpeg".to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            Ok(())
        }
    }

    fn row(n: usize, start: &str, duration: &str, filename: &str) -> Result<ClipRow, ClipError> {
        Ok(ClipRow {
            row: n,
            start_time: start.to_string(),
            duration: duration.to_string(),
            filename: filename.to_string(),
        })
    }

    #[test]
    fn test_loose_filename_grouped_under_source_stem() {
        let source = Path::new("/videos/movie.mp4");
        assert_eq!(target_dir("scene_1.mp4", source, true), PathBuf::from("movie"));
        assert_eq!(
            output_path("scene_1.mp4", source, true),
            PathBuf::from("movie/scene_1.mp4")
        );
    }

    #[test]
    fn test_stem_keeps_inner_dots() {
        let source = Path::new("movie.final.mkv");
        assert_eq!(target_dir("a.mp4", source, true), PathBuf::from("movie.final"));
    }

    #[test]
    fn test_filename_directory_used_as_is() {
        let source = Path::new("movie.mp4");
        assert_eq!(target_dir("clips/act1/a.mp4", source, true), PathBuf::from("clips/act1"));
        assert_eq!(
            output_path("clips/act1/a.mp4", source, true),
            PathBuf::from("clips/act1/a.mp4")
        );
    }

    #[test]
    fn test_no_grouping_writes_to_current_dir() {
        let source = Path::new("movie.mp4");
        assert_eq!(target_dir("a.mp4", source, false), PathBuf::new());
        assert_eq!(output_path("a.mp4", source, false), PathBuf::from("a.mp4"));
        assert_eq!(output_path("sub/a.mp4", source, false), PathBuf::from("sub/a.mp4"));
    }

    #[test]
    fn test_job_output_dir() {
        let output = OutputConfig::default();
        let job = ClipJob::from_row(
            row(2, "01:00", "00:30", "scene_1.mp4").unwrap(),
            Path::new("movie.mp4"),
            &output,
        );
        assert_eq!(job.output_dir(), Path::new("movie"));
        assert_eq!(job.source, PathBuf::from("movie.mp4"));

        let loose = ClipJob::from_row(
            row(2, "01:00", "00:30", "scene_1.mp4").unwrap(),
            Path::new("movie.mp4"),
            &OutputConfig {
                group_by_source: false,
            },
        );
        assert_eq!(loose.output_dir(), Path::new(""));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() -> anyhow::Result<()> {
        let root = tempdir()?;
        let dir = root.path().join("movie").join("extras");

        ensure_dir(&dir)?;
        let keep = dir.join("unrelated.txt");
        fs::write(&keep, "keep me")?;

        ensure_dir(&dir)?;
        assert_eq!(fs::read_to_string(&keep)?, "keep me");
        Ok(())
    }

    #[test]
    fn test_ensure_dir_fails_over_a_file() -> anyhow::Result<()> {
        let root = tempdir()?;
        let blocker = root.path().join("movie");
        fs::write(&blocker, "not a directory")?;

        let result = ensure_dir(&blocker.join("clips"));
        assert!(matches!(result, Err(ClipError::DirectoryCreation { .. })));
        Ok(())
    }

    #[test]
    fn test_run_invokes_once_per_row_in_order() -> anyhow::Result<()> {
        let root = tempdir()?;
        let out = root.path().join("out");
        let output = OutputConfig::default();
        let source = Path::new("movie.mp4");

        let rows = vec![
            row(2, "01:00", "00:30", out.join("scene_1.mp4").to_str().unwrap()),
            row(3, "02:31", "00:25", out.join("scene_2.mp4").to_str().unwrap()),
        ];

        let mut runner = Runner::new(source, &output, Recorder::default());
        assert_eq!(runner.run(rows)?, 2);
        assert!(out.is_dir());

        let jobs = runner.into_trimmer().jobs;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].start_time, "01:00");
        assert_eq!(jobs[0].duration, "00:30");
        assert_eq!(jobs[0].output, out.join("scene_1.mp4"));
        assert_eq!(jobs[1].start_time, "02:31");
        assert_eq!(jobs[1].output, out.join("scene_2.mp4"));
        Ok(())
    }

    #[test]
    fn test_run_stops_after_failed_invocation() -> anyhow::Result<()> {
        let root = tempdir()?;
        let output = OutputConfig::default();
        let source = Path::new("movie.mp4");
        let name = |n: &str| root.path().join(n).to_str().unwrap().to_string();

        let rows = vec![
            row(2, "00:00", "00:01", &name("a.mp4")),
            row(3, "00:01", "00:01", &name("b.mp4")),
            row(4, "00:02", "00:01", &name("c.mp4")),
        ];

        let recorder = Recorder {
            fail_on_row: Some(3),
            ..Default::default()
        };
        let mut runner = Runner::new(source, &output, recorder);
        let result = runner.run(rows);

        assert!(matches!(result, Err(ClipError::ToolLaunch { .. })));
        let rows_seen: Vec<usize> = runner.into_trimmer().jobs.iter().map(|j| j.row).collect();
        assert_eq!(rows_seen, vec![2, 3]);
        Ok(())
    }

    #[test]
    fn test_run_stops_at_invalid_row_before_invoking_it() -> anyhow::Result<()> {
        let root = tempdir()?;
        let csv = format!(
            "filename,start_time,duration\n{},01:00,00:30\n{},02:31,\n{},03:00,00:10\n",
            root.path().join("scene_1.mp4").display(),
            root.path().join("scene_2.mp4").display(),
            root.path().join("scene_3.mp4").display(),
        );
        let output = OutputConfig::default();
        let manifest = Manifest::from_reader(csv.as_bytes())?;

        let mut runner = Runner::new(Path::new("movie.mp4"), &output, Recorder::default());
        let err = runner.run(manifest.rows()).unwrap_err();

        assert_eq!(err.row(), Some(3));
        assert!(err.to_string().contains("duration"));
        let jobs = runner.into_trimmer().jobs;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].row, 2);
        Ok(())
    }

    #[test]
    fn test_run_empty_manifest() -> anyhow::Result<()> {
        let output = OutputConfig::default();
        let mut runner = Runner::new(Path::new("movie.mp4"), &output, Recorder::default());
        assert_eq!(runner.run(Vec::<Result<ClipRow, ClipError>>::new())?, 0);
        assert!(runner.into_trimmer().jobs.is_empty());
        Ok(())
    }
}
