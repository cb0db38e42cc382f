use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ClipError;

pub const START_TIME: &str = "start_time";
pub const DURATION: &str = "duration";
pub const FILENAME: &str = "filename";

/// Spreadsheet numbering: the header is row 1
const FIRST_DATA_ROW: usize = 2;

/// One validated manifest row, values exactly as written in the CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRow {
    /// Spreadsheet-style row number (header is row 1)
    pub row: usize,
    /// Seek position, in whatever timecode format ffmpeg accepts
    pub start_time: String,
    /// Clip length, same format family as `start_time`
    pub duration: String,
    /// Output path as given in the manifest
    pub filename: String,
}

/// Header positions of the required columns
#[derive(Debug, Clone, Copy, Default)]
struct Columns {
    start_time: Option<usize>,
    duration: Option<usize>,
    filename: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        // A repeated header name resolves to its last occurrence
        let find = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .last()
                .map(|(i, _)| i)
        };
        Self {
            start_time: find(START_TIME),
            duration: find(DURATION),
            filename: find(FILENAME),
        }
    }
}

/// A CSV manifest whose header has been read
pub struct Manifest<R> {
    reader: csv::Reader<R>,
    columns: Columns,
}

impl Manifest<File> {
    /// Open a manifest file and read its header row
    pub fn open(path: &Path) -> Result<Self, ClipError> {
        let reader = builder()
            .from_path(path)
            .map_err(|source| ClipError::ManifestOpen {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_csv(reader)
    }
}

impl<R: Read> Manifest<R> {
    /// Read a manifest from any reader, header first
    pub fn from_reader(reader: R) -> Result<Self, ClipError> {
        Self::from_csv(builder().from_reader(reader))
    }

    fn from_csv(mut reader: csv::Reader<R>) -> Result<Self, ClipError> {
        let headers = reader
            .headers()
            .map_err(|source| ClipError::ManifestParse { row: 1, source })?;
        let columns = Columns::from_headers(headers);
        debug!("Manifest header: {:?} ({:?})", headers, columns);

        Ok(Self { reader, columns })
    }

    /// Lazily validated rows, in manifest order
    pub fn rows(self) -> Rows<R> {
        Rows {
            records: self.reader.into_records(),
            columns: self.columns,
            next_row: FIRST_DATA_ROW,
        }
    }
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    // Short rows must reach validation instead of failing inside the parser
    builder.has_headers(true).flexible(true);
    builder
}

/// Iterator over manifest rows. Each record is parsed and checked only when pulled.
pub struct Rows<R> {
    records: StringRecordsIntoIter<R>,
    columns: Columns,
    next_row: usize,
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<ClipRow, ClipError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let row = self.next_row;
        self.next_row += 1;

        Some(
            record
                .map_err(|source| ClipError::ManifestParse { row, source })
                .and_then(|record| validate_record(row, &record, &self.columns)),
        )
    }
}

/// Check that a record carries all required fields and that none is empty.
///
/// A column is missing only when the header does not name it. Every column is
/// checked for that before any is checked for emptiness. A row too short to
/// hold a named column counts as empty in that column.
fn validate_record(
    row: usize,
    record: &StringRecord,
    columns: &Columns,
) -> Result<ClipRow, ClipError> {
    let field = |index: Option<usize>, column: &'static str| {
        index
            .map(|i| record.get(i).unwrap_or(""))
            .ok_or(ClipError::MissingColumn { row, column })
    };

    let start_time = field(columns.start_time, START_TIME)?;
    let duration = field(columns.duration, DURATION)?;
    let filename = field(columns.filename, FILENAME)?;

    for (value, column) in [
        (start_time, START_TIME),
        (duration, DURATION),
        (filename, FILENAME),
    ] {
        if value.is_empty() {
            return Err(ClipError::EmptyValue { row, column });
        }
    }

    Ok(ClipRow {
        row,
        start_time: start_time.to_string(),
        duration: duration.to_string(),
        filename: filename.to_string(),
    })
}
