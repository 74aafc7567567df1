//! Result indexing: decode generated artifact names into a CSV table.
//!
//! Names that do not follow the convention are logged and skipped; a batch
//! directory usually holds a few legacy or auxiliary renders.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

// Trait must be in scope for `.write_all()` on `BufWriter`.
use io::Write;

use ignore::WalkBuilder;
use tracing::{info, warn};

use crate::identifier::{self, ARTIFACT_EXTENSION};
use crate::model::ParsedIdentifier;

/// Column order of the index table.
pub const COLUMNS: [&str; 10] = [
    "filename", "path", "name", "weather", "guidance", "edge", "seg", "seg_mask", "vis", "depth",
];

/// Default index filename inside the indexed directory.
pub const DEFAULT_INDEX_FILE: &str = "video_index.csv";

/// Errors that can occur while indexing.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("generation directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, IndexError>;

/// One decoded artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    /// Absolute path of the artifact.
    pub path: PathBuf,
    pub parsed: ParsedIdentifier,
}

impl IndexRow {
    fn fields(&self) -> [String; 10] {
        let p = &self.parsed;
        [
            p.filename.clone(),
            self.path.display().to_string(),
            p.subject_name.clone(),
            p.prompt_type.clone(),
            format!("{:?}", p.guidance),
            format!("{:?}", p.edge),
            format!("{:?}", p.seg),
            p.seg_mask.to_string(),
            format!("{:?}", p.vis),
            format!("{:?}", p.depth),
        ]
    }
}

/// Decodes every `.mp4` under `dir` into an index row.
///
/// Only the top level is scanned unless `recursive` is set. Rows are sorted
/// by path.
pub fn index_directory(dir: &Path, recursive: bool) -> Result<Vec<IndexRow>> {
    if !dir.is_dir() {
        return Err(IndexError::MissingDirectory(dir.to_path_buf()));
    }
    let root = dir.canonicalize()?;

    let mut builder = WalkBuilder::new(&root);
    builder.standard_filters(false).sort_by_file_name(Ord::cmp);
    if !recursive {
        builder.max_depth(Some(1));
    }

    let mut rows = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if !is_file || path.extension().is_none_or(|ext| ext != ARTIFACT_EXTENSION) {
            continue;
        }

        let filename = entry.file_name().to_string_lossy();
        match identifier::decode(&filename) {
            Ok(parsed) => rows.push(IndexRow {
                path: path.to_path_buf(),
                parsed,
            }),
            Err(e) => warn!("Skipping '{filename}': {e}"),
        }
    }

    rows.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(rows)
}

/// Writes the index table as CSV, replacing any existing file.
///
/// Parent directories are created. Returns the number of rows written.
pub fn write_index_csv(path: &Path, rows: &[IndexRow]) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut out = io::BufWriter::new(fs::File::create(path)?);
    write_record(&mut out, COLUMNS)?;
    for row in rows {
        write_record(&mut out, row.fields())?;
    }
    out.flush()?;

    info!("Wrote {} video entries → {}", rows.len(), path.display());
    Ok(rows.len())
}

fn write_record<W, S>(out: &mut W, fields: impl IntoIterator<Item = S>) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|f| quote_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")
}

/// Quotes a CSV field when it contains a delimiter, quote, or line break.
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
