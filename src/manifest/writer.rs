//! Manifest persistence: one JSON object per line, no enclosing array.

use std::{fs, io, path::Path};

// Trait must be in scope for `.write_all()` on `BufWriter`.
use io::Write;

use tracing::info;

use crate::model::ManifestEntry;

use super::Result;

/// Writes entries to `path` as JSONL, replacing any existing file.
///
/// Parent directories are created. Returns the number of entries written.
pub fn write_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut out = io::BufWriter::new(fs::File::create(path)?);
    for entry in entries {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;

    info!("Wrote {} entries → {}", entries.len(), path.display());
    Ok(entries.len())
}
