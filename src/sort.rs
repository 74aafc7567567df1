//! Result sorting: copy artifacts into one directory per prompt type.
//!
//! Matching is raw substring containment on the lowercased filename, not a
//! structured decode, so it also works on names that predate the convention.
//! Per-channel preview renders carry a marker such as `_edge` and are left out.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::identifier::ARTIFACT_EXTENSION;

/// Filename markers of per-channel preview renders.
pub const AUXILIARY_MARKERS: [&str; 4] = ["_edge", "_vis", "_depth", "_seg"];

/// Prompt types sorted when none are given.
pub const DEFAULT_PROMPT_TYPES: [&str; 6] =
    ["fog", "morning_sun", "night", "rain", "snow", "wooden_road"];

/// Errors that can occur while sorting.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    #[error("source directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, SortError>;

/// What a sorting pass did.
#[derive(Debug, Default)]
pub struct SortReport {
    /// Destination of every copied artifact, in source name order.
    pub copied: Vec<PathBuf>,

    /// Artifacts skipped for carrying an auxiliary marker.
    pub auxiliary: usize,

    /// Artifacts matching none of the prompt types.
    pub unmatched: usize,
}

/// Default destination for a source directory: `<source>_results`.
pub fn default_destination(source: &Path) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push("_results");
    PathBuf::from(name)
}

/// Where an artifact goes in a sorting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Sorted under this prompt type.
    PromptType(&'a str),

    /// A per-channel preview render; left out.
    Auxiliary,

    /// No prompt type occurs in the name.
    Unmatched,
}

/// Decide where an artifact sorts.
///
/// The first prompt type in list order that occurs in the filename wins.
pub fn classify<'a>(filename: &str, prompt_types: &'a [String]) -> Placement<'a> {
    let lower = filename.to_lowercase();
    if AUXILIARY_MARKERS.iter().any(|m| lower.contains(m)) {
        return Placement::Auxiliary;
    }
    prompt_types
        .iter()
        .find(|t| lower.contains(t.as_str()))
        .map_or(Placement::Unmatched, |t| Placement::PromptType(t.as_str()))
}

/// Copies each top-level `.mp4` in `source` into `dest/<prompt_type>/`.
pub fn sort_by_prompt_type(
    source: &Path,
    prompt_types: &[String],
    dest: &Path,
) -> Result<SortReport> {
    if !source.is_dir() {
        return Err(SortError::MissingDirectory(source.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    let mut report = SortReport::default();
    for name in names {
        if !name.ends_with(&format!(".{ARTIFACT_EXTENSION}")) {
            continue;
        }

        let prompt_type = match classify(&name, prompt_types) {
            Placement::PromptType(prompt_type) => prompt_type,
            Placement::Auxiliary => {
                debug!("Skipping auxiliary render '{name}'");
                report.auxiliary += 1;
                continue;
            }
            Placement::Unmatched => {
                debug!("No prompt type in '{name}'");
                report.unmatched += 1;
                continue;
            }
        };

        let dest_dir = dest.join(prompt_type);
        fs::create_dir_all(&dest_dir)?;
        let dest_path = dest_dir.join(&name);
        fs::copy(source.join(&name), &dest_path)?;

        info!("Copied {name} → {}", dest_dir.display());
        report.copied.push(dest_path);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn prompt_types() -> Vec<String> {
        DEFAULT_PROMPT_TYPES.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn classify_picks_first_listed_match() {
        let types = vec!["snow".to_string(), "no_snow".to_string()];
        assert_eq!(
            classify("av_no_snow_3_10_0_f_0_0.mp4", &types),
            Placement::PromptType("snow")
        );
    }

    #[test]
    fn classify_is_case_insensitive_on_filename() {
        assert_eq!(
            classify("Car_FOG_3_10_0_f_0_0.mp4", &prompt_types()),
            Placement::PromptType("fog")
        );
    }

    #[test]
    fn classify_skips_auxiliary_renders() {
        assert_eq!(
            classify("car_fog_3_10_0_f_0_0_edge.mp4", &prompt_types()),
            Placement::Auxiliary
        );
        assert_eq!(
            classify("car_fog_3_10_0_f_0_0_SEG.mp4", &prompt_types()),
            Placement::Auxiliary
        );
    }

    #[test]
    fn classify_reports_unmatched() {
        assert_eq!(
            classify("car_dusk_3_10_0_f_0_0.mp4", &prompt_types()),
            Placement::Unmatched
        );
    }

    #[test]
    fn default_destination_appends_suffix() {
        assert_eq!(
            default_destination(Path::new("outputs/av_realistic")),
            PathBuf::from("outputs/av_realistic_results")
        );
    }

    #[test]
    fn copies_into_prompt_type_directories() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("generations");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("car_fog_3_10_0_f_0_0.mp4"), b"fog").unwrap();
        fs::write(source.join("car_night_7_10_0_f_0_0.mp4"), b"night").unwrap();
        fs::write(source.join("car_night_7_10_0_f_0_0_depth.mp4"), b"aux").unwrap();
        fs::write(source.join("car_dusk_7_10_0_f_0_0.mp4"), b"?").unwrap();
        fs::write(source.join("car_fog.txt"), b"prompt").unwrap();
        fs::create_dir(source.join("rain")).unwrap();

        let dest = default_destination(&source);
        let report = sort_by_prompt_type(&source, &prompt_types(), &dest).unwrap();

        assert_eq!(report.copied.len(), 2);
        assert_eq!(report.auxiliary, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(
            fs::read(dest.join("fog").join("car_fog_3_10_0_f_0_0.mp4")).unwrap(),
            b"fog"
        );
        assert!(dest.join("night").join("car_night_7_10_0_f_0_0.mp4").is_file());
        assert!(!dest.join("night").join("car_night_7_10_0_f_0_0_depth.mp4").exists());
        assert!(!dest.join("rain").exists());
    }

    #[test]
    fn auxiliary_render_is_counted_once_not_copied() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("generations");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("car_rain_7_10_0_f_0_0_vis.mp4"), b"aux").unwrap();

        let dest = default_destination(&source);
        let report = sort_by_prompt_type(&source, &prompt_types(), &dest).unwrap();

        assert_eq!(report.auxiliary, 1);
        assert_eq!(report.unmatched, 0);
        assert!(report.copied.is_empty());
        assert!(!dest.join("rain").exists());
    }

    #[test]
    fn missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("missing");
        let err = sort_by_prompt_type(&source, &prompt_types(), &default_destination(&source))
            .unwrap_err();

        assert!(matches!(err, SortError::MissingDirectory(_)));
    }
}
