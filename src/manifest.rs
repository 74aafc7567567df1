//! Manifest building: enumerate scenario axes into unique manifest entries.
//!
//! Enumeration order is subject, prompt type, guidance, then preset. The
//! order is part of the output: rebuilding the same campaign yields the same
//! manifest line for line.

mod writer;

pub use writer::write_manifest;

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::identifier;
use crate::model::{
    ChannelEntry, ChannelSet, ControlChannel, Guidance, ManifestEntry, SEG_MASK_FILE,
    ScenarioRecord,
};

/// Errors that can occur while building or writing a manifest.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("duplicate identifier in one build: {0} (two combinations encode the same way)")]
    DuplicateIdentifier(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, BuildError>;

/// The axes whose cartesian product is enumerated.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    pub subjects: Vec<String>,
    pub prompt_types: Vec<String>,
    pub guidance: Vec<Guidance>,
    pub presets: Vec<ChannelSet>,
}

impl Axes {
    /// Number of combinations the axes enumerate.
    pub fn combinations(&self) -> usize {
        self.subjects.len() * self.prompt_types.len() * self.guidance.len() * self.presets.len()
    }
}

/// Where the generation job finds its inputs.
#[derive(Debug, Clone)]
pub struct Sources {
    /// Source video every entry transfers from.
    pub video: PathBuf,

    /// Directory holding one `<prompt_type>.txt` per prompt type.
    pub prompt_root: PathBuf,

    /// Directory holding the per-channel control assets.
    pub control_root: PathBuf,
}

/// Result of a build: accepted entries plus identifiers skipped because
/// their artifact already exists.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub entries: Vec<ManifestEntry>,
    pub skipped: Vec<String>,
}

/// Enumerates axes into manifest entries.
pub struct ManifestBuilder {
    sources: Sources,
    axes: Axes,
}

impl ManifestBuilder {
    pub fn new(sources: Sources, axes: Axes) -> Self {
        Self { sources, axes }
    }

    /// Enumerates every combination into a manifest.
    ///
    /// With `output_dir`, combinations whose `<identifier>.mp4` already exists
    /// there are skipped, so an interrupted batch can be resumed. Two
    /// combinations encoding to the same identifier abort the build.
    pub fn build(&self, output_dir: Option<&Path>) -> Result<BuildOutcome> {
        let mut outcome = BuildOutcome::default();
        let mut seen: HashSet<String> = HashSet::new();

        for subject in &self.axes.subjects {
            for prompt_type in &self.axes.prompt_types {
                for &guidance in &self.axes.guidance {
                    for &channels in &self.axes.presets {
                        let record = ScenarioRecord {
                            subject_name: subject.clone(),
                            prompt_type: prompt_type.clone(),
                            guidance,
                            channels,
                        };
                        let id = identifier::encode(&record);

                        if let Some(dir) = output_dir
                            && dir.join(identifier::artifact_name(&id)).try_exists()?
                        {
                            debug!(identifier = %id, "artifact exists, skipping");
                            outcome.skipped.push(id);
                            continue;
                        }

                        if !seen.insert(id.clone()) {
                            return Err(BuildError::DuplicateIdentifier(id));
                        }

                        outcome.entries.push(self.entry(id, &record));
                    }
                }
            }
        }

        info!(
            accepted = outcome.entries.len(),
            skipped = outcome.skipped.len(),
            "manifest built"
        );
        Ok(outcome)
    }

    fn entry(&self, name: String, record: &ScenarioRecord) -> ManifestEntry {
        let channel = |kind| self.channel_entry(&record.channels, kind);

        ManifestEntry {
            name,
            prompt_path: self
                .sources
                .prompt_root
                .join(format!("{}.txt", record.prompt_type)),
            video_path: self.sources.video.clone(),
            guidance: record.guidance,
            edge: channel(ControlChannel::Edge),
            seg: channel(ControlChannel::Seg),
            depth: channel(ControlChannel::Depth),
            vis: channel(ControlChannel::Vis),
        }
    }

    /// Sub-object for one channel; `None` when the channel is inactive.
    #[allow(clippy::float_cmp)] // Only an exact zero means inactive.
    fn channel_entry(&self, channels: &ChannelSet, kind: ControlChannel) -> Option<ChannelEntry> {
        let weight = channels.weight(kind);
        if weight == 0.0 {
            return None;
        }

        let root = &self.sources.control_root;
        Some(ChannelEntry {
            control_weight: weight,
            control_path: channels
                .has_control_path(kind)
                .then(|| root.join(kind.asset_file())),
            mask_path: (kind == ControlChannel::Seg && channels.seg_mask())
                .then(|| root.join(SEG_MASK_FILE)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn sources() -> Sources {
        Sources {
            video: PathBuf::from("data/input.mp4"),
            prompt_root: PathBuf::from("data/prompts"),
            control_root: PathBuf::from("data"),
        }
    }

    fn axes(presets: Vec<ChannelSet>) -> Axes {
        Axes {
            subjects: vec!["car".into()],
            prompt_types: vec!["rain".into()],
            guidance: vec![Guidance::Int(7)],
            presets,
        }
    }

    #[test]
    fn single_edge_preset_builds_one_entry() {
        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![ChannelSet::default().with_edge(1.0, true)]),
        );

        let outcome = builder.build(None).unwrap();
        assert_eq!(outcome.entries.len(), 1);

        let entry = &outcome.entries[0];
        assert_eq!(entry.name, "car_rain_7_10_0_f_0_0");
        assert_eq!(entry.prompt_path, PathBuf::from("data/prompts/rain.txt"));

        let json: serde_json::Value = serde_json::to_value(entry).unwrap();
        assert_eq!(json["edge"]["control_weight"], serde_json::json!(1.0));
        assert!(
            json["edge"]["control_path"]
                .as_str()
                .unwrap()
                .ends_with("edge.mp4")
        );
        assert!(json.get("seg").is_none());
        assert!(json.get("vis").is_none());
        assert!(json.get("depth").is_none());
    }

    #[test]
    fn segmentation_carries_control_and_mask_paths() {
        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![
                ChannelSet::default().with_seg(0.5, true).with_depth(0.9, false),
            ]),
        );

        let outcome = builder.build(None).unwrap();
        let entry = &outcome.entries[0];
        assert_eq!(entry.name, "car_rain_7_0_5_t_0_9");

        let seg = entry.seg.as_ref().unwrap();
        assert_eq!(seg.control_path, Some(PathBuf::from("data/seg.mp4")));
        assert_eq!(seg.mask_path, Some(PathBuf::from("data/seg_mask.mp4")));

        let depth = entry.depth.as_ref().unwrap();
        assert!(depth.control_path.is_none());
        assert!(depth.mask_path.is_none());
    }

    #[test]
    fn zero_weight_channel_is_omitted() {
        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![ChannelSet::default().with_vis(1.0, true).with_edge(0.0, true)]),
        );

        let entry = &builder.build(None).unwrap().entries[0];
        assert!(entry.edge.is_none());
        assert_eq!(
            entry.vis.as_ref().unwrap().control_path,
            Some(PathBuf::from("data/vis.mp4"))
        );
    }

    #[test]
    fn enumerates_subject_prompt_guidance_preset_order() {
        let builder = ManifestBuilder::new(
            sources(),
            Axes {
                subjects: vec!["a".into(), "b".into()],
                prompt_types: vec!["fog".into(), "night".into()],
                guidance: vec![Guidance::Int(3), Guidance::Int(7)],
                presets: vec![
                    ChannelSet::default().with_edge(1.0, false),
                    ChannelSet::default().with_depth(1.0, false),
                ],
            },
        );

        let names: Vec<String> = builder
            .build(None)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names.len(), 16);
        assert_eq!(
            &names[..5],
            [
                "a_fog_3_10_0_f_0_0",
                "a_fog_3_0_0_f_0_10",
                "a_fog_7_10_0_f_0_0",
                "a_fog_7_0_0_f_0_10",
                "a_night_3_10_0_f_0_0",
            ]
        );
        assert_eq!(names[8], "b_fog_3_10_0_f_0_0");
    }

    #[test]
    fn presets_differing_only_in_control_path_collide() {
        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![
                ChannelSet::default().with_edge(1.0, true),
                ChannelSet::default().with_edge(1.0, false),
            ]),
        );

        let err = builder.build(None).unwrap_err();
        assert!(
            matches!(err, BuildError::DuplicateIdentifier(ref id) if id == "car_rain_7_10_0_f_0_0")
        );
    }

    #[test]
    fn presets_truncating_to_same_tenths_collide() {
        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![
                ChannelSet::default().with_depth(0.96, false),
                ChannelSet::default().with_depth(0.91, false),
            ]),
        );

        assert!(matches!(
            builder.build(None),
            Err(BuildError::DuplicateIdentifier(_))
        ));
    }

    #[test]
    fn existing_artifact_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("car_rain_7_10_0_f_0_0.mp4"), b"").unwrap();

        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![
                ChannelSet::default().with_edge(1.0, true),
                ChannelSet::default().with_vis(0.5, false),
            ]),
        );

        let outcome = builder.build(Some(dir.path())).unwrap();
        assert_eq!(outcome.skipped, vec!["car_rain_7_10_0_f_0_0".to_string()]);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].name, "car_rain_7_0_0_f_5_0");
    }

    #[test]
    fn existing_artifact_masks_a_duplicate() {
        // A skipped identifier is never recorded as seen.
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("car_rain_7_10_0_f_0_0.mp4"), b"").unwrap();

        let builder = ManifestBuilder::new(
            sources(),
            axes(vec![
                ChannelSet::default().with_edge(1.0, true),
                ChannelSet::default().with_edge(1.0, false),
            ]),
        );

        let outcome = builder.build(Some(dir.path())).unwrap();
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
    }

    #[test]
    fn int_and_whole_float_guidance_are_distinct() {
        let mut axes = axes(vec![ChannelSet::default().with_edge(1.0, true)]);
        axes.guidance = vec![Guidance::Int(7), Guidance::Float(7.0)];

        let outcome = ManifestBuilder::new(sources(), axes).build(None).unwrap();
        let names: Vec<&str> = outcome.entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, ["car_rain_7_10_0_f_0_0", "car_rain_7.0_10_0_f_0_0"]);
    }

    #[test]
    fn existing_whole_float_artifact_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("car_rain_7.0_10_0_f_0_0.mp4"), b"").unwrap();

        let mut axes = axes(vec![ChannelSet::default().with_edge(1.0, true)]);
        axes.guidance = vec![Guidance::Float(7.0)];

        let outcome = ManifestBuilder::new(sources(), axes)
            .build(Some(dir.path()))
            .unwrap();
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.skipped, ["car_rain_7.0_10_0_f_0_0"]);
    }

    #[test]
    fn duplicate_message_names_combinations() {
        let err = BuildError::DuplicateIdentifier("car_rain_7_10_0_f_0_0".into());
        assert!(err.to_string().contains("two combinations"), "{err}");
    }

    #[test]
    fn combinations_counts_product() {
        let axes = Axes {
            subjects: vec!["a".into()],
            prompt_types: vec!["fog".into(), "rain".into(), "snow".into()],
            guidance: vec![Guidance::Int(3), Guidance::Int(7)],
            presets: vec![ChannelSet::default(); 4],
        };
        assert_eq!(axes.combinations(), 24);
    }
}
