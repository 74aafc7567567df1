//! Manifest entries: the records consumed by the external generation job.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Guidance;

/// A single manifest line, serialized as one JSON object.
///
/// Field order is the wire order: name, paths, guidance, then channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// The identifier; also the stem of the artifact the job will produce.
    pub name: String,
    pub prompt_path: PathBuf,
    pub video_path: PathBuf,
    pub guidance: Guidance,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<ChannelEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seg: Option<ChannelEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<ChannelEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<ChannelEntry>,
}

/// Per-channel sub-object of a manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub control_weight: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_path: Option<PathBuf>,
}
