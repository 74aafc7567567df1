//! Scenario records and the metadata recovered from artifact names.

use serde::Serialize;

use super::{ChannelSet, Guidance};

/// One combination enumerated by the manifest builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRecord {
    pub subject_name: String,
    pub prompt_type: String,
    pub guidance: Guidance,
    pub channels: ChannelSet,
}

/// Metadata recovered from an artifact filename.
///
/// Weights are the encoded tenths scaled back, so anything finer than one
/// decimal is gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIdentifier {
    /// The name exactly as it was handed to the decoder.
    pub filename: String,

    #[serde(rename = "name")]
    pub subject_name: String,

    #[serde(rename = "weather")]
    pub prompt_type: String,

    pub guidance: f64,
    pub edge: f64,
    pub seg: f64,
    pub seg_mask: bool,
    pub vis: f64,
    pub depth: f64,
}
