//! Control channels and their per-preset activation.

use serde::{Deserialize, Serialize};

/// An auxiliary conditioning signal that can drive a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlChannel {
    Edge,
    Seg,
    Vis,
    Depth,
}

impl ControlChannel {
    /// All channels, in identifier order.
    pub const ALL: [Self; 4] = [Self::Edge, Self::Seg, Self::Vis, Self::Depth];

    /// The key used for this channel in manifest JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::Edge => "edge",
            Self::Seg => "seg",
            Self::Vis => "vis",
            Self::Depth => "depth",
        }
    }

    /// Fixed filename of the control asset under the control root.
    pub fn asset_file(self) -> &'static str {
        match self {
            Self::Edge => "edge.mp4",
            Self::Seg => "seg.mp4",
            Self::Vis => "vis.mp4",
            Self::Depth => "depth.mp4",
        }
    }
}

/// Filename of the segmentation mask asset under the control root.
pub const SEG_MASK_FILE: &str = "seg_mask.mp4";

/// Activation of the edge, visibility, or depth channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChannelSetting {
    pub weight: f64,

    /// Whether the control asset accompanies this channel in the manifest.
    #[serde(default)]
    pub control_path: bool,
}

/// Activation of the segmentation channel.
///
/// Segmentation always carries its control asset; only the mask is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SegSetting {
    pub weight: f64,

    #[serde(default)]
    pub mask: bool,
}

/// The four optional channel activations of one preset or scenario.
///
/// An absent channel is equivalent to weight zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<ChannelSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seg: Option<SegSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vis: Option<ChannelSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<ChannelSetting>,
}

impl ChannelSet {
    /// Weight of a channel, zero when the channel is absent.
    pub fn weight(&self, channel: ControlChannel) -> f64 {
        match channel {
            ControlChannel::Edge => self.edge.map_or(0.0, |s| s.weight),
            ControlChannel::Seg => self.seg.map_or(0.0, |s| s.weight),
            ControlChannel::Vis => self.vis.map_or(0.0, |s| s.weight),
            ControlChannel::Depth => self.depth.map_or(0.0, |s| s.weight),
        }
    }

    /// Whether the channel's control asset path goes into the manifest.
    pub fn has_control_path(&self, channel: ControlChannel) -> bool {
        match channel {
            ControlChannel::Seg => self.seg.is_some(),
            ControlChannel::Edge => self.edge.is_some_and(|s| s.control_path),
            ControlChannel::Vis => self.vis.is_some_and(|s| s.control_path),
            ControlChannel::Depth => self.depth.is_some_and(|s| s.control_path),
        }
    }

    /// Whether the segmentation mask flag is set.
    pub fn seg_mask(&self) -> bool {
        self.seg.is_some_and(|s| s.mask)
    }

    #[must_use]
    pub fn with_edge(mut self, weight: f64, control_path: bool) -> Self {
        self.edge = Some(ChannelSetting {
            weight,
            control_path,
        });
        self
    }

    #[must_use]
    pub fn with_seg(mut self, weight: f64, mask: bool) -> Self {
        self.seg = Some(SegSetting { weight, mask });
        self
    }

    #[must_use]
    pub fn with_vis(mut self, weight: f64, control_path: bool) -> Self {
        self.vis = Some(ChannelSetting {
            weight,
            control_path,
        });
        self
    }

    #[must_use]
    pub fn with_depth(mut self, weight: f64, control_path: bool) -> Self {
        self.depth = Some(ChannelSetting {
            weight,
            control_path,
        });
        self
    }
}
