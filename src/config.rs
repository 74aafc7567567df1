//! Campaign configuration.
//!
//! A campaign is one sweep: the axes to enumerate, where the generation job
//! finds its inputs, and where the manifest and artifacts go. Campaigns are
//! loaded from TOML or picked from the built-ins.

mod builtin;

pub use builtin::{BUILTIN_NAMES, builtin};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::identifier::{SEPARATOR, weight_tenths};
use crate::manifest::{Axes, Sources};
use crate::model::{ChannelSet, ControlChannel, Guidance};

/// A sweep campaign.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Campaign {
    pub subjects: Vec<String>,
    pub prompt_types: Vec<String>,
    pub guidance: Vec<Guidance>,
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    pub presets: Vec<ChannelSet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SourcesConfig {
    pub video: PathBuf,
    pub prompt_root: PathBuf,
    pub control_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Where the JSONL manifest is written.
    pub manifest: PathBuf,

    /// Where the generation job writes its artifacts.
    pub generations: PathBuf,
}

impl Campaign {
    /// Load and validate a campaign file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        Self::from_toml_str(&contents).map_err(|e| format!("invalid campaign at {}: {e}", path.display()))
    }

    /// Parse and validate a campaign from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let campaign: Self = toml::from_str(contents).map_err(|e| e.to_string())?;
        campaign.validate()?;
        Ok(campaign)
    }

    /// Reject campaigns that cannot build; warn about ones that build lossy names.
    pub fn validate(&self) -> Result<(), String> {
        for (axis, len) in [
            ("subjects", self.subjects.len()),
            ("prompt-types", self.prompt_types.len()),
            ("guidance", self.guidance.len()),
            ("presets", self.presets.len()),
        ] {
            if len == 0 {
                return Err(format!("{axis} must not be empty"));
            }
        }

        for (i, preset) in self.presets.iter().enumerate() {
            for channel in ControlChannel::ALL {
                let weight = preset.weight(channel);
                if !(0.0..=1.0).contains(&weight) {
                    return Err(format!(
                        "preset {}: {} weight {weight} is outside [0, 1]",
                        i + 1,
                        channel.key()
                    ));
                }
                if !has_one_decimal(weight) {
                    warn!(
                        "preset {}: {} weight {weight} is truncated to {} tenths in names",
                        i + 1,
                        channel.key(),
                        weight_tenths(weight)
                    );
                }
            }
        }

        for prompt_type in &self.prompt_types {
            if prompt_type.contains(SEPARATOR) {
                warn!(
                    "prompt type '{prompt_type}' contains '{SEPARATOR}'; \
                     decoded names will split it into the subject"
                );
            }
        }

        Ok(())
    }

    pub fn axes(&self) -> Axes {
        Axes {
            subjects: self.subjects.clone(),
            prompt_types: self.prompt_types.clone(),
            guidance: self.guidance.clone(),
            presets: self.presets.clone(),
        }
    }

    pub fn sources(&self) -> Sources {
        Sources {
            video: self.sources.video.clone(),
            prompt_root: self.sources.prompt_root.clone(),
            control_root: self.sources.control_root.clone(),
        }
    }
}

#[allow(clippy::cast_precision_loss)] // Tenths of a unit weight.
fn has_one_decimal(weight: f64) -> bool {
    (weight_tenths(weight) as f64 / 10.0 - weight).abs() < 1e-9
}
