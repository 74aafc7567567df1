//! Built-in campaigns for the two driving-scene sweeps.

use std::path::{Path, PathBuf};

use crate::model::{ChannelSet, Guidance};

use super::{Campaign, OutputConfig, SourcesConfig};

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: [&str; 2] = ["omniverse", "av-realistic"];

/// Look up a built-in campaign by name.
pub fn builtin(name: &str) -> Option<Campaign> {
    match name {
        "omniverse" => Some(omniverse()),
        "av-realistic" => Some(av_realistic()),
        _ => None,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn preset() -> ChannelSet {
    ChannelSet::default()
}

/// Simulator renders, with control assets for every guided channel.
fn omniverse() -> Campaign {
    let location = Path::new("../simulation_data");
    let subject = "omniverse_generations_av";

    Campaign {
        subjects: strings(&[subject]),
        prompt_types: strings(&["fog", "morning_sun", "night", "rain", "snow", "wooden_road"]),
        guidance: vec![Guidance::Int(3), Guidance::Int(7)],
        sources: SourcesConfig {
            video: location.join("simulator_rgb_input.mp4"),
            prompt_root: location.to_path_buf(),
            control_root: location.to_path_buf(),
        },
        output: OutputConfig {
            manifest: PathBuf::from("scripts/omniverse_av_configs.jsonl"),
            generations: Path::new("outputs").join(subject),
        },
        presets: vec![
            preset().with_vis(1.0, false),
            preset().with_depth(1.0, true),
            preset().with_edge(1.0, true),
            preset().with_edge(1.0, true).with_seg(0.6, false),
            preset()
                .with_edge(1.0, true)
                .with_seg(0.9, false)
                .with_depth(0.9, true),
            preset().with_edge(1.0, true).with_depth(0.9, true),
            preset()
                .with_edge(1.0, true)
                .with_depth(0.9, false)
                .with_seg(1.0, false),
            preset()
                .with_edge(1.0, true)
                .with_depth(0.9, false)
                .with_seg(0.5, false),
            preset().with_edge(0.9, true).with_depth(1.0, true),
            preset().with_edge(0.5, true).with_depth(1.0, true),
            preset()
                .with_edge(0.5, true)
                .with_depth(1.0, true)
                .with_seg(0.4, false),
            preset().with_edge(0.4, true).with_depth(1.0, true),
            preset().with_edge(1.0, true).with_depth(0.5, true),
            preset().with_edge(1.0, true).with_vis(0.2, false),
            preset().with_edge(1.0, true).with_vis(0.5, false),
            preset().with_edge(0.6, true).with_seg(0.4, false),
        ],
    }
}

/// Real driving footage; control signals are computed by the job itself.
fn av_realistic() -> Campaign {
    let location = Path::new("../milestone_data");
    let subject = "av_realistic";

    Campaign {
        subjects: strings(&[subject]),
        prompt_types: strings(&["fog", "morning_sun", "night", "rain", "no_snow", "wooden_road"]),
        guidance: vec![Guidance::Int(3), Guidance::Int(7)],
        sources: SourcesConfig {
            video: location.join("output_fixed.mp4"),
            prompt_root: location.join("clip_0_easier_prompts"),
            control_root: location.to_path_buf(),
        },
        output: OutputConfig {
            manifest: PathBuf::from("scripts/av_configs.jsonl"),
            generations: Path::new("outputs").join(subject),
        },
        presets: vec![
            preset().with_depth(1.0, false),
            preset().with_edge(1.0, false),
            preset().with_vis(1.0, false),
            preset().with_seg(1.0, false),
            preset().with_edge(1.0, false).with_depth(0.9, false),
            preset()
                .with_edge(1.0, false)
                .with_depth(0.9, false)
                .with_seg(1.0, false),
            preset()
                .with_edge(1.0, false)
                .with_depth(0.9, false)
                .with_seg(0.5, false),
            preset().with_edge(0.9, false).with_depth(1.0, false),
            preset().with_edge(0.5, false).with_depth(1.0, false),
            preset()
                .with_edge(0.5, false)
                .with_depth(1.0, false)
                .with_seg(0.4, false),
            preset().with_edge(0.4, false).with_depth(1.0, false),
            preset().with_edge(1.0, false).with_depth(0.5, false),
            preset()
                .with_edge(1.0, false)
                .with_depth(0.9, false)
                .with_vis(0.2, false),
            preset().with_edge(1.0, false).with_vis(0.2, false),
            preset().with_edge(1.0, false).with_vis(0.5, false),
            preset().with_edge(0.6, false).with_seg(0.4, false),
        ],
    }
}
