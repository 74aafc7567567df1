//! CLI interface for sweep.
//!
//! Each subcommand is non-interactive: arguments in, files or JSON out.
//! Machine-readable output goes to stdout; progress is logged to stderr.
//!
//! - `sweep build`: enumerate a campaign into a JSONL manifest.
//! - `sweep decode`: recover scenario metadata from artifact names.
//! - `sweep index`: decode a generations directory into a CSV table.
//! - `sweep sort`: copy artifacts into per-prompt-type directories.
//! - `sweep campaigns`: list built-in campaigns.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::config::{self, BUILTIN_NAMES, Campaign};
use crate::identifier;
use crate::index::{self, DEFAULT_INDEX_FILE};
use crate::manifest::{self, ManifestBuilder};
use crate::sort::{self, DEFAULT_PROMPT_TYPES};

/// Sweep: batch video-generation manifests and result indexing.
#[derive(Debug, Parser)]
#[command(name = "sweep", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: one sweep
  1. sweep build --campaign av-realistic
     → scripts/av_configs.jsonl, skipping artifacts already in outputs/av_realistic
  2. run the generation job on the manifest
  3. sweep index outputs/av_realistic --recursive
  4. sweep sort outputs/av_realistic

Re-running step 1 after an interrupted job only lists what is still missing.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enumerate a campaign into a JSONL manifest.
    ///
    /// Combinations whose artifact already exists in the generations
    /// directory are skipped. Two combinations with the same identifier
    /// abort the build.
    Build {
        #[command(flatten)]
        source: CampaignSource,

        /// Write the manifest here instead of the campaign's manifest path.
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Check this directory for existing artifacts instead of the
        /// campaign's generations directory.
        #[arg(long)]
        generations: Option<PathBuf>,

        /// Emit every combination, even ones already generated.
        #[arg(long)]
        no_skip: bool,
    },

    /// Decode artifact names and print one JSON object per name.
    ///
    /// Names that do not follow the convention are reported and skipped.
    Decode {
        /// Artifact filenames or bare identifiers.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Decode every artifact in a directory into a CSV index.
    Index {
        /// Generations directory.
        dir: PathBuf,

        /// CSV path (defaults to `<dir>/video_index.csv`).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Descend into subdirectories.
        #[arg(long)]
        recursive: bool,
    },

    /// Copy artifacts into one directory per prompt type.
    Sort {
        /// Generations directory.
        dir: PathBuf,

        /// Prompt types to sort by, first match wins. Can be specified
        /// multiple times. Defaults to the standard weather set.
        #[arg(long = "prompt-type")]
        prompt_types: Vec<String>,

        /// Destination root (defaults to `<dir>_results`).
        #[arg(long)]
        dest: Option<PathBuf>,
    },

    /// List built-in campaigns.
    Campaigns,
}

/// Where a campaign comes from: a TOML file or a built-in.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct CampaignSource {
    /// Campaign TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in campaign name.
    #[arg(long)]
    campaign: Option<String>,
}

impl CampaignSource {
    fn resolve(&self) -> Result<Campaign, String> {
        match (&self.config, &self.campaign) {
            (Some(path), _) => Campaign::load(path),
            (None, Some(name)) => config::builtin(name).ok_or_else(|| {
                format!(
                    "no built-in campaign '{name}' (available: {})",
                    BUILTIN_NAMES.join(", ")
                )
            }),
            (None, None) => Err("specify --config or --campaign".to_string()),
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            source,
            manifest,
            generations,
            no_skip,
        } => {
            let campaign = source.resolve()?;
            cmd_build(&campaign, manifest, generations, no_skip)
        }
        Command::Decode { names } => cmd_decode(&names),
        Command::Index {
            dir,
            out,
            recursive,
        } => cmd_index(&dir, out, recursive),
        Command::Sort {
            dir,
            prompt_types,
            dest,
        } => cmd_sort(&dir, prompt_types, dest),
        Command::Campaigns => {
            for name in BUILTIN_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn cmd_build(
    campaign: &Campaign,
    manifest_path: Option<PathBuf>,
    generations: Option<PathBuf>,
    no_skip: bool,
) -> Result<(), String> {
    let manifest_path = manifest_path.unwrap_or_else(|| campaign.output.manifest.clone());
    let generations = generations.unwrap_or_else(|| campaign.output.generations.clone());

    fs::create_dir_all(&generations)
        .map_err(|e| format!("failed to create {}: {e}", generations.display()))?;

    let axes = campaign.axes();
    info!("Enumerating {} combinations", axes.combinations());

    let outcome = ManifestBuilder::new(campaign.sources(), axes)
        .build((!no_skip).then_some(generations.as_path()))
        .map_err(|e| format!("build failed: {e}"))?;

    for id in &outcome.skipped {
        info!("Entry {id} already exists, skipping...");
    }

    manifest::write_manifest(&manifest_path, &outcome.entries)
        .map_err(|e| format!("failed to write {}: {e}", manifest_path.display()))?;

    Ok(())
}

fn cmd_decode(names: &[String]) -> Result<(), String> {
    for name in names {
        match identifier::decode(name) {
            Ok(parsed) => {
                let json = serde_json::to_string(&parsed)
                    .map_err(|e| format!("failed to serialize {name}: {e}"))?;
                println!("{json}");
            }
            Err(e) => warn!("Skipping '{name}': {e}"),
        }
    }
    Ok(())
}

fn cmd_index(dir: &Path, out: Option<PathBuf>, recursive: bool) -> Result<(), String> {
    let out = out.unwrap_or_else(|| dir.join(DEFAULT_INDEX_FILE));

    let rows = index::index_directory(dir, recursive).map_err(|e| e.to_string())?;
    index::write_index_csv(&out, &rows)
        .map_err(|e| format!("failed to write {}: {e}", out.display()))?;

    Ok(())
}

fn cmd_sort(dir: &Path, prompt_types: Vec<String>, dest: Option<PathBuf>) -> Result<(), String> {
    let prompt_types = if prompt_types.is_empty() {
        DEFAULT_PROMPT_TYPES.iter().map(ToString::to_string).collect()
    } else {
        prompt_types
    };
    let dest = dest.unwrap_or_else(|| sort::default_destination(dir));

    let report = sort::sort_by_prompt_type(dir, &prompt_types, &dest).map_err(|e| e.to_string())?;

    eprintln!(
        "Copied {} file(s) → {} ({} auxiliary, {} unmatched skipped)",
        report.copied.len(),
        dest.display(),
        report.auxiliary,
        report.unmatched
    );
    Ok(())
}
