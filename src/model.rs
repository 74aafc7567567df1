//! Core data model for sweep.
//!
//! Presets and scenario records on the way in, manifest entries on the way
//! out, and the metadata recovered from artifact names afterwards.

mod channel;
mod entry;
mod guidance;
mod scenario;

pub use channel::{ChannelSet, ControlChannel, SEG_MASK_FILE};
pub use entry::{ChannelEntry, ManifestEntry};
pub use guidance::Guidance;
pub use scenario::{ParsedIdentifier, ScenarioRecord};
