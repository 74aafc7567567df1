//! Guidance: the scalar strength passed opaquely to the generation job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A guidance value kept in the numeric form it was authored in.
///
/// `7` and `7.5` both appear in campaigns. The identifier embeds the natural
/// string form, and the manifest writes back the same JSON number kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Guidance {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Guidance {
    #[allow(clippy::float_cmp)] // Exact zero fraction only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // A whole float keeps its `.0`, so `7.0` and `7` name different files.
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}
