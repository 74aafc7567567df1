//! The naming convention shared by manifests and generated artifacts.
//!
//! ```text
//! SUBJECT_PROMPTTYPE_GUIDANCE_EDGE10_SEG10_SEGMASK_VIS10_DEPTH10[.mp4]
//! ```
//!
//! Weights are stored as tenths, truncated toward zero. `SEGMASK` is `t` or `f`.
//!
//! Decoding reads the seven config tokens from the right and rejoins whatever
//! is left as the subject, so subjects may contain the separator. Prompt
//! types must not: a prompt type with a separator in it shifts its leading
//! part into the subject when decoded.

use std::path::Path;

use crate::model::{ControlChannel, ParsedIdentifier, ScenarioRecord};

/// Joins the fields of an identifier.
pub const SEPARATOR: char = '_';

/// Extension of the artifacts the generation job writes.
pub const ARTIFACT_EXTENSION: &str = "mp4";

/// Number of config tokens after the subject.
const CONFIG_TOKENS: usize = 7;

/// Errors from decoding an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected at least {} tokens, found {found}", CONFIG_TOKENS + 1)]
    TooFewTokens { found: usize },

    #[error("{field} token {token:?} is not numeric")]
    NumericParse { field: &'static str, token: String },
}

/// Encode a weight as truncated tenths.
///
/// Finer precision than one decimal is dropped: 0.96 and 0.91 both give 9.
#[allow(clippy::cast_possible_truncation)] // Truncation is the encoding.
pub fn weight_tenths(weight: f64) -> i64 {
    (weight * 10.0).trunc() as i64
}

/// Build the identifier for a scenario.
///
/// Never fails; keeping the separator out of the prompt type is up to the caller.
pub fn encode(record: &ScenarioRecord) -> String {
    let channels = &record.channels;
    let tenths = |channel| weight_tenths(channels.weight(channel));

    [
        record.subject_name.clone(),
        record.prompt_type.clone(),
        record.guidance.to_string(),
        tenths(ControlChannel::Edge).to_string(),
        tenths(ControlChannel::Seg).to_string(),
        if channels.seg_mask() { "t" } else { "f" }.to_string(),
        tenths(ControlChannel::Vis).to_string(),
        tenths(ControlChannel::Depth).to_string(),
    ]
    .join(&SEPARATOR.to_string())
}

/// Artifact filename for an identifier.
pub fn artifact_name(identifier: &str) -> String {
    format!("{identifier}.{ARTIFACT_EXTENSION}")
}

/// Recover scenario metadata from an identifier or artifact filename.
///
/// Leading directories and a trailing `.mp4` are stripped. Other dots stay,
/// since a float guidance carries one. The prompt type is taken as-is.
pub fn decode(filename: &str) -> Result<ParsedIdentifier, ParseError> {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);
    let stem = base
        .strip_suffix(ARTIFACT_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(base);

    let tokens: Vec<&str> = stem.split(SEPARATOR).collect();
    if tokens.len() <= CONFIG_TOKENS {
        return Err(ParseError::TooFewTokens {
            found: tokens.len(),
        });
    }

    let (name, config) = tokens.split_at(tokens.len() - CONFIG_TOKENS);
    let [prompt_type, guidance, edge, seg, seg_mask, vis, depth] = config else {
        unreachable!("split_at leaves exactly {CONFIG_TOKENS} config tokens");
    };

    Ok(ParsedIdentifier {
        filename: filename.to_string(),
        subject_name: name.join(&SEPARATOR.to_string()),
        prompt_type: (*prompt_type).to_string(),
        guidance: guidance
            .parse()
            .map_err(|_| numeric_error("guidance", guidance))?,
        edge: parse_tenths("edge", edge)?,
        seg: parse_tenths("seg", seg)?,
        seg_mask: seg_mask.eq_ignore_ascii_case("t"),
        vis: parse_tenths("vis", vis)?,
        depth: parse_tenths("depth", depth)?,
    })
}

#[allow(clippy::cast_precision_loss)] // Tenths of a unit weight.
fn parse_tenths(field: &'static str, token: &str) -> Result<f64, ParseError> {
    let tenths: i64 = token.parse().map_err(|_| numeric_error(field, token))?;
    Ok(tenths as f64 / 10.0)
}

fn numeric_error(field: &'static str, token: &str) -> ParseError {
    ParseError::NumericParse {
        field,
        token: token.to_string(),
    }
}
