//! What the binary writes to stdout on success.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What the CLI prints after a successful refactoring.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputMode {
    /// The rewritten source text.
    #[default]
    Source,
    /// The computed edits as a JSON array.
    Edits,
}

/// Errors encountered while parsing an [`OutputMode`] from text.
pub type OutputModeParseError = strum::ParseError;
