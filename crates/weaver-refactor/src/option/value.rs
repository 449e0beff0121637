//! Value types accepted by refactoring options.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The kind of value an option accepts.
///
/// Drivers use the kind to decide how to expose an option, for example as a
/// boolean flag or as a flag taking a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free-form text.
    String,
    /// `true` or `false`.
    Boolean,
    /// Signed integer.
    Integer,
    /// Unsigned integer.
    Unsigned,
    /// Filesystem path.
    Path,
}

impl ValueKind {
    /// Returns the placeholder used in help text for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value type that can be supplied to an option as raw text.
pub trait OptionValue: Clone + fmt::Debug + Send + Sync + 'static {
    /// Kind reported to drivers.
    const KIND: ValueKind;

    /// Parses raw text, returning a human-readable reason on failure.
    ///
    /// # Errors
    ///
    /// Returns the reason the text was rejected.
    fn parse(raw: &str) -> Result<Self, String>;
}

impl OptionValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn parse(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }
}

impl OptionValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(String::from("expected a boolean (true or false)")),
        }
    }
}

impl OptionValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn parse(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse()
            .map_err(|error| format!("expected an integer: {error}"))
    }
}

impl OptionValue for u64 {
    const KIND: ValueKind = ValueKind::Unsigned;

    fn parse(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse()
            .map_err(|error| format!("expected an unsigned integer: {error}"))
    }
}

impl OptionValue for PathBuf {
    const KIND: ValueKind = ValueKind::Path;

    fn parse(raw: &str) -> Result<Self, String> {
        if raw.trim().is_empty() {
            return Err(String::from("expected a non-empty path"));
        }
        Ok(Self::from(raw))
    }
}
