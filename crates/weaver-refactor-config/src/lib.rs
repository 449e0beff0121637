//! Shared configuration for the `weaver-refactor` binary.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML file,
//! then `WEAVER_REFACTOR_*` environment variables, then command-line flags.
//! The file comes from `--config-path`, `WEAVER_REFACTOR_CONFIG_PATH` or a
//! `.weaver_refactor.toml` discovered in the working or home directory.

mod defaults;
mod logging;
mod output;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use self::defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
    default_output_mode,
};
pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::output::{OutputMode, OutputModeParseError};

/// Command-line flags consumed by the configuration loader.
///
/// These must precede the action name on the command line; anything after
/// the first unrecognised token is left for the action parser.
pub const CONFIG_CLI_FLAGS: &[&str] =
    &["--config-path", "--log-filter", "--log-format", "--output"];

/// Runtime configuration for the refactoring driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "WEAVER_REFACTOR")]
pub struct Config {
    /// Tracing filter directive, such as `weaver_refactor=debug`.
    #[ortho_config(default = default_log_filter_string())]
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log line format written to stderr.
    #[ortho_config(default = default_log_format())]
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// What to print after a successful refactoring.
    #[ortho_config(default = default_output_mode())]
    #[serde(default = "default_output_mode")]
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            output: default_output_mode(),
        }
    }
}

impl Config {
    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log line format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the output mode.
    #[must_use]
    pub const fn output(&self) -> OutputMode {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use rstest::rstest;

    use super::*;

    #[test]
    fn default_configuration_uses_built_in_values() {
        let config = Config::default();
        assert_eq!(config.log_filter(), default_log_filter());
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.output(), OutputMode::Source);
    }

    #[test]
    fn loading_without_flags_yields_the_defaults() {
        let config = Config::load_from_iter([OsString::from("weaver-refactor")])
            .expect("configuration loads without flags");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn cli_values_override_defaults() {
        let config = Config::load_from_iter(
            ["weaver-refactor", "--log-filter", "debug", "--output", "edits"]
                .into_iter()
                .map(OsString::from),
        )
        .expect("configuration loads");
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.log_format(), default_log_format());
        assert_eq!(config.output(), OutputMode::Edits);
    }

    #[rstest]
    #[case::json("json", LogFormat::Json)]
    #[case::compact("compact", LogFormat::Compact)]
    #[case::mixed_case("JSON", LogFormat::Json)]
    fn log_format_parses(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>(), Ok(expected));
    }

    #[rstest]
    #[case::source("source", OutputMode::Source)]
    #[case::edits("edits", OutputMode::Edits)]
    #[case::mixed_case("Edits", OutputMode::Edits)]
    fn output_mode_parses(#[case] raw: &str, #[case] expected: OutputMode) {
        assert_eq!(raw.parse::<OutputMode>(), Ok(expected));
    }

    #[test]
    fn unknown_output_mode_is_rejected() {
        assert!("diff".parse::<OutputMode>().is_err());
    }

    #[test]
    fn output_mode_displays_snake_case() {
        assert_eq!(OutputMode::Edits.to_string(), "edits");
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}
