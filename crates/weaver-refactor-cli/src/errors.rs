//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use weaver_refactor::{ActionError, OptionSupplyError, RangeError, RuleError};

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to register built-in actions: {0}")]
    Registry(ActionError),
    #[error("action '{action}' declares option '{name}', which clashes with a built-in argument")]
    ReservedOptionName { action: String, name: String },
    #[error("a refactoring action must be provided")]
    MissingAction,
    #[error("a source file must be provided")]
    MissingFile,
    #[error("failed to read {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("selection {selection} is not valid for {}: {source}", path.display())]
    Selection {
        selection: String,
        path: PathBuf,
        source: RangeError,
    },
    #[error("failed to supply option: {0}")]
    SupplyOption(OptionSupplyError),
    #[error(transparent)]
    Refactor(ActionError),
    #[error("failed to apply edits: {0}")]
    ApplyEdits(RuleError),
    #[error("failed to serialise edits: {0}")]
    SerialiseEdits(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
