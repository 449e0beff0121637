//! Domain errors raised while gating refactoring rules.
//!
//! Requirement failures carry a first-class [`FailureKind`] so drivers can
//! rank and render them without inspecting message text. Composition layers
//! wrap failures with positional context ([`RuleFailure`]) but never change
//! the underlying kind or message.

use thiserror::Error;

use crate::range::SourceRange;

/// Classification of a requirement failure.
///
/// # Example
///
/// ```
/// use weaver_refactor::FailureKind;
///
/// assert_eq!(FailureKind::MissingOption.as_str(), "missing-option");
/// assert!(FailureKind::MissingOption.specificity() > FailureKind::NoSelection.specificity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// The context holds no valid source selection.
    NoSelection,
    /// A required option was never supplied.
    MissingOption,
    /// An option was supplied with a value that failed validation.
    InvalidOptionValue,
}

impl FailureKind {
    /// Returns the canonical kebab-case string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSelection => "no-selection",
            Self::MissingOption => "missing-option",
            Self::InvalidOptionValue => "invalid-option-value",
        }
    }

    /// Returns how actionable the failure is for a user.
    ///
    /// Higher values are preferred when a driver has to choose one failure
    /// to report out of several candidate rules.
    #[must_use]
    pub const fn specificity(self) -> u8 {
        match self {
            Self::NoSelection => 0,
            Self::MissingOption => 1,
            Self::InvalidOptionValue => 2,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure produced by a single requirement evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    /// The context did not report a valid selection.
    #[error("a selection is required")]
    NoSelection,

    /// A required option was never supplied.
    #[error("required option '{name}' was not supplied")]
    MissingOption {
        /// Option name.
        name: String,
    },

    /// An option was supplied with text that could not be accepted.
    #[error("invalid value '{value}' for option '{name}': {reason}")]
    InvalidOptionValue {
        /// Option name.
        name: String,
        /// The raw value that was rejected.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl RequirementError {
    /// Builds a [`RequirementError::MissingOption`] for the named option.
    #[must_use]
    pub fn missing_option(name: impl Into<String>) -> Self {
        Self::MissingOption { name: name.into() }
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NoSelection => FailureKind::NoSelection,
            Self::MissingOption { .. } => FailureKind::MissingOption,
            Self::InvalidOptionValue { .. } => FailureKind::InvalidOptionValue,
        }
    }
}

/// Errors raised while an option-value source populates an option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionSupplyError {
    /// The option slot was already populated.
    #[error("option '{name}' has already been supplied")]
    AlreadySupplied {
        /// Option name.
        name: String,
    },

    /// The raw text could not be parsed as the option's value type.
    ///
    /// The option still records the rejected text so that requirements
    /// evaluating it fail with [`RequirementError::InvalidOptionValue`].
    #[error("invalid value '{value}' for option '{name}': {reason}")]
    InvalidValue {
        /// Option name.
        name: String,
        /// The raw value that was rejected.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A requirement failure annotated with the rule and position it came from.
///
/// # Example
///
/// ```
/// use weaver_refactor::{FailureKind, RequirementError, RuleFailure};
///
/// let failure =
///     RuleFailure::new("rename-selection", 0, "selection", RequirementError::NoSelection);
/// assert_eq!(failure.kind(), FailureKind::NoSelection);
/// assert_eq!(failure.position(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "rule '{rule}' cannot be invoked: requirement #{} ({requirement}) failed: {source}",
    .position + 1
)]
pub struct RuleFailure {
    rule: String,
    position: usize,
    requirement: String,
    #[source]
    source: RequirementError,
}

impl RuleFailure {
    /// Creates a failure for the requirement at zero-based `position`.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        position: usize,
        requirement: impl Into<String>,
        source: RequirementError,
    ) -> Self {
        Self {
            rule: rule.into(),
            position,
            requirement: requirement.into(),
            source,
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns the zero-based position of the failing requirement.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the name of the failing requirement.
    #[must_use]
    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    /// Returns the underlying requirement error.
    #[must_use]
    pub const fn error(&self) -> &RequirementError {
        &self.source
    }

    /// Returns the failure classification of the underlying error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.source.kind()
    }

    /// Consumes the wrapper and returns the underlying requirement error.
    #[must_use]
    pub fn into_error(self) -> RequirementError {
        self.source
    }
}

/// Errors raised while a constructed rule computes its edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Two edits touch the same bytes.
    #[error("edits at {first} and {second} overlap")]
    OverlappingEdits {
        /// The earlier edit range.
        first: SourceRange,
        /// The later edit range.
        second: SourceRange,
    },

    /// An edit lies outside the source text or splits a character.
    #[error("edit range {range} is not valid for a source of {len} bytes")]
    EditOutOfBounds {
        /// The offending range.
        range: SourceRange,
        /// Length of the source in bytes.
        len: usize,
    },

    /// The rule refused to produce edits.
    #[error("{message}")]
    Failed {
        /// Human-readable reason.
        message: String,
    },
}

impl RuleError {
    /// Builds a [`RuleError::Failed`] from a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Errors raised by refactoring actions and the action registry.
#[derive(Debug, Error)]
pub enum ActionError {
    /// No action with the given name is registered.
    #[error("refactoring action '{name}' not found in registry")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// An action with the same name is already registered.
    #[error("refactoring action '{name}' is already registered")]
    AlreadyRegistered {
        /// Duplicate action name.
        name: String,
    },

    /// The action declaration is unusable.
    #[error("invalid refactoring action: {message}")]
    InvalidAction {
        /// Description of the validation failure.
        message: String,
    },

    /// None of the action's candidate rules had all requirements satisfied.
    #[error("refactoring action '{action}' cannot be performed: {reported}")]
    NoApplicableRule {
        /// Action name.
        action: String,
        /// The most actionable failure among the candidates.
        reported: Box<RuleFailure>,
        /// Every candidate failure, in candidate order.
        failures: Vec<RuleFailure>,
    },

    /// The selected rule failed while computing its edits.
    #[error("rule '{rule}' of refactoring action '{action}' failed: {source}")]
    RuleExecution {
        /// Action name.
        action: String,
        /// Rule name.
        rule: String,
        /// Underlying rule failure.
        #[source]
        source: RuleError,
    },
}

impl ActionError {
    /// Returns the requirement failure kind reported to the user, if any.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::NoApplicableRule { reported, .. } => Some(reported.kind()),
            _ => None,
        }
    }
}
