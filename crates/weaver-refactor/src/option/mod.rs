//! Typed refactoring options shared between requirements.
//!
//! An option is a named, typed value supplied out of band (for example from
//! command-line flags) before any requirement is evaluated. The same logical
//! option is usually referenced by several requirements across several rules
//! of one action, so options are handed out as [`Arc`] handles and populated
//! exactly once: slots are write-once and reads never mutate.
//!
//! [`RequiredOption`] evaluates to its value type and fails with
//! [`RequirementError::MissingOption`] when never supplied.
//! [`OptionalOption`] evaluates to `Option<T>` and never reports a missing
//! value.

mod set;
mod value;


use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{OptionSupplyError, RequirementError};

pub use self::set::OptionSet;
pub use self::value::{OptionValue, ValueKind};

const OPTION_TARGET: &str = "weaver_refactor::option";

/// Object-safe view of an option used for enumeration and population.
///
/// Drivers use this trait to generate command-line flags, help text, or
/// prompts for every option an action needs, and to supply raw values
/// before evaluation begins.
pub trait RefactoringOption: fmt::Debug + Send + Sync {
    /// Returns the stable option name, such as `new-name`.
    fn name(&self) -> &str;

    /// Returns the human-readable description.
    fn description(&self) -> &str;

    /// Returns `true` when evaluation fails without a supplied value.
    fn is_required(&self) -> bool;

    /// Returns the kind of value the option accepts.
    fn value_kind(&self) -> ValueKind;

    /// Returns `true` once a value (valid or not) has been supplied.
    fn is_supplied(&self) -> bool;

    /// Supplies the option from raw text.
    ///
    /// Invalid text is still recorded so that evaluation reports
    /// [`RequirementError::InvalidOptionValue`].
    ///
    /// # Errors
    ///
    /// Returns [`OptionSupplyError::AlreadySupplied`] when the option has
    /// already been populated, or [`OptionSupplyError::InvalidValue`] when
    /// the text cannot be parsed as the option's value type.
    fn supply(&self, raw: &str) -> Result<(), OptionSupplyError>;
}

/// An option that knows the type it evaluates to.
pub trait TypedOption: RefactoringOption {
    /// Value produced by evaluation.
    type Value: Clone + fmt::Debug;

    /// Returns the current value.
    ///
    /// # Errors
    ///
    /// Returns [`RequirementError::MissingOption`] for required options that
    /// were never supplied and [`RequirementError::InvalidOptionValue`] when
    /// the supplied text was rejected.
    fn value(&self) -> Result<Self::Value, RequirementError>;
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Value(T),
    Invalid { value: String, reason: String },
}

/// Shared storage behind both option modes.
#[derive(Debug)]
struct OptionCell<T> {
    name: String,
    description: String,
    slot: OnceCell<Slot<T>>,
}

impl<T: OptionValue> OptionCell<T> {
    fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            slot: OnceCell::new(),
        }
    }

    fn fill(&self, slot: Slot<T>) -> Result<(), OptionSupplyError> {
        self.slot
            .set(slot)
            .map_err(|_| OptionSupplyError::AlreadySupplied {
                name: self.name.clone(),
            })
    }

    fn supply(&self, raw: &str) -> Result<(), OptionSupplyError> {
        if self.slot.get().is_some() {
            return Err(OptionSupplyError::AlreadySupplied {
                name: self.name.clone(),
            });
        }
        match T::parse(raw) {
            Ok(value) => {
                debug!(target: OPTION_TARGET, option = self.name.as_str(), "option supplied");
                self.fill(Slot::Value(value))
            }
            Err(reason) => {
                debug!(
                    target: OPTION_TARGET,
                    option = self.name.as_str(),
                    reason = reason.as_str(),
                    "option supplied with an invalid value"
                );
                self.fill(Slot::Invalid {
                    value: raw.to_owned(),
                    reason: reason.clone(),
                })?;
                Err(OptionSupplyError::InvalidValue {
                    name: self.name.clone(),
                    value: raw.to_owned(),
                    reason,
                })
            }
        }
    }

    fn read(&self) -> Result<Option<T>, RequirementError> {
        match self.slot.get() {
            None => Ok(None),
            Some(Slot::Value(value)) => Ok(Some(value.clone())),
            Some(Slot::Invalid { value, reason }) => Err(RequirementError::InvalidOptionValue {
                name: self.name.clone(),
                value: value.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

macro_rules! impl_refactoring_option {
    ($option:ident, $required:expr) => {
        impl<T: OptionValue> RefactoringOption for $option<T> {
            fn name(&self) -> &str {
                &self.cell.name
            }

            fn description(&self) -> &str {
                &self.cell.description
            }

            fn is_required(&self) -> bool {
                $required
            }

            fn value_kind(&self) -> ValueKind {
                T::KIND
            }

            fn is_supplied(&self) -> bool {
                self.cell.slot.get().is_some()
            }

            fn supply(&self, raw: &str) -> Result<(), OptionSupplyError> {
                self.cell.supply(raw)
            }
        }

        impl<T: OptionValue> $option<T> {
            /// Creates an unsupplied option.
            #[must_use]
            pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
                Self {
                    cell: OptionCell::new(name, description),
                }
            }

            /// Creates an unsupplied option behind a shared handle.
            #[must_use]
            pub fn shared(name: impl Into<String>, description: impl Into<String>) -> Arc<Self> {
                Arc::new(Self::new(name, description))
            }

            /// Supplies an already-typed value.
            ///
            /// # Errors
            ///
            /// Returns [`OptionSupplyError::AlreadySupplied`] when the option
            /// has already been populated.
            pub fn set_value(&self, value: T) -> Result<(), OptionSupplyError> {
                self.cell.fill(Slot::Value(value))
            }
        }
    };
}

/// An option that must be supplied for evaluation to succeed.
///
/// # Example
///
/// ```
/// use weaver_refactor::{RefactoringOption, RequiredOption, TypedOption};
///
/// let new_name = RequiredOption::<String>::shared("new-name", "The new symbol name");
/// assert!(new_name.value().is_err());
///
/// new_name.supply("total_price").expect("first supply succeeds");
/// assert_eq!(new_name.value().expect("supplied"), "total_price");
/// ```
#[derive(Debug)]
pub struct RequiredOption<T> {
    cell: OptionCell<T>,
}

impl_refactoring_option!(RequiredOption, true);

impl<T: OptionValue> TypedOption for RequiredOption<T> {
    type Value = T;

    fn value(&self) -> Result<T, RequirementError> {
        self.cell
            .read()?
            .ok_or_else(|| RequirementError::missing_option(self.cell.name.clone()))
    }
}

/// An option that evaluates to `None` when never supplied.
///
/// # Example
///
/// ```
/// use weaver_refactor::{OptionalOption, RefactoringOption, TypedOption};
///
/// let limit = OptionalOption::<u64>::shared("max-occurrences", "Stop after this many edits");
/// assert_eq!(limit.value(), Ok(None));
///
/// limit.supply("3").expect("valid number");
/// assert_eq!(limit.value(), Ok(Some(3)));
/// ```
#[derive(Debug)]
pub struct OptionalOption<T> {
    cell: OptionCell<T>,
}

impl_refactoring_option!(OptionalOption, false);

impl<T: OptionValue> TypedOption for OptionalOption<T> {
    type Value = Option<T>;

    fn value(&self) -> Result<Option<T>, RequirementError> {
        self.cell.read()
    }
}
