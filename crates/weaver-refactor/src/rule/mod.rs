//! Rule invocation protocol.
//!
//! A [`RuleDescriptor`] pairs an ordered tuple of requirements with a factory
//! that accepts one value per requirement, in the same order. Evaluation
//! runs each requirement against the shared [`RuleContext`] in declared
//! order and stops at the first failure; only when every requirement
//! succeeds is the factory called with the produced values.
//!
//! Arity and value types are checked by the compiler: a factory whose
//! parameters do not match the requirement outputs cannot be used to build a
//! descriptor.
//!
//! ```compile_fail
//! use weaver_refactor::{RuleDescriptor, SourceRange, SourceRangeSelectionRequirement};
//!
//! struct Noop;
//!
//! // One requirement, but the factory expects two values.
//! let descriptor = RuleDescriptor::new(
//!     "mismatched",
//!     (SourceRangeSelectionRequirement,),
//!     |_range: SourceRange, _name: String| Noop,
//! );
//! ```

mod edit;


use std::sync::Arc;

use tracing::debug;

use crate::context::RuleContext;
use crate::error::{RuleError, RuleFailure};
use crate::option::RefactoringOption;
use crate::requirement::{REQUIREMENT_TARGET, RequirementKind, RuleRequirement};

pub use self::edit::{SourceEdit, apply_edits};

/// A constructed rule, ready to compute its edits.
pub trait RefactoringRule {
    /// Computes the edits that perform the refactoring.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] when the rule cannot produce edits for the
    /// context it was constructed for.
    fn apply(&self, context: &RuleContext) -> Result<Vec<SourceEdit>, RuleError>;
}

/// An ordered list of requirements evaluated as one unit.
///
/// Implemented for tuples of one to six [`RuleRequirement`]s.
pub trait RequirementList {
    /// Tuple of requirement outputs, in declared order.
    type Values;

    /// Evaluates every requirement in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleFailure`] naming `rule` and the position of the first
    /// requirement that failed. Values produced before the failure are
    /// dropped.
    fn evaluate_all(&self, rule: &str, context: &RuleContext) -> Result<Self::Values, RuleFailure>;

    /// Returns the options consulted by any requirement in the list.
    fn refactoring_options(&self) -> Vec<Arc<dyn RefactoringOption>>;

    /// Returns the kind of each requirement, in declared order.
    fn kinds(&self) -> Vec<RequirementKind>;
}

/// Builds a rule from the values produced by a [`RequirementList`].
///
/// Implemented for every `Fn(A, B, ...) -> R` whose parameters match the
/// requirement outputs, which covers rule constructors such as
/// `MyRule::new`.
pub trait RuleFactory<Values> {
    /// The constructed rule type.
    type Rule;

    /// Constructs the rule from the evaluated requirement values.
    fn construct(&self, values: Values) -> Self::Rule;
}

fn evaluate_at<R: RuleRequirement>(
    requirement: &R,
    position: usize,
    rule: &str,
    context: &RuleContext,
) -> Result<R::Output, RuleFailure> {
    requirement.evaluate(context).map_err(|error| {
        let describe = requirement.describe();
        debug!(
            target: REQUIREMENT_TARGET,
            rule,
            position,
            requirement = describe.as_str(),
            kind = error.kind().as_str(),
            "requirement failed; remaining requirements skipped"
        );
        RuleFailure::new(rule, position, describe, error)
    })
}

macro_rules! impl_rule_arity {
    ($($index:tt => $req:ident : $arg:ident),+) => {
        impl<$($req: RuleRequirement),+> RequirementList for ($($req,)+) {
            type Values = ($(<$req as RuleRequirement>::Output,)+);

            fn evaluate_all(
                &self,
                rule: &str,
                context: &RuleContext,
            ) -> Result<Self::Values, RuleFailure> {
                Ok(($(evaluate_at(&self.$index, $index, rule, context)?,)+))
            }

            fn refactoring_options(&self) -> Vec<Arc<dyn RefactoringOption>> {
                let mut options = Vec::new();
                $(options.extend(self.$index.refactoring_options());)+
                options
            }

            fn kinds(&self) -> Vec<RequirementKind> {
                vec![$(self.$index.kind()),+]
            }
        }

        impl<Func, Product, $($arg),+> RuleFactory<($($arg,)+)> for Func
        where
            Func: Fn($($arg),+) -> Product,
        {
            type Rule = Product;

            fn construct(&self, values: ($($arg,)+)) -> Product {
                self($(values.$index),+)
            }
        }
    };
}

impl_rule_arity!(0 => R0: A0);
impl_rule_arity!(0 => R0: A0, 1 => R1: A1);
impl_rule_arity!(0 => R0: A0, 1 => R1: A1, 2 => R2: A2);
impl_rule_arity!(0 => R0: A0, 1 => R1: A1, 2 => R2: A2, 3 => R3: A3);
impl_rule_arity!(0 => R0: A0, 1 => R1: A1, 2 => R2: A2, 3 => R3: A3, 4 => R4: A4);
impl_rule_arity!(0 => R0: A0, 1 => R1: A1, 2 => R2: A2, 3 => R3: A3, 4 => R4: A4, 5 => R5: A5);

/// A named rule: its requirements and the factory that consumes their
/// values.
///
/// # Example
///
/// ```
/// use weaver_refactor::{
///     OptionRequirement, RefactoringOption, RequiredOption, RuleContext, RuleDescriptor,
///     SourceRange, SourceRangeSelectionRequirement,
/// };
///
/// struct RenameSelection {
///     range: SourceRange,
///     new_name: String,
/// }
///
/// impl RenameSelection {
///     fn new(range: SourceRange, new_name: String) -> Self {
///         Self { range, new_name }
///     }
/// }
///
/// let new_name = RequiredOption::<String>::shared("new-name", "The new name");
/// let descriptor = RuleDescriptor::new(
///     "rename-selection",
///     (SourceRangeSelectionRequirement, OptionRequirement::new(new_name.clone())),
///     RenameSelection::new,
/// );
///
/// new_name.supply("total").expect("supply");
/// let context = RuleContext::new("let sum = 1;").with_selection(SourceRange::new(4, 7));
/// let rule = descriptor.evaluate(&context).expect("requirements satisfied");
/// assert_eq!(rule.range, SourceRange::new(4, 7));
/// assert_eq!(rule.new_name, "total");
/// ```
#[derive(Debug, Clone)]
pub struct RuleDescriptor<Reqs, F> {
    name: String,
    requirements: Reqs,
    factory: F,
}

impl<Reqs, F> RuleDescriptor<Reqs, F>
where
    Reqs: RequirementList,
    F: RuleFactory<Reqs::Values>,
{
    /// Creates a descriptor.
    ///
    /// The factory must accept exactly the requirement outputs, in order.
    #[must_use]
    pub fn new(name: impl Into<String>, requirements: Reqs, factory: F) -> Self {
        Self {
            name: name.into(),
            requirements,
            factory,
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requirement list.
    #[must_use]
    pub const fn requirements(&self) -> &Reqs {
        &self.requirements
    }

    /// Evaluates the requirements and, when all succeed, constructs the rule.
    ///
    /// # Errors
    ///
    /// Returns the first requirement failure, tagged with this rule's name
    /// and the failing position. The factory is not called.
    pub fn evaluate(&self, context: &RuleContext) -> Result<F::Rule, RuleFailure> {
        let values = self.requirements.evaluate_all(&self.name, context)?;
        debug!(
            target: REQUIREMENT_TARGET,
            rule = self.name.as_str(),
            "all requirements satisfied"
        );
        Ok(self.factory.construct(values))
    }
}

/// Type-erased view of a rule descriptor used by actions.
///
/// Actions hold candidate rules with different requirement lists and rule
/// types; this trait lets them be stored and evaluated uniformly.
pub trait ActionRule {
    /// Returns the rule name.
    fn name(&self) -> &str;

    /// Returns the options consulted by the rule's requirements.
    fn refactoring_options(&self) -> Vec<Arc<dyn RefactoringOption>>;

    /// Returns the kinds of the rule's requirements, in order.
    fn requirement_kinds(&self) -> Vec<RequirementKind>;

    /// Evaluates the requirements and constructs the rule.
    ///
    /// # Errors
    ///
    /// Returns the first requirement failure.
    fn try_construct(
        &self,
        context: &RuleContext,
    ) -> Result<Box<dyn RefactoringRule>, RuleFailure>;
}

impl<Reqs, F> ActionRule for RuleDescriptor<Reqs, F>
where
    Reqs: RequirementList,
    F: RuleFactory<Reqs::Values>,
    F::Rule: RefactoringRule + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn refactoring_options(&self) -> Vec<Arc<dyn RefactoringOption>> {
        self.requirements.refactoring_options()
    }

    fn requirement_kinds(&self) -> Vec<RequirementKind> {
        self.requirements.kinds()
    }

    fn try_construct(
        &self,
        context: &RuleContext,
    ) -> Result<Box<dyn RefactoringRule>, RuleFailure> {
        let rule = self.evaluate(context)?;
        Ok(Box::new(rule))
    }
}
