//! Identity-deduplicated collections of options.

use std::sync::Arc;

use super::RefactoringOption;

/// Ordered set of options, deduplicated by identity.
///
/// Two handles to the same option count once; two distinct options that
/// happen to share a name are both kept so that registration can reject the
/// clash (see [`OptionSet::duplicate_names`]).
///
/// # Example
///
/// ```
/// use weaver_refactor::{OptionSet, RequiredOption};
///
/// let new_name = RequiredOption::<String>::shared("new-name", "The new name");
/// let mut set = OptionSet::new();
/// assert!(set.insert(new_name.clone()));
/// assert!(!set.insert(new_name));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    options: Vec<Arc<dyn RefactoringOption>>,
}

impl OptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option unless the same instance is already present.
    ///
    /// Returns `true` when the option was added.
    pub fn insert(&mut self, option: Arc<dyn RefactoringOption>) -> bool {
        if self.contains(&option) {
            return false;
        }
        self.options.push(option);
        true
    }

    /// Returns `true` when this exact option instance is present.
    #[must_use]
    pub fn contains(&self, option: &Arc<dyn RefactoringOption>) -> bool {
        self.options
            .iter()
            .any(|existing| same_option(existing, option))
    }

    /// Looks up an option by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn RefactoringOption>> {
        self.options.iter().find(|option| option.name() == name)
    }

    /// Iterates over the options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RefactoringOption>> {
        self.options.iter()
    }

    /// Returns the names of distinct options that share a name.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (index, option) in self.options.iter().enumerate() {
            let name = option.name();
            let clashes = self
                .options
                .iter()
                .skip(index + 1)
                .any(|other| other.name() == name);
            if clashes && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Returns the required options that have not been supplied yet.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&Arc<dyn RefactoringOption>> {
        self.options
            .iter()
            .filter(|option| option.is_required() && !option.is_supplied())
            .collect()
    }

    /// Returns the number of distinct options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` when the set holds no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Extend<Arc<dyn RefactoringOption>> for OptionSet {
    fn extend<I: IntoIterator<Item = Arc<dyn RefactoringOption>>>(&mut self, iter: I) {
        for option in iter {
            self.insert(option);
        }
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a Arc<dyn RefactoringOption>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn RefactoringOption>>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

/// Compares data pointers only; vtable pointers for the same type may differ
/// between codegen units.
fn same_option(left: &Arc<dyn RefactoringOption>, right: &Arc<dyn RefactoringOption>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
}
