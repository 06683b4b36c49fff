//! Reporting failure types.
//!
//! This module provides [`ReportError`] for a single rejected emission and
//! [`ReportErrors`] for accumulating every rejection of one handling run.

use std::fmt::{self, Display};

use stillwater::prelude::*;

/// A reporting sink refused a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The sink rejected the diagnostic for this resource.
    #[error("sink rejected diagnostic for '{resource}': {reason}")]
    Rejected {
        /// The resource the diagnostic was reported against.
        resource: String,
        /// Why the sink refused it.
        reason: String,
    },

    /// The sink is no longer accepting diagnostics.
    #[error("reporting sink is closed")]
    Closed,
}

impl ReportError {
    /// Creates a rejection for the given resource.
    pub fn rejected(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::Rejected {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

/// A non-empty collection of reporting failures.
///
/// Groups are emitted concurrently, so more than one group may hit a failing
/// sink. `ReportErrors` keeps all of them, combining via `Semigroup`:
///
/// ```rust
/// use confcheck::{ReportError, ReportErrors};
/// use stillwater::prelude::*;
///
/// let a = ReportErrors::single(ReportError::Closed);
/// let b = ReportErrors::single(ReportError::rejected("tsconfig.json", "quota"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportErrors(NonEmptyVec<ReportError>);

impl ReportErrors {
    /// Creates a `ReportErrors` containing a single error.
    pub fn single(error: ReportError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ReportErrors` from a vec, or `None` when it is empty.
    pub fn from_vec(errors: Vec<ReportError>) -> Option<Self> {
        errors
            .into_iter()
            .map(Self::single)
            .reduce(|acc, next| acc.combine(next))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ReportError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ReportError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ReportError>`.
    pub fn into_vec(self) -> Vec<ReportError> {
        self.0.into_vec()
    }
}

impl Semigroup for ReportErrors {
    fn combine(self, other: Self) -> Self {
        ReportErrors(self.0.combine(other.0))
    }
}

impl Display for ReportErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reporting failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ReportErrors {}

impl IntoIterator for ReportErrors {
    type Item = ReportError;
    type IntoIter = std::vec::IntoIter<ReportError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Runs on different resources are handled on separate tasks.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ReportErrors>();
    assert_sync::<ReportErrors>();
};
