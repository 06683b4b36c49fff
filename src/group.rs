//! Grouping validator errors by location.
//!
//! [`group_errors`] partitions one resource's error list into [`ErrorGroup`]s
//! keyed by data path. Groups appear in the order their path was first seen and
//! each group keeps its errors in their original relative order.

use indexmap::IndexMap;

use crate::error::RawValidationError;

/// Errors sharing one location in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorGroup {
    key: String,
    positions: Vec<usize>,
    errors: Vec<RawValidationError>,
}

impl ErrorGroup {
    /// Returns the normalized data path shared by every error in the group.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the errors of the group in original order.
    pub fn errors(&self) -> &[RawValidationError] {
        &self.errors
    }

    /// Pairs each error with its position in the ungrouped list.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &RawValidationError)> {
        self.positions.iter().copied().zip(self.errors.iter())
    }

    /// Returns the number of errors in the group.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if the group holds no errors. Groups built by
    /// [`group_errors`] never are.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Partitions errors by normalized data path.
///
/// The partition is stable: the sequence of group keys is the sequence of
/// first-seen paths, and every input error lands in exactly one group.
///
/// # Example
///
/// ```rust
/// use confcheck::{group_errors, Keyword, RawValidationError};
///
/// let errors = vec![
///     RawValidationError::new("/a", Keyword::Type, "first"),
///     RawValidationError::new("/b", Keyword::Type, "second"),
///     RawValidationError::new("/a", Keyword::Enum, "third"),
/// ];
///
/// let groups = group_errors(&errors);
/// let keys: Vec<_> = groups.iter().map(|g| g.key()).collect();
/// assert_eq!(keys, vec!["a", "b"]);
/// assert_eq!(groups[0].len(), 2);
/// ```
pub fn group_errors(errors: &[RawValidationError]) -> Vec<ErrorGroup> {
    let mut groups: IndexMap<&str, ErrorGroup> = IndexMap::new();

    for (position, error) in errors.iter().enumerate() {
        let key = error.data_path.property();
        let group = groups.entry(key).or_insert_with(|| ErrorGroup {
            key: key.to_string(),
            positions: Vec::new(),
            errors: Vec::new(),
        });
        group.positions.push(position);
        group.errors.push(error.clone());
    }

    groups.into_values().collect()
}
