//! Rendering of `anyOf` failures.
//!
//! An `anyOf` failure says that none of several alternatives matched. Its
//! message is built from the formatted text of every other error reported for
//! the same resource, joined by `" or "`. The siblings are taken from the whole
//! resource, not just the errors sharing the `anyOf` location, so two `anyOf`
//! errors in one resource repeat each other's sibling text.

use crate::error::RawValidationError;
use crate::format::FormatterChain;

/// Joins the chain output of every error except the one at `position`.
///
/// Sibling `anyOf` errors are formatted by the chain like any other error.
///
/// An error with no siblings reports its own message. A plain join over zero
/// siblings would give an empty string, and an empty diagnostic says nothing,
/// so this is the one case that does not follow the join.
///
/// # Example
///
/// ```rust
/// use confcheck::{combine_disjunction, FormatterChain, Keyword, RawValidationError};
///
/// let errors = vec![
///     RawValidationError::new("/lib", Keyword::Type, "should be string"),
///     RawValidationError::new("/lib", Keyword::Type, "should be array"),
///     RawValidationError::new("/lib", Keyword::AnyOf, "should match some schema in anyOf"),
/// ];
///
/// let text = combine_disjunction(&FormatterChain::default(), &errors, 2);
/// assert_eq!(text, "should be string or should be array");
/// ```
pub fn combine_disjunction(
    chain: &FormatterChain,
    errors: &[RawValidationError],
    position: usize,
) -> String {
    let siblings: Vec<String> = errors
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, error)| chain.format(error))
        .collect();

    if siblings.is_empty() {
        return errors
            .get(position)
            .map(|error| error.message.clone())
            .unwrap_or_default();
    }

    siblings.join(" or ")
}
