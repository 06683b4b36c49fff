//! Turning validator errors into sentences.
//!
//! - [`FormatterChain`]: ordered per-keyword [`Template`] table with a
//!   default-text fallback
//! - [`combine_disjunction`]: `anyOf` rendering from sibling errors

mod chain;
mod disjunction;

pub use chain::{FormatterChain, Template};
pub use disjunction::combine_disjunction;

use crate::error::{Keyword, RawValidationError};

/// Renders the error at `position` of a resource's full error list.
///
/// `anyOf` errors go through [`combine_disjunction`] when `disjunction` is
/// enabled; everything else goes through the chain.
pub fn render(
    chain: &FormatterChain,
    errors: &[RawValidationError],
    position: usize,
    disjunction: bool,
) -> String {
    match errors.get(position) {
        Some(error) if disjunction && error.keyword == Keyword::AnyOf => {
            combine_disjunction(chain, errors, position)
        }
        Some(error) => chain.format(error),
        None => String::new(),
    }
}
