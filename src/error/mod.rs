//! Error types.
//!
//! Validator records ([`RawValidationError`]) are the engine's input, not its
//! failures. The crate's own failure modes are a sink refusing a diagnostic
//! ([`ReportError`], accumulated as [`ReportErrors`]) and an inbound event that
//! cannot be decoded ([`EventError`]).

mod event_error;
mod raw_error;
mod report_error;

pub use event_error::EventError;
pub use raw_error::{Keyword, KeywordParams, RawValidationError};
pub use report_error::{ReportError, ReportErrors};
