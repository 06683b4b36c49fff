//! Inbound event decoding errors.
//!
//! An [`EventError`] means the parser sent something the engine cannot turn
//! into a typed [`crate::DialectEvent`]: a name outside the
//! `<prefix>::error::<json|schema>` grammar, a payload of the wrong shape, or
//! keyword params that do not match their keyword.

use thiserror::Error;

/// An inbound event could not be turned into a typed dialect event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The event name does not follow `<prefix>::error::<json|schema>`.
    #[error("unrecognized event name '{0}'")]
    UnknownEvent(String),

    /// The payload did not have the expected shape.
    #[error("malformed payload for '{event}': {source}")]
    Payload {
        /// The event whose payload failed to decode.
        event: String,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A validator record carried params of the wrong shape for its keyword.
    #[error("invalid params for keyword '{keyword}': expected {expected}")]
    InvalidParams {
        /// The keyword of the offending record.
        keyword: String,
        /// What the params should have contained.
        expected: &'static str,
    },
}
