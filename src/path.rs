//! Validator data paths.
//!
//! Schema validators locate a failure with a pointer such as `/compilerOptions/target`
//! or `.presets[0]`. This module provides [`DataPath`], which keeps the pointer as
//! supplied and exposes the display form used in diagnostics (leading separator
//! removed).

use std::fmt::{self, Display};

/// A validator-supplied pointer into a configuration document.
///
/// The raw pointer is kept verbatim. [`DataPath::property`] strips the single
/// leading separator (`/` or `.`) so the path reads as a property name in
/// messages.
///
/// # Example
///
/// ```rust
/// use confcheck::DataPath;
///
/// let path = DataPath::new("/compilerOptions");
/// assert_eq!(path.property(), "compilerOptions");
/// assert_eq!(path.to_string(), "compilerOptions");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DataPath {
    raw: String,
}

impl DataPath {
    /// Creates a path from the pointer emitted by the validator.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Creates the path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the pointer exactly as the validator supplied it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the pointer with its leading separator removed.
    pub fn property(&self) -> &str {
        self.raw
            .strip_prefix('/')
            .or_else(|| self.raw.strip_prefix('.'))
            .unwrap_or(&self.raw)
    }

    /// Returns true if the path points at the document root.
    pub fn is_root(&self) -> bool {
        self.property().is_empty()
    }
}

impl Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property())
    }
}

impl From<&str> for DataPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for DataPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
