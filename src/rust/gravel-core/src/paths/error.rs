use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Opaque origin context attached to resolution errors.
///
/// Callers pass a reference to wherever the offending string came from (a
/// build-file location, a command-line argument, ...). The resolver never
/// inspects it; it only carries it into the error so the diagnostics layer
/// can point at the right input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blame(Arc<str>);

impl Blame {
    pub fn new(origin: impl Into<Arc<str>>) -> Self {
        Blame(origin.into())
    }

    pub fn origin(&self) -> &str {
        &self.0
    }
}

impl Default for Blame {
    fn default() -> Self {
        Blame(Arc::from("<unknown>"))
    }
}

impl From<&str> for Blame {
    fn from(origin: &str) -> Self {
        Blame(Arc::from(origin))
    }
}

impl From<String> for Blame {
    fn from(origin: String) -> Self {
        Blame(Arc::from(origin))
    }
}

impl fmt::Display for Blame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A path-resolution failure. Every variant is fatal to the call that
/// produced it; there is no retry and no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Resolution was asked for an empty string.
    #[error("invalid path: empty input (from {blame})")]
    EmptyInput { blame: Blame },

    /// Lexical collapsing of ".." moved above the declared root.
    #[error("path \"{input}\" escapes source root (from {blame})")]
    EscapesRoot { input: String, blame: Blame },

    /// Unrecognized absolute-path form, e.g. a malformed drive-letter
    /// prefix such as "/C:foo".
    #[error("malformed absolute path \"{input}\" (from {blame})")]
    MalformedAbsolute { input: String, blame: Blame },
}

/// Discriminant of [`ResolveError`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    EmptyInput,
    EscapesRoot,
    MalformedAbsolute,
}

impl ResolveError {
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::EmptyInput { .. } => ResolveErrorKind::EmptyInput,
            ResolveError::EscapesRoot { .. } => ResolveErrorKind::EscapesRoot,
            ResolveError::MalformedAbsolute { .. } => ResolveErrorKind::MalformedAbsolute,
        }
    }

    pub fn blame(&self) -> &Blame {
        match self {
            ResolveError::EmptyInput { blame }
            | ResolveError::EscapesRoot { blame, .. }
            | ResolveError::MalformedAbsolute { blame, .. } => blame,
        }
    }
}
