use crate::paths::DirPath;
use std::fmt;

/// A file in the two-root filesystem model.
///
/// Same string conventions as [`DirPath`] except the value never ends in a
/// slash. Equality, ordering and hashing are over the raw string.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePath {
    value: String,
}

impl FilePath {
    pub fn new(value: impl Into<String>) -> Self {
        FilePath {
            value: value.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_empty()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_source_absolute(&self) -> bool {
        self.value.starts_with("//")
    }

    pub fn is_system_absolute(&self) -> bool {
        !self.value.is_empty() && !self.is_source_absolute()
    }

    /// The directory containing this file: everything up to and including
    /// the final slash. Null for a null file path.
    pub fn dir(&self) -> DirPath {
        match self.value.rfind('/') {
            Some(pos) => DirPath::new(&self.value[..=pos]),
            None => DirPath::new(""),
        }
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for FilePath {
    fn from(value: &str) -> Self {
        FilePath::new(value)
    }
}

impl From<String> for FilePath {
    fn from(value: String) -> Self {
        FilePath::new(value)
    }
}
