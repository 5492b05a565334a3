use std::fmt;

/// A directory in the two-root filesystem model.
///
/// Non-null values begin and end with a slash. Two leading slashes mark a
/// path relative to the source tree root ("source-absolute"); a single
/// leading slash marks a system-absolute path, with Windows-style drive
/// paths normalized to the form "/C:/foo/". The empty string is the null
/// path.
///
/// Equality, ordering and hashing are all over the raw string, so a
/// `DirPath` can be used as a key in any hash or ordered container.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirPath {
    value: String,
}

impl DirPath {
    /// Stores the string verbatim. Callers are responsible for the
    /// leading/trailing slash convention; no normalization happens here.
    pub fn new(value: impl Into<String>) -> Self {
        DirPath {
            value: value.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_empty()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// True if the path starts with "//", marking it relative to the
    /// source tree root.
    pub fn is_source_absolute(&self) -> bool {
        self.value.starts_with("//")
    }

    /// True if the path starts with a single slash, marking a
    /// system-absolute path.
    pub fn is_system_absolute(&self) -> bool {
        !self.value.is_empty() && !self.is_source_absolute()
    }

    /// The source-absolute value with only one leading slash, for
    /// concatenating directories together.
    ///
    /// # Panics
    ///
    /// Panics if the path is not source-absolute. Calling this on a
    /// system-absolute or null path is a caller bug, not a runtime
    /// condition.
    pub fn source_absolute_with_one_slash(&self) -> &str {
        assert!(
            self.is_source_absolute(),
            "source_absolute_with_one_slash on non-source-absolute path {:?}",
            self.value
        );
        &self.value[1..]
    }

    /// The value without its final slash. The root forms "/" and "//" are
    /// returned unchanged.
    pub fn with_no_trailing_slash(&self) -> &str {
        if self.value.len() > 2 && self.value.ends_with('/') {
            &self.value[..self.value.len() - 1]
        } else {
            &self.value
        }
    }

    /// Replaces the stored string wholesale. Intended for resolver
    /// internals; treat it as constructing a new value, not as a mutation
    /// that can be observed mid-flight.
    pub fn replace(&mut self, value: String) {
        self.value = value;
    }
}

impl fmt::Display for DirPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for DirPath {
    fn from(value: &str) -> Self {
        DirPath::new(value)
    }
}

impl From<String> for DirPath {
    fn from(value: String) -> Self {
        DirPath::new(value)
    }
}
