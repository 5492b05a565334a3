//! Lexical resolution of path strings against a [`DirPath`] base.
//!
//! Everything here is pure string and segment algebra: no filesystem
//! access, no canonicalization through symlinks. A candidate string is
//! either source-absolute ("//..."), system-absolute ("/...", or a drive
//! form under [`DriveStyle::Windows`]), or relative to the base directory.

use std::borrow::Cow;
use tracing::trace;

use crate::paths::{Blame, DirPath, FilePath, ResolveError};

/// How drive-letter syntax is interpreted in system-absolute paths.
///
/// The generator runs host-independently over path strings, so the
/// convention is a policy choice rather than a compile-time `cfg`:
/// `Windows` recognizes and validates "/C:/" (and bare "C:/") prefixes,
/// `Posix` treats ":" as an ordinary path character.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DriveStyle {
    #[default]
    Windows,
    Posix,
}

impl DirPath {
    /// Resolves `candidate` against this directory, producing a fully
    /// resolved absolute string.
    ///
    /// `as_file` controls the trailing-slash convention of the result:
    /// file results carry no trailing slash, directory results do (root
    /// forms excepted). If `source_root` is given, system-absolute
    /// candidates that lie inside it are rewritten to source-absolute
    /// form. `blame` identifies the origin of `candidate` for error
    /// reporting and is carried into any error verbatim.
    ///
    /// Uses the default [`DriveStyle`]; see [`DirPath::resolve_relative_with`].
    pub fn resolve_relative(
        &self,
        as_file: bool,
        candidate: &str,
        source_root: Option<&str>,
        blame: &Blame,
    ) -> Result<String, ResolveError> {
        self.resolve_relative_with(DriveStyle::default(), as_file, candidate, source_root, blame)
    }

    /// [`DirPath::resolve_relative`] with an explicit drive-letter policy.
    pub fn resolve_relative_with(
        &self,
        style: DriveStyle,
        as_file: bool,
        candidate: &str,
        source_root: Option<&str>,
        blame: &Blame,
    ) -> Result<String, ResolveError> {
        if candidate.is_empty() {
            return Err(ResolveError::EmptyInput {
                blame: blame.clone(),
            });
        }
        let as_dir = !as_file;
        let escapes = || ResolveError::EscapesRoot {
            input: candidate.to_string(),
            blame: blame.clone(),
        };

        // Source-absolute input is already fully resolved apart from "."
        // and ".." segments.
        if let Some(rest) = candidate.strip_prefix("//") {
            return collapse("//", rest, as_dir).ok_or_else(escapes);
        }

        if is_system_absolute_input(candidate, style) {
            // Bare drive forms ("C:/foo") normalize to the leading-slash
            // convention before anything else looks at them.
            let normalized: Cow<'_, str> = if candidate.starts_with('/') {
                Cow::Borrowed(candidate)
            } else {
                Cow::Owned(format!("/{candidate}"))
            };

            let (root, rest) =
                split_root(&normalized, style).ok_or_else(|| ResolveError::MalformedAbsolute {
                    input: candidate.to_string(),
                    blame: blame.clone(),
                })?;

            if let Some(source_root) = source_root {
                if let Some(remainder) = strip_source_root(&normalized, source_root, style) {
                    trace!(
                        candidate,
                        source_root,
                        "rewriting system-absolute path into source tree"
                    );
                    return collapse("//", &remainder, as_dir).ok_or_else(escapes);
                }
            }
            return collapse(&root, rest, as_dir).ok_or_else(escapes);
        }

        // Relative input resolves against this directory.
        debug_assert!(
            !self.is_null(),
            "resolving relative path {candidate:?} against a null directory"
        );
        let joined = format!("{}{}", self.value(), candidate);
        // A source-absolute base keeps its "//" root through the join;
        // split_root only understands system roots.
        if let Some(rest) = joined.strip_prefix("//") {
            return collapse("//", rest, as_dir).ok_or_else(escapes);
        }
        let (root, rest) =
            split_root(&joined, style).ok_or_else(|| ResolveError::MalformedAbsolute {
                input: candidate.to_string(),
                blame: blame.clone(),
            })?;
        collapse(&root, rest, as_dir).ok_or_else(escapes)
    }

    /// Typed wrapper: resolves `candidate` as a directory.
    pub fn resolve_relative_dir(
        &self,
        candidate: &str,
        source_root: Option<&str>,
        blame: &Blame,
    ) -> Result<DirPath, ResolveError> {
        let resolved = self.resolve_relative(false, candidate, source_root, blame)?;
        let mut dir = DirPath::default();
        dir.replace(resolved);
        Ok(dir)
    }

    /// Typed wrapper: resolves `candidate` as a file.
    pub fn resolve_relative_file(
        &self,
        candidate: &str,
        source_root: Option<&str>,
        blame: &Blame,
    ) -> Result<FilePath, ResolveError> {
        Ok(FilePath::new(self.resolve_relative(
            true,
            candidate,
            source_root,
            blame,
        )?))
    }
}

/// True for "/..." and, under the Windows style, bare drive forms like
/// "C:/foo". Two leading slashes are source-absolute and handled before
/// this is consulted.
fn is_system_absolute_input(s: &str, style: DriveStyle) -> bool {
    if s.starts_with('/') {
        return true;
    }
    if style == DriveStyle::Windows {
        let b = s.as_bytes();
        return b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && b[2] == b'/';
    }
    false
}

/// Splits a leading-slash system-absolute path into its root prefix and
/// the remainder. The root is "/" or, under the Windows style, a drive
/// root like "/C:/". Returns `None` for malformed drive syntax such as
/// "/C:foo".
fn split_root<'a>(path: &'a str, style: DriveStyle) -> Option<(Cow<'static, str>, &'a str)> {
    debug_assert!(path.starts_with('/'));
    if style == DriveStyle::Windows {
        let b = path.as_bytes();
        if b.len() >= 3 && b[1].is_ascii_alphabetic() && b[2] == b':' {
            return match b.get(3) {
                None => Some((Cow::Owned(format!("/{}:/", b[1] as char)), "")),
                Some(b'/') => Some((Cow::Owned(path[..4].to_string()), &path[4..])),
                Some(_) => None,
            };
        }
    }
    Some((Cow::Borrowed("/"), &path[1..]))
}

/// Collapses "." and ".." segments of `rest` under the given root prefix
/// (which ends in a slash). Directory results get a trailing slash unless
/// they are the bare root; file results never do. Returns `None` if a
/// ".." would move above the root.
fn collapse(root: &str, rest: &str, as_dir: bool) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(root.len() + rest.len() + 1);
    out.push_str(root);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(segment);
    }
    if as_dir && !segments.is_empty() {
        out.push('/');
    }
    Some(out)
}

/// If `path` lies inside `source_root`, returns the remainder (no leading
/// slash) to be re-rooted under "//". `source_root` may be given with or
/// without a trailing slash and, under the Windows style, with or without
/// the leading slash of the normalized drive form; drive letters compare
/// case-insensitively.
fn strip_source_root(path: &str, source_root: &str, style: DriveStyle) -> Option<String> {
    let mut root = source_root.trim_end_matches('/').to_string();
    if root.is_empty() {
        return None;
    }
    if !root.starts_with('/') {
        root.insert(0, '/');
    }

    if !starts_with_root(path, &root, style) {
        return None;
    }
    match path.as_bytes().get(root.len()) {
        None => Some(String::new()),
        Some(b'/') => Some(path[root.len() + 1..].to_string()),
        Some(_) => None,
    }
}

fn starts_with_root(path: &str, root: &str, style: DriveStyle) -> bool {
    if path.len() < root.len() {
        return false;
    }
    let (p, r) = (path.as_bytes(), root.as_bytes());
    for i in 0..r.len() {
        if p[i] == r[i] {
            continue;
        }
        // Drive letters compare case-insensitively under the Windows style.
        if style == DriveStyle::Windows
            && i == 1
            && p[i].eq_ignore_ascii_case(&r[i])
            && p.get(2) == Some(&b':')
            && r.get(2) == Some(&b':')
        {
            continue;
        }
        return false;
    }
    true
}
