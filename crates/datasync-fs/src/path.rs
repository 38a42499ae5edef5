//! Slash-normalized paths for configured output locations

use std::fmt;
use std::path::{Path, PathBuf};

/// A filesystem path stored with forward slashes.
///
/// Output paths in the sync configuration are written as `data/board.yaml`
/// regardless of platform. Keeping them in that form makes resolved paths,
/// backup names and report entries stable across platforms; the native form
/// is produced only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Platform-native form for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Append a relative segment. A leading `./` on the segment is dropped.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches("./");
        match self.0.as_str() {
            "" | "." => Self(segment.to_string()),
            base if base.ends_with('/') => Self(format!("{base}{segment}")),
            base => Self(format!("{base}/{segment}")),
        }
    }

    /// Resolve a configured output path: absolute paths are kept, relative
    /// ones are placed under `self`.
    pub fn resolve(&self, configured: &str) -> Self {
        if configured.starts_with('/') || Path::new(configured).is_absolute() {
            Self::new(configured)
        } else {
            self.join(configured)
        }
    }

    /// Last path component, `None` for an empty path or a bare `/`.
    pub fn file_name(&self) -> Option<&str> {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Extension of the last component, without the dot. Dotfiles have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    /// Sibling path with `suffix` appended to the file name,
    /// e.g. `board.yaml` -> `board.yaml.backup`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0.trim_end_matches('/'), suffix))
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_relative_output() {
        let root = NormalizedPath::new("/site");
        assert_eq!(root.join("data/board.yaml").as_str(), "/site/data/board.yaml");
        assert_eq!(root.join("./data/board.yaml").as_str(), "/site/data/board.yaml");
        assert_eq!(NormalizedPath::new(".").join("data/x.yaml").as_str(), "data/x.yaml");
    }

    #[test]
    fn test_backslashes_normalized() {
        assert_eq!(NormalizedPath::new("data\\board.yaml").as_str(), "data/board.yaml");
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        let root = NormalizedPath::new("/site");
        assert_eq!(root.resolve("/tmp/out.yaml").as_str(), "/tmp/out.yaml");
        assert_eq!(root.resolve("data/out.yaml").as_str(), "/site/data/out.yaml");
    }

    #[test]
    fn test_with_suffix() {
        let path = NormalizedPath::new("data/board.yaml");
        assert_eq!(path.with_suffix(".backup").as_str(), "data/board.yaml.backup");
    }

    #[test]
    fn test_file_name() {
        let backup = NormalizedPath::new("/site/data/board.yaml.backup");
        assert_eq!(backup.file_name(), Some("board.yaml.backup"));
        assert_eq!(NormalizedPath::new("data/").file_name(), Some("data"));
        assert_eq!(NormalizedPath::new("/").file_name(), None);
    }

    #[test]
    fn test_extension() {
        assert_eq!(NormalizedPath::new("config/sync-config.json").extension(), Some("json"));
        assert_eq!(NormalizedPath::new("config/.hidden").extension(), None);
        assert_eq!(NormalizedPath::new("Makefile").extension(), None);
    }
}
