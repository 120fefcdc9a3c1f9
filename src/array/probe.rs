// Path probing across the host bind-mount and the native filesystem.

use std::path::{Path, PathBuf};

/// Root under which a containerized deployment sees the host filesystem.
pub const DEFAULT_HOST_ROOT: &str = "/host";

/// Returns the first candidate that exists, or `None` when none do.
/// One `stat` per candidate, no retries.
pub fn first_existing<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    for candidate in candidates {
        let path = candidate.as_ref();
        if std::fs::metadata(path).is_ok() {
            return Some(path.to_path_buf());
        }
    }
    None
}

/// Expands logical resources (paths relative to a filesystem root) into
/// ordered candidates, one per configured root.
#[derive(Debug, Clone)]
pub struct PathProber {
    roots: Vec<PathBuf>,
}

impl PathProber {
    /// Roots are tried in the given order.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// `host_root` first, then the native root.
    pub fn with_host_root(host_root: impl Into<PathBuf>) -> Self {
        Self::new([host_root.into(), PathBuf::from("/")])
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn candidates(&self, relative: &str) -> Vec<PathBuf> {
        let relative = relative.trim_start_matches('/');
        self.roots.iter().map(|root| root.join(relative)).collect()
    }

    pub fn probe(&self, relative: &str) -> Option<PathBuf> {
        first_existing(&self.candidates(relative))
    }

    /// Tries each resource in order (all roots for the first, then all roots
    /// for the next, ...).
    pub fn probe_any(&self, relatives: &[&str]) -> Option<PathBuf> {
        relatives.iter().find_map(|r| self.probe(r))
    }
}

impl Default for PathProber {
    fn default() -> Self {
        Self::with_host_root(DEFAULT_HOST_ROOT)
    }
}
