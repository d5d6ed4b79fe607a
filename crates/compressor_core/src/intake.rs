use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Outcome of one folder intake batch, in the order paths were handled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeReport {
    /// Canonical folders acknowledged by the backend.
    pub submitted: Vec<PathBuf>,
    /// Raw paths that resolved to nothing processable.
    pub skipped_empty: Vec<PathBuf>,
    /// Canonical folders already submitted in this batch or still running.
    pub skipped_duplicate: Vec<PathBuf>,
    /// Raw or canonical path with the reason it failed.
    pub failed: Vec<(PathBuf, String)>,
}

impl IntakeReport {
    pub fn stats(&self) -> IntakeStats {
        IntakeStats {
            submitted: self.submitted.len(),
            skipped: self.skipped_empty.len() + self.skipped_duplicate.len(),
            failed: self.failed.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntakeStats {
    pub submitted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Decides which canonical folders of a batch get submitted.
#[derive(Debug, Clone, Default)]
pub struct IntakeFilter {
    seen: HashSet<PathBuf>,
}

impl IntakeFilter {
    /// `active_sources` are folders of jobs that have not reached a terminal status.
    pub fn new(active_sources: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            seen: active_sources.into_iter().collect(),
        }
    }

    /// Returns true the first time a folder is offered, false for repeats.
    pub fn admit(&mut self, canonical: &Path) -> bool {
        self.seen.insert(canonical.to_path_buf())
    }
}

/// Drop blank raw paths before they reach resolution.
pub fn non_blank_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty())
        .collect()
}
