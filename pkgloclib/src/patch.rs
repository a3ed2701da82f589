//! Added/removed line counting for unified-diff documents.
//!
//! Parsing is delegated to the `unidiff` crate. The public entry point is
//! deliberately infallible: a corrupt patch must never abort package
//! processing, so every failure degrades to a zero [`DiffStat`].

use std::fs;
use std::path::Path;

use tracing::debug;
use unidiff::PatchSet;

use crate::error::PkglocError;
use crate::stats::DiffStat;
use crate::Result;

/// Count additions and deletions in one patch document.
///
/// Sums the per-file added/removed counts over every file entry in the
/// document. Unreadable files, undecodable bytes, and malformed diffs all
/// yield `DiffStat::default()`; the failure is only visible at debug level.
pub fn count_patch(path: &Path) -> DiffStat {
    match parse_patch(path) {
        Ok(diff) => diff,
        Err(err) => {
            debug!("skipping patch {}: {}", path.display(), err);
            DiffStat::new()
        }
    }
}

fn parse_patch(path: &Path) -> Result<DiffStat> {
    let text = fs::read_to_string(path)?;

    let mut patch = PatchSet::new();
    patch.parse(&text).map_err(|err| PkglocError::Patch {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut diff = DiffStat::new();
    for file in patch.files() {
        diff += DiffStat {
            added: file.added() as u64,
            removed: file.removed() as u64,
        };
    }
    Ok(diff)
}
