//! Package inspection: member classification and routing.
//!
//! A package is either a source RPM (`*.src.rpm` / `*.spm`) or a plain
//! directory holding the same kind of members. Members are classified by
//! suffix into patches, tarballs, and opaque files; patches feed the patch
//! counter, tarballs are extracted and fed to the source analyzer. A
//! package whose container cannot be opened yields zero stats and never
//! propagates an error past this module.

use std::fs;
use std::path::Path;

use glob::Pattern;
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

use crate::analyze::analyze_dir;
use crate::archive::extract_archive;
use crate::error::PkglocError;
use crate::patch::count_patch;
use crate::stats::{DiffStat, PackageStats};
use crate::Result;

/// Suffix globs identifying patch members
pub const PATCH_PATTERNS: &[&str] = &["*.patch", "*.diff", "*.dif"];

/// Suffix globs identifying tarball members
pub const TARBALL_PATTERNS: &[&str] = &["*.tar.gz", "*.tar.bz2", "*.tar.xz", "*.tgz", "*.zip"];

/// Classification of one package member by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A unified-diff document
    Patch,
    /// A compressed source archive
    Tarball,
    /// Anything else (spec files, keys, metadata); never counted
    Opaque,
}

/// Classify a member file name against the two fixed pattern sets.
pub fn classify_member(name: &str) -> MemberKind {
    if matches_any(PATCH_PATTERNS, name) {
        MemberKind::Patch
    } else if matches_any(TARBALL_PATTERNS, name) {
        MemberKind::Tarball
    } else {
        MemberKind::Opaque
    }
}

fn matches_any(patterns: &[&str], name: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| Pattern::new(pattern).map(|p| p.matches(name)).unwrap_or(false))
}

/// Whether a working-directory entry names a package archive.
pub fn is_package_file(name: &str) -> bool {
    name.ends_with(".src.rpm") || name.ends_with(".spm")
}

/// Gather statistics for one package, best-effort.
///
/// Accepts a source RPM or a package directory; anything else yields zero
/// stats. This function never errors: open failures are logged at debug
/// level and degrade to an all-zero result.
pub fn inspect_package(path: &Path) -> PackageStats {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => return PackageStats::new(),
    };
    debug!("package {}", name);

    if is_package_file(&name) {
        match process_rpm(path) {
            Ok(stats) => stats,
            Err(err) => {
                debug!("skipping package {}: {}", path.display(), err);
                PackageStats::new()
            }
        }
    } else if path.is_dir() {
        process_package_dir(path)
    } else {
        PackageStats::new()
    }
}

/// Open a source RPM, extract its payload into a scratch directory, and
/// process the members exactly like a package directory.
fn process_rpm(path: &Path) -> Result<PackageStats> {
    let package = rpm::Package::open(path).map_err(|err| PkglocError::Package {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let payload = TempDir::new()?;
    package
        .extract(payload.path())
        .map_err(|err| PkglocError::Package {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    Ok(process_package_dir(payload.path()))
}

/// Process the members of one package directory.
///
/// Patch members are counted first, then tarball members, mirroring the
/// member-table order of the package format.
fn process_package_dir(dir: &Path) -> PackageStats {
    let names = match list_member_names(dir) {
        Ok(names) => names,
        Err(err) => {
            debug!("cannot list package {}: {}", dir.display(), err);
            return PackageStats::new();
        }
    };

    let mut stats = PackageStats::new();

    for name in &names {
        if classify_member(name) == MemberKind::Patch {
            debug!("patch member {}", name);
            stats.diff += count_patch(&dir.join(name));
        }
    }

    for name in &names {
        if classify_member(name) == MemberKind::Tarball {
            debug!("tarball member {}", name);
            stats += process_tarball(&dir.join(name));
        }
    }

    stats
}

fn list_member_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Extract one tarball member into a scratch directory and count it.
///
/// The scratch directory lives exactly as long as this call; its drop
/// removes everything regardless of outcome. Extraction failures keep
/// whatever members already landed, so a partially corrupt archive still
/// contributes its healthy files.
pub(crate) fn process_tarball(tarball: &Path) -> PackageStats {
    let scratch = match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => {
            debug!("cannot create scratch dir for {}: {}", tarball.display(), err);
            return PackageStats::new();
        }
    };

    if let Err(err) = extract_archive(tarball, scratch.path()) {
        debug!("cannot extract {}: {}", tarball.display(), err);
    }

    if is_patches_bundle(tarball) {
        let mut diff = DiffStat::new();
        for entry in WalkDir::new(scratch.path())
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if classify_member(&name) == MemberKind::Patch {
                diff += count_patch(entry.path());
            }
        }
        PackageStats::from_diff(diff)
    } else {
        match analyze_dir(scratch.path()) {
            Ok(analysis) => PackageStats {
                lines: analysis.lines,
                diff: DiffStat::new(),
                languages: analysis.languages,
            },
            Err(err) => {
                debug!("cannot analyze {}: {}", tarball.display(), err);
                PackageStats::new()
            }
        }
    }
}

/// Naming-convention assumption carried over from the upstream tooling:
/// any tarball whose path contains "patches" is treated as a bundle of
/// patch files rather than a source tree.
fn is_patches_bundle(path: &Path) -> bool {
    path.to_string_lossy().contains("patches")
}
