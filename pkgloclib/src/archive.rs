//! Tolerant extraction for tar-family and zip archives.
//!
//! Extraction is best-effort at the entry level: symlinks are never
//! materialized, entries that fail to unpack (degenerate hardlinks, corrupt
//! blocks, names escaping the destination) are skipped, and the remaining
//! entries still land. Only an archive whose header cannot be read at all
//! reports an error, so callers can tell "corrupt container" apart from
//! "extracted but empty".

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use tracing::debug;
use walkdir::WalkDir;
use xz2::read::XzDecoder;

use crate::error::PkglocError;
use crate::Result;

/// Archive container formats, recognized by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    TarBz2,
    TarXz,
    Tar,
    Zip,
}

impl ArchiveFormat {
    /// Sniff the format from a path's suffix. Returns `None` for anything
    /// that is not a recognized archive name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar.bz2") {
            Some(ArchiveFormat::TarBz2)
        } else if name.ends_with(".tar.xz") {
            Some(ArchiveFormat::TarXz)
        } else if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else {
            None
        }
    }
}

/// Extract an archive into `dest`, returning the number of entries that
/// were actually materialized.
///
/// `dest` should be a fresh directory owned by the caller; the usual
/// pattern is a `tempfile::TempDir` whose drop removes everything this
/// call produced, whatever the outcome.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<usize> {
    let format = ArchiveFormat::from_path(archive).ok_or_else(|| PkglocError::Archive {
        path: archive.to_path_buf(),
        message: "unrecognized archive suffix".to_string(),
    })?;

    let extracted = match format {
        ArchiveFormat::TarGz => {
            extract_tar(GzDecoder::new(BufReader::new(File::open(archive)?)), archive, dest)?
        }
        ArchiveFormat::TarBz2 => {
            extract_tar(BzDecoder::new(BufReader::new(File::open(archive)?)), archive, dest)?
        }
        ArchiveFormat::TarXz => {
            extract_tar(XzDecoder::new(BufReader::new(File::open(archive)?)), archive, dest)?
        }
        ArchiveFormat::Tar => extract_tar(BufReader::new(File::open(archive)?), archive, dest)?,
        ArchiveFormat::Zip => extract_zip(archive, dest)?,
    };

    // Downstream analysis must be able to read and later delete everything,
    // regardless of the mode bits the archive shipped with.
    normalize_permissions(dest);

    Ok(extracted)
}

fn extract_tar<R: Read>(reader: R, source: &Path, dest: &Path) -> Result<usize> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(false);
    archive.set_preserve_mtime(false);
    archive.set_overwrite(true);

    let mut extracted = 0usize;
    let mut seen = 0usize;
    for entry in archive.entries()? {
        let mut entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if seen == 0 {
                    // Nothing parsed at all: corrupt container, not an
                    // empty one.
                    return Err(PkglocError::Archive {
                        path: source.to_path_buf(),
                        message: err.to_string(),
                    });
                }
                // A broken header makes the rest of the stream unreadable.
                debug!("stopping extraction of {}: {}", source.display(), err);
                break;
            }
        };
        seen += 1;

        if entry.header().entry_type().is_symlink() {
            continue;
        }

        match entry.unpack_in(dest) {
            Ok(true) => extracted += 1,
            Ok(false) => debug!(
                "skipping entry escaping {} in {}",
                dest.display(),
                source.display()
            ),
            Err(err) => debug!("skipping entry in {}: {}", source.display(), err),
        }
    }

    Ok(extracted)
}

fn extract_zip(source: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(source)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|err| PkglocError::Archive {
        path: source.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut extracted = 0usize;
    for index in 0..zip.len() {
        let mut entry = match zip.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping entry {} in {}: {}", index, source.display(), err);
                continue;
            }
        };

        if let Some(mode) = entry.unix_mode() {
            if mode & 0o170000 == 0o120000 {
                // symlink
                continue;
            }
        }

        let Some(rel) = entry.enclosed_name() else {
            debug!(
                "skipping entry with unsafe name {:?} in {}",
                entry.name(),
                source.display()
            );
            continue;
        };
        let target = dest.join(rel);

        if entry.is_dir() {
            if fs::create_dir_all(&target).is_ok() {
                extracted += 1;
            }
            continue;
        }

        if let Some(parent) = target.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                debug!("skipping {}: {}", target.display(), err);
                continue;
            }
        }
        let result = File::create(&target).and_then(|mut out| io::copy(&mut entry, &mut out));
        match result {
            Ok(_) => extracted += 1,
            Err(err) => debug!("skipping {}: {}", target.display(), err),
        }
    }

    Ok(extracted)
}

#[cfg(unix)]
fn normalize_permissions(root: &Path) {
    use std::os::unix::fs::PermissionsExt;

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let mode = if entry.file_type().is_dir() {
            0o755
        } else {
            0o644
        };
        let _ = fs::set_permissions(entry.path(), fs::Permissions::from_mode(mode));
    }
}

#[cfg(not(unix))]
fn normalize_permissions(_root: &Path) {}
