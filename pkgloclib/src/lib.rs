//! # pkgloclib
//!
//! Source-line and patch-diff statistics for directories of software
//! packages.
//!
//! ## Overview
//!
//! Given a working directory of packages — source RPMs (`*.src.rpm`,
//! `*.spm`) or plain package directories — this library extracts each
//! package's patch files and source tarballs, counts added/removed lines
//! in the patches and code/comment/blank lines in the source trees, and
//! folds everything into per-package and global totals, optionally broken
//! down by language.
//!
//! The pipeline is deliberately best-effort: it is meant for scanning
//! large, uncurated corpora of real-world packages, so a corrupt patch, a
//! truncated tarball, or an unreadable container degrades to a zero
//! contribution instead of aborting the run. Format handling is delegated
//! to `rpm` (package containers), `tar`/`zip` (archives), `unidiff`
//! (patch documents), and `tokei` (line classification).
//!
//! ## Example
//!
//! ```rust
//! use pkgloclib::{run, RunOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // A working directory with one package directory inside.
//! let workdir = tempdir().unwrap();
//! let pkg = workdir.path().join("hello");
//! fs::create_dir(&pkg).unwrap();
//! fs::write(
//!     pkg.join("fix.patch"),
//!     "--- a/f\n+++ b/f\n@@ -1,1 +1,2 @@\n context\n+added\n",
//! )
//! .unwrap();
//!
//! let result = run(&RunOptions::new(workdir.path())).unwrap();
//! assert_eq!(result.total.diff.added, 1);
//! assert_eq!(result.total.diff.removed, 0);
//! ```

pub mod analyze;
pub mod archive;
pub mod driver;
pub mod error;
pub mod options;
pub mod package;
pub mod patch;
pub mod stats;

pub use analyze::{analyze_dir, SourceAnalysis};
pub use archive::{extract_archive, ArchiveFormat};
pub use driver::{run, RunResult};
pub use error::PkglocError;
pub use options::RunOptions;
pub use package::{classify_member, inspect_package, is_package_file, MemberKind};
pub use patch::count_patch;
pub use stats::{DiffStat, LanguageTotals, LineCount, PackageReport, PackageStats};

/// Result type for pkgloclib operations
pub type Result<T> = std::result::Result<T, PkglocError>;
