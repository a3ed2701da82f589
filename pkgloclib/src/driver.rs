//! Whole-directory aggregation.
//!
//! The driver enumerates packages in a working directory, dispatches each
//! to the package inspector, and folds the per-package results into global
//! totals. Parallel runs use a fixed-size rayon pool; every worker returns
//! its result directly, so aggregation is a pure reduce with no shared
//! mutable state.

use std::fs;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PkglocError;
use crate::options::RunOptions;
use crate::package::inspect_package;
use crate::stats::{PackageReport, PackageStats};
use crate::Result;

/// The outcome of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// One report per enumerated package, in submission order. Packages
    /// with all-zero stats are kept here; rendering filters them.
    pub packages: Vec<PackageReport>,
    /// Fold of every per-package result, zero packages included. The
    /// `languages` field inside is the global language breakdown.
    pub total: PackageStats,
}

/// Aggregate statistics over every package in the working directory.
///
/// In single-package mode (`options.file`) exactly one package is
/// inspected. Directory entries are processed in sorted listing order;
/// with `workers > 1` they are distributed over a rayon pool and the
/// report order still matches the listing order.
pub fn run(options: &RunOptions) -> Result<RunResult> {
    if !options.dir.exists() {
        return Err(PkglocError::PathNotFound(options.dir.clone()));
    }

    if let Some(flag) = &options.flag {
        debug!("flag filter '{}' requested; package flags are not tracked, processing all packages", flag);
    }
    if options.print_flags {
        debug!("print-flags requested; package flags are not tracked");
    }

    let names: Vec<String> = match &options.file {
        Some(name) => vec![name.clone()],
        None => list_packages(options)?,
    };

    let inspect = |name: &String| {
        PackageReport::new(name.clone(), inspect_package(&options.dir.join(name)))
    };

    let packages: Vec<PackageReport> = if options.workers > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .build()
        {
            Ok(pool) => pool.install(|| names.par_iter().map(inspect).collect()),
            Err(err) => {
                debug!("cannot build worker pool, running sequentially: {}", err);
                names.iter().map(inspect).collect()
            }
        }
    } else {
        names.iter().map(inspect).collect()
    };

    let mut total = PackageStats::new();
    for report in &packages {
        total += report.stats.clone();
    }

    Ok(RunResult { packages, total })
}

fn list_packages(options: &RunOptions) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(&options.dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SIMPLE_DIFF: &str = "\
--- a/foo.txt
+++ b/foo.txt
@@ -1,3 +1,4 @@
 line one
-removed line
+added line
+another added
 line three
";

    fn make_patch_package(root: &std::path::Path, name: &str, patches: usize) {
        let pkg = root.join(name);
        fs::create_dir(&pkg).unwrap();
        for i in 0..patches {
            fs::write(pkg.join(format!("fix-{}.patch", i)), SIMPLE_DIFF).unwrap();
        }
    }

    #[test]
    fn test_empty_directory() {
        let temp = tempdir().unwrap();
        let result = run(&RunOptions::new(temp.path())).unwrap();
        assert!(result.packages.is_empty());
        assert_eq!(result.total, PackageStats::new());
    }

    #[test]
    fn test_missing_directory() {
        let result = run(&RunOptions::new("/nonexistent/workdir"));
        assert!(matches!(result, Err(PkglocError::PathNotFound(_))));
    }

    #[test]
    fn test_totals_include_zero_packages() {
        let temp = tempdir().unwrap();
        make_patch_package(temp.path(), "with-patches", 2);
        fs::create_dir(temp.path().join("empty-package")).unwrap();

        let result = run(&RunOptions::new(temp.path())).unwrap();

        // Both packages are enumerated, in sorted listing order.
        let names: Vec<_> = result.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["empty-package", "with-patches"]);
        assert!(result.packages[0].stats.is_empty());

        assert_eq!(result.total.diff.added, 4);
        assert_eq!(result.total.diff.removed, 2);
    }

    #[test]
    fn test_single_package_mode() {
        let temp = tempdir().unwrap();
        make_patch_package(temp.path(), "target", 1);
        make_patch_package(temp.path(), "ignored", 3);

        let options = RunOptions::new(temp.path()).file("target");
        let result = run(&options).unwrap();

        assert_eq!(result.packages.len(), 1);
        assert_eq!(result.packages[0].name, "target");
        assert_eq!(result.total.diff.added, 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let temp = tempdir().unwrap();
        for i in 0..6 {
            make_patch_package(temp.path(), &format!("pkg-{}", i), i % 3);
        }

        let sequential = run(&RunOptions::new(temp.path())).unwrap();
        let parallel = run(&RunOptions::new(temp.path()).workers(4)).unwrap();

        assert_eq!(sequential.total, parallel.total);
        assert_eq!(sequential.packages, parallel.packages);
    }

    #[test]
    fn test_vestigial_flags_are_noops() {
        let temp = tempdir().unwrap();
        make_patch_package(temp.path(), "pkg", 1);

        let plain = run(&RunOptions::new(temp.path())).unwrap();
        let flagged = run(&RunOptions::new(temp.path())
            .flag(Some("important".to_string()))
            .print_flags(true))
        .unwrap();

        assert_eq!(plain, flagged);
    }
}
