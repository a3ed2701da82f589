//! Core data structures for package statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

/// Line counts for a body of source code.
///
/// Produced by the source statistics collector; additive across files,
/// tarballs, and packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCount {
    /// Executable code lines
    pub code: u64,
    /// Comment lines
    pub comments: u64,
    /// Blank lines (whitespace only)
    pub blanks: u64,
}

impl LineCount {
    /// Create a new LineCount with all zeros
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lines across all classes
    pub fn total(&self) -> u64 {
        self.code + self.comments + self.blanks
    }
}

impl Add for LineCount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            code: self.code + other.code,
            comments: self.comments + other.comments,
            blanks: self.blanks + other.blanks,
        }
    }
}

impl AddAssign for LineCount {
    fn add_assign(&mut self, other: Self) {
        self.code += other.code;
        self.comments += other.comments;
        self.blanks += other.blanks;
    }
}

/// Added/removed line counts for a body of patches.
///
/// Produced by the patch counter; additive across patch files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStat {
    /// Lines added across all file entries
    pub added: u64,
    /// Lines removed across all file entries
    pub removed: u64,
}

impl DiffStat {
    /// Create a new DiffStat with all zeros
    pub fn new() -> Self {
        Self::default()
    }
}

impl Add for DiffStat {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            added: self.added + other.added,
            removed: self.removed + other.removed,
        }
    }
}

impl AddAssign for DiffStat {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.removed += other.removed;
    }
}

/// Code-line totals per language name.
///
/// Ordered by language name so rendering and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTotals(BTreeMap<String, u64>);

impl LanguageTotals {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Add code lines for a language
    pub fn add(&mut self, language: impl Into<String>, code: u64) {
        *self.0.entry(language.into()).or_insert(0) += code;
    }

    /// Fold another mapping into this one
    pub fn merge(&mut self, other: &LanguageTotals) {
        for (language, code) in &other.0 {
            *self.0.entry(language.clone()).or_insert(0) += code;
        }
    }

    /// Iterate over (language, code lines) in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of code lines over all languages
    pub fn code_total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Aggregate statistics for one package: source lines, patch deltas, and
/// the per-language breakdown of the source lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageStats {
    /// Source line counts from all tarball members
    pub lines: LineCount,
    /// Patch line counts from all patch members
    pub diff: DiffStat,
    /// Code lines per language, for this package only
    pub languages: LanguageTotals,
}

impl PackageStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats holding only source lines
    pub fn from_lines(lines: LineCount) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Stats holding only patch deltas
    pub fn from_diff(diff: DiffStat) -> Self {
        Self {
            diff,
            ..Self::default()
        }
    }

    /// Total source lines (code + comments + blanks)
    pub fn total_lines(&self) -> u64 {
        self.lines.total()
    }

    /// The patch delta reported per package: lines added
    pub fn patch_delta(&self) -> u64 {
        self.diff.added
    }

    /// Whether this package would be filtered from the per-package listing
    pub fn is_empty(&self) -> bool {
        self.total_lines() == 0 && self.patch_delta() == 0
    }
}

impl Add for PackageStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for PackageStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.diff += other.diff;
        self.languages.merge(&other.languages);
    }
}

/// Statistics for a single package, keyed by its file or directory name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    /// Package file or directory name
    pub name: String,
    /// Aggregated statistics for this package
    pub stats: PackageStats,
}

impl PackageReport {
    /// Create a new report
    pub fn new(name: impl Into<String>, stats: PackageStats) -> Self {
        Self {
            name: name.into(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_default() {
        let lines = LineCount::new();
        assert_eq!(lines.code, 0);
        assert_eq!(lines.comments, 0);
        assert_eq!(lines.blanks, 0);
        assert_eq!(lines.total(), 0);
    }

    #[test]
    fn test_line_count_add() {
        let a = LineCount {
            code: 10,
            comments: 2,
            blanks: 3,
        };
        let b = LineCount {
            code: 5,
            comments: 1,
            blanks: 0,
        };
        let sum = a + b;
        assert_eq!(sum.code, 15);
        assert_eq!(sum.comments, 3);
        assert_eq!(sum.blanks, 3);
        assert_eq!(sum.total(), 21);
    }

    #[test]
    fn test_diff_stat_add_assign() {
        let mut diff = DiffStat::new();
        diff += DiffStat {
            added: 4,
            removed: 1,
        };
        diff += DiffStat {
            added: 6,
            removed: 2,
        };
        assert_eq!(diff.added, 10);
        assert_eq!(diff.removed, 3);
    }

    #[test]
    fn test_language_totals_merge() {
        let mut a = LanguageTotals::new();
        a.add("Python", 10);
        a.add("C", 5);

        let mut b = LanguageTotals::new();
        b.add("Python", 7);
        b.add("Shell", 2);

        a.merge(&b);
        let entries: Vec<_> = a.iter().collect();
        assert_eq!(entries, vec![("C", 5), ("Python", 17), ("Shell", 2)]);
        assert_eq!(a.code_total(), 24);
    }

    #[test]
    fn test_package_stats_identity() {
        let stats = PackageStats::from_lines(LineCount {
            code: 10,
            comments: 2,
            blanks: 3,
        });
        let sum = stats.clone() + PackageStats::new();
        assert_eq!(sum, stats);
    }

    #[test]
    fn test_package_stats_combine() {
        let mut total = PackageStats::new();
        total += PackageStats::from_lines(LineCount {
            code: 10,
            comments: 2,
            blanks: 3,
        });
        total += PackageStats::from_diff(DiffStat {
            added: 7,
            removed: 4,
        });

        assert_eq!(total.total_lines(), 15);
        assert_eq!(total.patch_delta(), 7);
        assert_eq!(total.diff.removed, 4);
        assert!(!total.is_empty());
    }

    #[test]
    fn test_package_stats_serialize() {
        let mut stats = PackageStats::from_lines(LineCount {
            code: 10,
            comments: 2,
            blanks: 3,
        });
        stats.languages.add("Python", 10);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["lines"]["code"], 10);
        assert_eq!(json["diff"]["added"], 0);
        assert_eq!(json["languages"]["Python"], 10);
    }

    #[test]
    fn test_package_stats_empty_filter() {
        // The reported delta is additions, so a removals-only package is
        // still filtered from the listing.
        let removed_only = PackageStats::from_diff(DiffStat {
            added: 0,
            removed: 3,
        });
        assert!(removed_only.is_empty());
        assert!(PackageStats::new().is_empty());
    }
}
