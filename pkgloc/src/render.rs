//! Line-oriented output rendering.

use console::style;
use pkgloclib::RunResult;

/// Render the per-package listing and the global summary.
///
/// Packages with all-zero stats are filtered from the listing but have
/// already contributed to the totals. With `lang` enabled each package
/// line is followed by its language breakdown, and a global breakdown
/// trails the summary line.
pub fn render_text(result: &RunResult, lang: bool) -> String {
    let mut out = String::new();

    for report in &result.packages {
        if report.stats.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "{}: {} {}\n",
            report.name,
            report.stats.total_lines(),
            report.stats.patch_delta()
        ));
        if lang {
            for (language, code) in report.stats.languages.iter() {
                out.push_str(&format!("\t{}: {}\n", language, code));
            }
        }
    }

    let summary = format!(
        "Total lines of code, total lines of patches: {} {}",
        result.total.total_lines(),
        result.total.patch_delta()
    );
    out.push_str(&format!("{}\n", style(summary).bold()));

    if lang {
        out.push_str("Total language analysis:\n");
        for (language, code) in result.total.languages.iter() {
            out.push_str(&format!("\t{}: {}\n", language, code));
        }
    }

    out
}

/// Render the full run result as one JSON document.
pub fn render_json(result: &RunResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgloclib::{DiffStat, LineCount, PackageReport, PackageStats};

    fn sample_result() -> RunResult {
        let mut loud = PackageStats::from_lines(LineCount {
            code: 10,
            comments: 2,
            blanks: 3,
        });
        loud.diff = DiffStat {
            added: 4,
            removed: 1,
        };
        loud.languages.add("Python", 10);

        let quiet = PackageStats::new();

        let mut total = PackageStats::new();
        total += loud.clone();
        total += quiet.clone();

        RunResult {
            packages: vec![
                PackageReport::new("hello-1.0.src.rpm", loud),
                PackageReport::new("empty-package", quiet),
            ],
            total,
        }
    }

    #[test]
    fn test_render_text_filters_empty_packages() {
        let text = render_text(&sample_result(), false);
        assert!(text.contains("hello-1.0.src.rpm: 15 4\n"));
        assert!(!text.contains("empty-package"));
        assert!(text.contains("Total lines of code, total lines of patches: 15 4\n"));
    }

    #[test]
    fn test_render_text_language_mode() {
        let text = render_text(&sample_result(), true);
        assert!(text.contains("\tPython: 10\n"));
        assert!(text.contains("Total language analysis:\n"));
    }

    #[test]
    fn test_render_text_empty_run() {
        let result = RunResult::default();
        let text = render_text(&result, false);
        assert_eq!(
            text,
            "Total lines of code, total lines of patches: 0 0\n"
        );
    }

    #[test]
    fn test_render_json_round_trips() {
        let result = sample_result();
        let json = render_json(&result).unwrap();
        let parsed: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
