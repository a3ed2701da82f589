//! Run configuration for the statistics driver.

use std::path::{Path, PathBuf};

/// Options controlling one aggregation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding the packages
    pub dir: PathBuf,
    /// Process exactly one named package instead of the whole directory
    pub file: Option<String>,
    /// Include per-language breakdowns in rendered output
    pub lang: bool,
    /// Worker threads; 1 processes packages sequentially
    pub workers: usize,
    /// Accepted for compatibility with the upstream tooling; never
    /// consulted by the pipeline
    pub flag: Option<String>,
    /// Accepted for compatibility with the upstream tooling; never
    /// consulted by the pipeline
    pub print_flags: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file: None,
            lang: false,
            workers: 1,
            flag: None,
            print_flags: false,
        }
    }
}

impl RunOptions {
    /// Create options for a working directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Process exactly one named package.
    pub fn file(mut self, name: impl Into<String>) -> Self {
        self.file = Some(name.into());
        self
    }

    /// Enable per-language breakdown output.
    pub fn lang(mut self, enabled: bool) -> Self {
        self.lang = enabled;
        self
    }

    /// Set the worker thread count.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Carry the vestigial flag filter.
    pub fn flag(mut self, flag: Option<String>) -> Self {
        self.flag = flag;
        self
    }

    /// Carry the vestigial print-flags switch.
    pub fn print_flags(mut self, enabled: bool) -> Self {
        self.print_flags = enabled;
        self
    }
}
