use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Enumerates source files below a root directory.
///
/// Files are yielded lazily in a stable (file-name sorted) order, so every
/// call to [`files`](SourceScanner::files) walks the tree again.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    root: PathBuf,
    extensions: Vec<String>,
    includes: Vec<String>,
    literal_ignores: Vec<PathBuf>,
    glob_ignores: Vec<Pattern>,
    verbose: bool,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
            includes: Vec::new(),
            literal_ignores: Vec::new(),
            glob_ignores: Vec::new(),
            verbose: false,
        }
    }

    /// Restrict the scan to these sub-directories of the root (literal paths
    /// or glob patterns). An empty list scans the whole root.
    pub fn with_includes(mut self, includes: Vec<String>) -> Self {
        self.includes = includes;
        self
    }

    /// Skip paths under these literal sub-directories or matching these globs.
    pub fn with_ignores(mut self, ignores: &[String]) -> Self {
        for p in ignores {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => self.glob_ignores.push(pattern),
                    Err(e) => {
                        if self.verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                self.literal_ignores.push(self.root.join(p));
            }
        }
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.dirs_to_scan()
            .into_iter()
            .flat_map(|dir| WalkDir::new(dir).sort_by_file_name())
            .filter_map(move |entry| match entry {
                Ok(e) => Some(e.into_path()),
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    None
                }
            })
            .filter(move |path| !self.is_ignored(path))
            .filter(move |path| path.is_file() && self.is_scannable_file(path))
    }

    fn dirs_to_scan(&self) -> Vec<PathBuf> {
        if self.includes.is_empty() {
            return vec![self.root.clone()];
        }

        let mut paths = Vec::new();
        for inc in &self.includes {
            if is_glob_pattern(inc) {
                let full_pattern = self.root.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|p| p.is_dir())),
                    Err(e) => {
                        if self.verbose {
                            eprintln!(
                                "{} Invalid glob pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = self.root.join(inc);
                if path.is_dir() {
                    paths.push(path);
                } else if self.verbose {
                    eprintln!(
                        "{} Include path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self
            .literal_ignores
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.glob_ignores.iter().any(|p| p.matches(&path_str))
    }

    fn is_scannable_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|accepted| accepted == ext))
    }
}
