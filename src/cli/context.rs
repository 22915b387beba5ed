use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{LiteralExtractor, ScriptFilter, SourceScanner, SyncError},
};

/// Configuration and path resolution shared by every command.
///
/// Priority: CLI flags > `.tssyncrc.json` > built-in defaults. Paths given on
/// the command line are relative to the working directory; paths from the
/// config file are relative to the directory holding it.
pub struct CommandContext {
    pub config: Config,
    /// Directory the config's relative paths are anchored to. Empty when that
    /// is the working directory, so resolved paths stay relative for display.
    base_dir: PathBuf,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(verbose: bool) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;
        let config_result = load_config(&cwd)?;

        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let base_dir = match config_result.base_dir.strip_prefix(&cwd) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => config_result.base_dir,
        };

        Ok(Self {
            config: config_result.config,
            base_dir,
            verbose,
        })
    }

    fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Source root to scan. Fails when it is not an existing directory.
    pub fn source_root(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        let root = cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.resolve(&self.config.source_root));
        if !root.is_dir() {
            return Err(SyncError::MissingFile {
                what: "Source root",
                path: root,
            }
            .into());
        }
        Ok(root)
    }

    pub fn mapping_file(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.resolve(&self.config.mapping_file))
    }

    pub fn catalog_file(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.resolve(&self.config.catalog_file))
    }

    pub fn filter(&self) -> Result<ScriptFilter> {
        self.config.script_filter()
    }

    /// Extractor over `source_root` honoring includes, ignores, extensions
    /// and markers from the config.
    pub fn extractor(&self, source_root: PathBuf) -> LiteralExtractor {
        let scanner = SourceScanner::new(source_root, self.config.normalized_extensions())
            .verbose(self.verbose)
            .with_includes(self.config.includes.clone())
            .with_ignores(&self.config.ignores);
        LiteralExtractor::new(scanner, self.config.markers.clone(), self.verbose)
    }
}
