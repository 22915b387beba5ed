use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::filter::{ScriptFilter, ScriptRange};

pub const CONFIG_FILE_NAME: &str = ".tssyncrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    #[serde(default = "default_source_script_ranges")]
    pub source_script_ranges: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_mapping_file")]
    pub mapping_file: String,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,
}

fn default_source_root() -> String {
    "./src".to_string()
}

fn default_extensions() -> Vec<String> {
    ["cpp", "h", "ui", "qml"].map(String::from).to_vec()
}

fn default_markers() -> Vec<String> {
    ["tr", "qsTr"].map(String::from).to_vec()
}

fn default_source_script_ranges() -> Vec<String> {
    vec!["U+4E00-U+9FFF".to_string()]
}

fn default_mapping_file() -> String {
    "./translations/en_us_map.tsv".to_string()
}

fn default_catalog_file() -> String {
    "./translations/en_US.ts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: Vec::new(),
            extensions: default_extensions(),
            markers: default_markers(),
            source_script_ranges: default_source_script_ranges(),
            ignore_texts: Vec::new(),
            mapping_file: default_mapping_file(),
            catalog_file: default_catalog_file(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, regular expressions,
    /// script ranges or marker names.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        self.ignore_text_patterns()?;
        self.script_ranges()?;

        if self.markers.is_empty() {
            bail!("'markers' must name at least one translation function");
        }
        for marker in &self.markers {
            if !is_identifier(marker) {
                bail!("Invalid identifier in 'markers': \"{}\"", marker);
            }
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }

    /// Extensions without a leading dot.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect()
    }

    pub fn script_ranges(&self) -> Result<Vec<ScriptRange>> {
        self.source_script_ranges
            .iter()
            .map(|range| {
                range
                    .parse::<ScriptRange>()
                    .with_context(|| format!("Invalid range in 'sourceScriptRanges': \"{}\"", range))
            })
            .collect()
    }

    pub fn ignore_text_patterns(&self) -> Result<Vec<Regex>> {
        self.ignore_texts
            .iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| {
                    format!("Invalid regular expression in 'ignoreTexts': \"{}\"", pattern)
                })
            })
            .collect()
    }

    /// Build the needs-translation filter described by this configuration.
    pub fn script_filter(&self) -> Result<ScriptFilter> {
        let ranges = self.script_ranges()?.into_iter().map(|r| r.0).collect();
        Ok(ScriptFilter::new(ranges).with_ignore_texts(self.ignore_text_patterns()?))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config are resolved against:
    /// the config file's directory, or the start directory for defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
