//! Configuration file discovery
//!
//! Looks for `config.{toml,yaml,yml,json}` in the global (`~/.flat-tabs/`) and
//! project (`./.flat-tabs/`) directories and orders the hits so that project
//! files override global ones when merged.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::{CONFIG_DIR_NAME, CONFIG_FILE_STEM};

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
    /// Higher values take precedence
    pub priority: u8,
}

impl ConfigFile {
    pub fn new(path: PathBuf, format: ConfigFormat, scope: ConfigScope) -> Self {
        let priority = scope.priority();
        Self {
            path,
            format,
            scope,
            priority,
        }
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a configuration file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `~/.flat-tabs/`
    Global,
    /// `./.flat-tabs/`
    Project,
}

impl ConfigScope {
    pub fn priority(self) -> u8 {
        match self {
            Self::Global => 10,
            Self::Project => 20,
        }
    }
}

const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// File discovery service for finding configuration files
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discovery rooted at the current and home directories, resolved lazily.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovery over explicit directories instead of `./.flat-tabs` and `~/.flat-tabs`.
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// All configuration files, lowest priority first.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let project_dir = self.project_dir.clone().or_else(Self::resolve_project_dir);
        let global_dir = self.global_dir.clone().or_else(Self::resolve_global_dir);

        let mut files = Vec::new();
        if let Some(ref dir) = global_dir {
            files.extend(self.search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = project_dir {
            files.extend(self.search_directory(dir, ConfigScope::Project));
        }
        files.sort_by_key(|f| f.priority);

        debug!("Discovered {} configuration files", files.len());
        for file in &files {
            trace!("Found config: {} ({:?})", file.path.display(), file.format);
        }
        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }
        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        self.file_candidates(dir)
            .into_iter()
            .filter(|candidate| candidate.is_file())
            .filter_map(|candidate| {
                let ext = candidate.extension()?.to_str()?;
                let format = ConfigFormat::from_extension(ext)?;
                Some(ConfigFile::new(candidate, format, scope))
            })
            .collect()
    }

    fn file_candidates(&self, dir: &Path) -> Vec<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{CONFIG_FILE_STEM}.{ext}")))
            .collect()
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        let dir = std::env::current_dir().ok()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        let dir = dirs::home_dir()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }
}
