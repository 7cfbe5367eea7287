//! Prune configuration (`[prune]` section) and runtime settings.

use crate::error::{PruneError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const TRASH_ENV: &str = "TREEPRUNE_TRASH_DIR";
const CONFIG_ENV: &str = "TREEPRUNE_CONFIG";

/// Single platform name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformSpec {
    One(String),
    Many(Vec<String>),
}

impl PlatformSpec {
    pub fn names(&self) -> Vec<&str> {
        match self {
            PlatformSpec::One(name) => vec![name.as_str()],
            PlatformSpec::Many(names) => names.iter().map(|n| n.as_str()).collect(),
        }
    }
}

/// One declared keep/delete rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilePattern {
    #[serde(default)]
    pub keep: Vec<String>,
    #[serde(default)]
    pub delete: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformSpec>,
}

/// Shell command run after the prune: a bare command line, or a table
/// limiting it to some platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostPruneCommand {
    Plain(String),
    Scoped(ScopedCommand),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopedCommand {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformSpec>,
}

impl PostPruneCommand {
    pub fn command(&self) -> &str {
        match self {
            PostPruneCommand::Plain(command) => command,
            PostPruneCommand::Scoped(scoped) => &scoped.command,
        }
    }

    pub fn platform(&self) -> Option<&PlatformSpec> {
        match self {
            PostPruneCommand::Plain(_) => None,
            PostPruneCommand::Scoped(scoped) => scoped.platform.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default)]
    pub skip: bool,
    pub patterns: Option<Vec<FilePattern>>,
    #[serde(default, alias = "postPrune", skip_serializing_if = "Option::is_none")]
    pub post_prune: Option<Vec<PostPruneCommand>>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    prune: Option<PruneConfig>,
}

impl PruneConfig {
    /// Load from a TOML file, or JSON when the extension is `.json`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PruneError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)
            .map_err(|e| PruneError::Config(format!("Failed to parse TOML: {}", e)))?;
        Self::from_section(file.prune)
    }

    pub fn from_json(json_str: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json_str)
            .map_err(|e| PruneError::Config(format!("Failed to parse JSON: {}", e)))?;
        Self::from_section(file.prune)
    }

    fn from_section(section: Option<PruneConfig>) -> Result<Self> {
        section.ok_or_else(|| {
            PruneError::Config("The config file doesn't contain a 'prune' section".to_string())
        })
    }
}

/// Paths resolved from flags, environment and XDG directories.
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub trash_root: PathBuf,
}

impl Settings {
    pub fn new(
        source_root: &Path,
        config_override: Option<PathBuf>,
        trash_override: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = config_override
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(default_config_path);

        let trash_root = if let Some(path) = trash_override {
            path
        } else if let Some(env_path) = std::env::var_os(TRASH_ENV) {
            PathBuf::from(env_path)
        } else {
            default_trash_root(source_root)?
        };

        Ok(Self {
            config_path,
            trash_root,
        })
    }

    pub fn require_config_path(&self) -> Result<&Path> {
        self.config_path.as_deref().ok_or_else(|| {
            PruneError::Config(format!(
                "No config file given; pass --config or set {}",
                CONFIG_ENV
            ))
        })
    }
}

fn trash_dir_name(source_root: &Path) -> String {
    let name = source_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string());
    format!("{}-{}", name, chrono::Local::now().format("%Y%m%d%H%M%S"))
}

#[cfg(unix)]
fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("treeprune")
        .ok()
        .and_then(|xdg| xdg.find_config_file("treeprune.toml"))
}

#[cfg(not(unix))]
fn default_config_path() -> Option<PathBuf> {
    None
}

#[cfg(unix)]
fn default_trash_root(source_root: &Path) -> Result<PathBuf> {
    let xdg = xdg::BaseDirectories::with_prefix("treeprune")
        .map_err(|e| PruneError::Config(format!("Failed to initialize XDG directories: {}", e)))?;
    let trash = xdg
        .create_cache_directory("trash")
        .map_err(|e| PruneError::Config(format!("Failed to create cache directory: {}", e)))?;
    Ok(trash.join(trash_dir_name(source_root)))
}

#[cfg(not(unix))]
fn default_trash_root(source_root: &Path) -> Result<PathBuf> {
    Ok(std::env::temp_dir()
        .join("treeprune")
        .join("trash")
        .join(trash_dir_name(source_root)))
}
