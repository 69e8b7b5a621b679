use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable that selects the build mode
pub const MODE_ENV_VAR: &str = "NODE_ENV";

/// Sites built when a project has no `citypack.toml`
pub const DEFAULT_SITES: &[&str] = &["moscow"];

/// Locales built when a project has no `citypack.toml`
pub const DEFAULT_LOCALES: &[&str] = &["en", "ru"];

/// Build mode; every derived policy depends on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Interpret a raw mode value.
    ///
    /// Only the exact string `development` selects development mode.
    /// Anything else, including a missing value, builds for production.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("development") => BuildMode::Development,
            _ => BuildMode::Production,
        }
    }

    /// Read the mode from `NODE_ENV`
    pub fn from_env() -> Self {
        let value = std::env::var(MODE_ENV_VAR).ok();
        Self::from_env_value(value.as_deref())
    }

    pub fn is_production(self) -> bool {
        self == BuildMode::Production
    }

    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}

/// A city: one independently bundled sub-project
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Site(String);

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Site(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Entry module the bundler starts from
    pub fn entry_path(&self) -> String {
        format!("./{}/src/main.js", self.0)
    }

    /// Directory holding the page templates and static assets
    pub fn public_dir(&self) -> String {
        format!("{}/public", self.0)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language variant of every site's page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Locale(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the bundler writes and from where pages are served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub dir: PathBuf,
    pub public_path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            dir: PathBuf::from("dist"),
            public_path: "/".to_string(),
        }
    }
}

/// Complete project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub sites: Vec<Site>,
    pub locales: Vec<Locale>,
    pub output: OutputSettings,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            sites: DEFAULT_SITES.iter().copied().map(Site::new).collect(),
            locales: DEFAULT_LOCALES.iter().copied().map(Locale::new).collect(),
            output: OutputSettings::default(),
        }
    }
}
