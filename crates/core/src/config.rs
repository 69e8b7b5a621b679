use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Name of the project file at the project root
pub const PROJECT_FILE: &str = "citypack.toml";

/// Raw TOML configuration structure
/// This matches the citypack.toml file structure exactly
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    sites: Vec<String>,
    #[serde(default = "default_locales")]
    locales: Vec<String>,
    #[serde(default)]
    output: RawOutput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutput {
    dir: Option<String>,
    public_path: Option<String>,
}

fn default_locales() -> Vec<String> {
    DEFAULT_LOCALES.iter().map(|l| l.to_string()).collect()
}

/// Parse citypack.toml from a file path
pub fn parse_project_toml<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
    let content = fs::read_to_string(path)?;
    parse_project_toml_str(&content)
}

/// Parse citypack.toml from a string (useful for testing)
pub fn parse_project_toml_str(content: &str) -> Result<ProjectConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.sites.is_empty() {
        return Err(Error::Configuration(
            "No sites declared; at least one entry point is required".to_string(),
        ));
    }

    let sites = validate_unique(&raw.sites, "sites")?
        .into_iter()
        .map(Site::new)
        .collect();

    if raw.locales.is_empty() {
        log::warn!("No locales declared; no HTML pages will be generated");
    }
    let locales = validate_unique(&raw.locales, "locales")?
        .into_iter()
        .map(Locale::new)
        .collect();

    let defaults = OutputSettings::default();
    let dir = match raw.output.dir {
        Some(dir) => validate_relative_path(&dir, "output.dir")?,
        None => defaults.dir,
    };
    let public_path = match raw.output.public_path {
        Some(path) if !path.starts_with('/') => {
            return Err(Error::ConfigParse(format!(
                "output.public_path must start with '/': '{}'",
                path
            )));
        }
        Some(path) => path,
        None => defaults.public_path,
    };

    Ok(ProjectConfig {
        sites,
        locales,
        output: OutputSettings { dir, public_path },
    })
}

/// Load the project in `dir`, falling back to the built-in city list
/// when no citypack.toml exists there.
pub fn load_project<P: AsRef<Path>>(dir: P) -> Result<ProjectConfig> {
    let path = dir.as_ref().join(PROJECT_FILE);
    if !path.exists() {
        log::debug!(
            "{} not found, using default project",
            path.display()
        );
        return Ok(ProjectConfig::default());
    }
    parse_project_toml(&path)
}

fn validate_unique(values: &[String], field_name: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    for value in values {
        validate_identifier(value, field_name)?;
        if !seen.insert(value.as_str()) {
            return Err(Error::Configuration(format!(
                "Duplicate value in '{}': '{}'",
                field_name, value
            )));
        }
    }
    Ok(values.to_vec())
}

/// Validate a site or locale identifier.
///
/// Identifiers are interpolated into entry, template and output paths, so
/// each one must be exactly one relative path segment.
fn validate_identifier(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty identifier in '{}' field",
            field_name
        )));
    }

    if value.contains('/') || value.contains('\\') {
        return Err(Error::ConfigParse(format!(
            "Path separators not allowed in '{}': '{}'",
            field_name, value
        )));
    }

    if value == "." || value == ".." {
        return Err(Error::ConfigParse(format!(
            "Directory references not allowed in '{}': '{}'",
            field_name, value
        )));
    }

    Ok(())
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references so the output
/// directory always stays inside the project.
fn validate_relative_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in '{}': '{}'",
            field_name, path_str
        )));
    }

    Ok(path.to_path_buf())
}
