// Build configuration generation for multi-city static sites.
// Produces plain data for an external bundler; nothing here touches the filesystem.

pub mod entry;
pub mod filename;
pub mod html;
pub mod optimization;
pub mod plugins;
pub mod rules;

pub use entry::{EntryMap, entry_map};
pub use filename::{ChunkFilename, chunk_filename, filename_pattern};
pub use html::{HtmlMinify, HtmlTask, html_tasks};
pub use optimization::{Minimizer, OptimizationDirectives, optimization_directives};
pub use plugins::{PluginDirective, plugin_directives};
pub use rules::{AssetFilename, ModuleRule, module_rules, rule_for};

use citypack_core::{BuildMode, ProjectConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPolicy {
    pub path: PathBuf,
    pub public_path: String,
    pub filename: ChunkFilename,
}

/// Everything the bundler needs for one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub mode: BuildMode,
    pub entry: EntryMap,
    pub output: OutputPolicy,
    pub optimization: OptimizationDirectives,
    pub module: Vec<ModuleRule>,
    pub plugins: Vec<PluginDirective>,
}

impl BuildConfiguration {
    /// Script output name for a chunk
    pub fn script_filename(&self, chunk: &str) -> String {
        self.output.filename.resolve(chunk)
    }

    /// Extracted stylesheet output name for a chunk
    pub fn stylesheet_filename(&self, chunk: &str) -> Option<String> {
        self.plugins.iter().find_map(|p| match p {
            PluginDirective::ExtractCss { filename } => Some(filename.resolve(chunk)),
            _ => None,
        })
    }

    pub fn html_tasks(&self) -> impl Iterator<Item = &HtmlTask> {
        self.plugins.iter().filter_map(PluginDirective::as_html)
    }

    pub fn asset_rules(&self) -> impl Iterator<Item = &ModuleRule> {
        self.module.iter().filter(|rule| rule.is_asset())
    }
}

/// Assemble the full configuration for `project` rooted at `root`.
///
/// The entry map is computed first, so an empty site list fails before
/// any other part is built.
pub fn assemble_configuration(
    mode: BuildMode,
    project: &ProjectConfig,
    root: &Path,
) -> Result<BuildConfiguration> {
    let entry = entry_map(&project.sites)?;

    log::debug!(
        "assembling {} configuration: {} sites, {} locales",
        mode,
        project.sites.len(),
        project.locales.len()
    );

    Ok(BuildConfiguration {
        mode,
        entry,
        output: OutputPolicy {
            path: root.join(&project.output.dir),
            public_path: project.output.public_path.clone(),
            filename: chunk_filename(mode, "js"),
        },
        optimization: optimization_directives(mode),
        module: module_rules(mode),
        plugins: plugin_directives(mode, &project.sites, &project.locales),
    })
}
