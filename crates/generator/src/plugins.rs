use crate::filename::{ChunkFilename, chunk_filename};
use crate::html::{HtmlTask, html_tasks};
use citypack_core::{BuildMode, Locale, Site};
use serde::{Deserialize, Serialize};

/// Plugins the engine runs alongside the loaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "camelCase")]
pub enum PluginDirective {
    /// Empty the output directory before writing
    CleanOutput,
    /// Pull stylesheets out of the script bundles into their own files
    ExtractCss { filename: ChunkFilename },
    Html(HtmlTask),
}

impl PluginDirective {
    pub fn as_html(&self) -> Option<&HtmlTask> {
        match self {
            PluginDirective::Html(task) => Some(task),
            _ => None,
        }
    }
}

pub fn plugin_directives(
    mode: BuildMode,
    sites: &[Site],
    locales: &[Locale],
) -> Vec<PluginDirective> {
    let mut plugins = vec![
        PluginDirective::CleanOutput,
        PluginDirective::ExtractCss {
            filename: chunk_filename(mode, "css"),
        },
    ];
    plugins.extend(html_tasks(mode, sites, locales).map(PluginDirective::Html));
    plugins
}
