//! Module rules: which loader chain or asset handling applies to a file,
//! keyed by its extension.

use citypack_core::{BuildMode, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "ico", "webmanifest"];
pub const FONT_EXTENSIONS: &[&str] = &["woff", "woff2"];

const SITE_PLACEHOLDER: &str = "[site]";
const EXT_PLACEHOLDER: &str = "[ext]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loader {
    #[serde(rename = "html-loader")]
    Html,
    #[serde(rename = "style-loader")]
    Style,
    #[serde(rename = "css-extract-loader")]
    CssExtract,
    #[serde(rename = "css-loader")]
    Css,
    #[serde(rename = "babel-loader")]
    Babel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    #[serde(rename = "javascript/auto")]
    Auto,
    #[serde(rename = "asset/resource")]
    AssetResource,
}

/// Output naming for binary assets (images, icons, manifests, fonts).
///
/// Assets are always content-hashed, whatever the build mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFilename {
    pub directory: String,
    pub pattern: String,
}

impl Default for AssetFilename {
    fn default() -> Self {
        AssetFilename {
            directory: format!("{}/public/assets", SITE_PLACEHOLDER),
            pattern: format!("[name].[contenthash].{}", EXT_PLACEHOLDER),
        }
    }
}

impl AssetFilename {
    /// Resolve the output name for an asset at `input`, relative to the
    /// project root.
    ///
    /// The site is the first path segment and the extension is copied
    /// without its dot: `moscow/public/img/logo.svg` becomes
    /// `moscow/public/assets/[name].[contenthash].svg`.
    pub fn resolve(&self, input: &Path) -> Result<String> {
        let mut segments = input.components().filter(|c| *c != Component::CurDir);

        let site = match segments.next() {
            Some(Component::Normal(first)) => first.to_string_lossy().into_owned(),
            _ => {
                return Err(Error::InvalidData(format!(
                    "Asset path must be relative to the project root: '{}'",
                    input.display()
                )));
            }
        };

        if segments.next().is_none() {
            return Err(Error::InvalidData(format!(
                "Asset is not inside a site directory: '{}'",
                input.display()
            )));
        }

        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::InvalidData(format!("Asset has no extension: '{}'", input.display()))
            })?;

        let directory = self.directory.replace(SITE_PLACEHOLDER, &site);
        let pattern = self.pattern.replace(EXT_PLACEHOLDER, &ext);
        Ok(format!("{}/{}", directory, pattern))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
    pub name: String,
    /// Pattern source in the engine's regex syntax
    pub test: String,
    pub extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub loaders: Vec<Loader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<AssetFilename>,
}

impl ModuleRule {
    fn new(name: &str, extensions: &[&str], kind: RuleKind) -> Self {
        ModuleRule {
            name: name.to_string(),
            test: test_pattern(extensions),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            exclude: None,
            kind,
            loaders: Vec::new(),
            generator: None,
        }
    }

    fn with_loaders(mut self, loaders: &[Loader]) -> Self {
        self.loaders = loaders.to_vec();
        self
    }

    fn excluding(mut self, dir: &str) -> Self {
        self.exclude = Some(dir.to_string());
        self
    }

    fn with_asset_filename(mut self) -> Self {
        self.generator = Some(AssetFilename::default());
        self
    }

    /// Whether this rule applies to `path`.
    ///
    /// Extensions compare case-sensitively, as the engine's pattern does.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }
        match &self.exclude {
            Some(dir) => !path
                .components()
                .any(|c| matches!(c, Component::Normal(name) if name == dir.as_str())),
            None => true,
        }
    }

    pub fn is_asset(&self) -> bool {
        self.kind == RuleKind::AssetResource
    }
}

fn test_pattern(extensions: &[&str]) -> String {
    match extensions {
        [single] => format!(r"\.{}$", single),
        many => format!(r"\.({})$", many.join("|")),
    }
}

/// Loader rules in the order the engine evaluates them
pub fn module_rules(mode: BuildMode) -> Vec<ModuleRule> {
    let style_loader = match mode {
        BuildMode::Development => Loader::Style,
        BuildMode::Production => Loader::CssExtract,
    };

    vec![
        ModuleRule::new("html", &["html"], RuleKind::Auto).with_loaders(&[Loader::Html]),
        ModuleRule::new("styles", &["css"], RuleKind::Auto)
            .with_loaders(&[style_loader, Loader::Css]),
        ModuleRule::new("images", IMAGE_EXTENSIONS, RuleKind::AssetResource)
            .with_asset_filename(),
        ModuleRule::new("fonts", FONT_EXTENSIONS, RuleKind::AssetResource).with_asset_filename(),
        ModuleRule::new("scripts", &["js"], RuleKind::Auto)
            .excluding("node_modules")
            .with_loaders(&[Loader::Babel]),
    ]
}

/// First rule that applies to `path`
pub fn rule_for<'a>(rules: &'a [ModuleRule], path: &Path) -> Option<&'a ModuleRule> {
    rules.iter().find(|rule| rule.matches(path))
}
