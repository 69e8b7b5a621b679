use anyhow::{Context, Result};
use citypack_core::BuildMode;
use citypack_generator::{BuildConfiguration, rule_for};
use futures::future::try_join_all;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::config::load_configuration;

/// Hex digits of the digest kept in `[contenthash]`
const CONTENT_HASH_LEN: usize = 20;

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// A binary asset and the name the bundler will give it
#[derive(Debug, Clone, Serialize)]
pub struct AssetEntry {
    pub source: String,
    pub rule: String,
    pub output: String,
    pub hash: String,
}

/// Content hash of a file's bytes
fn content_hash(bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    digest[..CONTENT_HASH_LEN].to_string()
}

/// Fill `[name]` and `[contenthash]` in a resolved asset pattern
fn substitute_placeholders(pattern: &str, source: &Path, hash: &str) -> String {
    let name = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("asset");
    pattern.replace("[name]", name).replace("[contenthash]", hash)
}

/// Path relative to the project root, as the bundler sees it
fn relative_source(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Find every file under the site directories that an asset rule claims.
///
/// Returns (absolute path, project-relative path, rule name, output pattern).
fn find_assets(
    root: &Path,
    config: &BuildConfiguration,
) -> Result<Vec<(PathBuf, PathBuf, String, String)>> {
    let mut found = Vec::new();

    for site in config.entry.keys() {
        let site_dir = root.join(site);
        if !site_dir.is_dir() {
            log::warn!("site directory missing: {}", site_dir.display());
            continue;
        }

        let walker = WalkDir::new(&site_dir).into_iter().filter_entry(|e| {
            !e.file_type().is_dir()
                || !SKIPPED_DIRS
                    .iter()
                    .any(|skip| e.file_name().to_str() == Some(*skip))
        });

        for entry in walker {
            let entry = entry.context("Failed to walk site directory")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(relative) = relative_source(root, entry.path()) else {
                continue;
            };
            let Some(rule) = rule_for(&config.module, &relative).filter(|r| r.is_asset()) else {
                continue;
            };
            let Some(naming) = &rule.generator else {
                continue;
            };

            let pattern = naming.resolve(&relative)?;
            found.push((entry.path().to_path_buf(), relative, rule.name.clone(), pattern));
        }
    }

    found.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(found)
}

/// Resolve the hashed output names of every asset in the project
pub async fn collect_assets(root: &Path, config: &BuildConfiguration) -> Result<Vec<AssetEntry>> {
    let found = find_assets(root, config)?;
    log::debug!("hashing {} assets", found.len());

    let jobs = found.into_iter().map(|(path, relative, rule, pattern)| async move {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let hash = content_hash(&bytes);
        Ok::<_, anyhow::Error>(AssetEntry {
            source: relative.to_string_lossy().into_owned(),
            output: substitute_placeholders(&pattern, &relative, &hash),
            rule,
            hash,
        })
    });

    try_join_all(jobs).await
}

/// List project assets with their content-hashed output names
pub async fn run(path: PathBuf, mode: BuildMode, json: bool) -> Result<()> {
    let config = load_configuration(&path, mode)?;
    let root = std::fs::canonicalize(&path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    let assets = collect_assets(&root, &config).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&assets).context("Failed to serialize assets")?
        );
        return Ok(());
    }

    println!("🖼  Assets in {} ({} build)", root.display(), mode);
    if assets.is_empty() {
        println!("   No binary assets found");
        return Ok(());
    }
    for asset in &assets {
        println!("   {} → {}", asset.source, asset.output);
    }
    println!();
    println!("✓ {} asset(s)", assets.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_files(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, contents) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_content_hash_is_stable_and_truncated() {
        let first = content_hash(b"logo bytes");
        let second = content_hash(b"logo bytes");
        assert_eq!(first, second);
        assert_eq!(first.len(), CONTENT_HASH_LEN);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, content_hash(b"other bytes"));
    }

    #[test]
    fn test_substitute_placeholders() {
        let output = substitute_placeholders(
            "moscow/public/assets/[name].[contenthash].svg",
            Path::new("moscow/public/img/logo.svg"),
            "abc123",
        );
        assert_eq!(output, "moscow/public/assets/logo.abc123.svg");
    }

    #[tokio::test]
    async fn test_collect_assets_only_binary_files() {
        let dir = project_with_files(&[
            ("moscow/src/main.js", "console.log(1)"),
            ("moscow/src/style.css", "body {}"),
            ("moscow/public/en/index.html", "<html></html>"),
            ("moscow/public/img/logo.png", "png"),
            ("moscow/fonts/roboto.woff2", "font"),
            ("moscow/node_modules/pkg/icon.svg", "svg"),
        ]);
        let root = fs::canonicalize(dir.path()).unwrap();
        let config = load_configuration(&root, BuildMode::Production).unwrap();

        let assets = collect_assets(&root, &config).await.unwrap();
        assert_eq!(assets.len(), 2);

        let font = &assets[0];
        assert_eq!(font.rule, "fonts");
        assert_eq!(
            font.output,
            format!("moscow/public/assets/roboto.{}.woff2", content_hash(b"font"))
        );

        let image = &assets[1];
        assert_eq!(image.rule, "images");
        assert!(image.output.starts_with("moscow/public/assets/logo."));
        assert!(image.output.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_collect_assets_hashes_in_development_too() {
        let dir = project_with_files(&[("moscow/public/favicon.ico", "ico")]);
        let root = fs::canonicalize(dir.path()).unwrap();
        let config = load_configuration(&root, BuildMode::Development).unwrap();

        let assets = collect_assets(&root, &config).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(
            assets[0].output,
            format!("moscow/public/assets/favicon.{}.ico", content_hash(b"ico"))
        );
    }

    #[tokio::test]
    async fn test_collect_assets_missing_site_directory() {
        let dir = TempDir::new().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        let config = load_configuration(&root, BuildMode::Production).unwrap();
        assert!(collect_assets(&root, &config).await.unwrap().is_empty());
    }
}
