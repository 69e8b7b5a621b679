use anyhow::{Context, Result};
use citypack_core::config::PROJECT_FILE;
use citypack_core::{BuildMode, parse_project_toml};
use citypack_generator::{BuildConfiguration, assemble_configuration};
use std::path::{Path, PathBuf};

/// Entry modules and page templates the configuration points at but
/// which are not on disk.
fn missing_sources(root: &Path, config: &BuildConfiguration) -> Vec<String> {
    let entries = config.entry.values();
    let templates = config.html_tasks().map(|task| &task.template);

    entries
        .chain(templates)
        .filter(|source| !root.join(source.trim_start_matches("./")).exists())
        .cloned()
        .collect()
}

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating project at: {}", path.display());

    let config_path = path.join(PROJECT_FILE);
    let project = parse_project_toml(&config_path)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    println!("✓ {} valid", PROJECT_FILE);

    let mode = BuildMode::from_env();
    let config = assemble_configuration(mode, &project, &path)?;

    println!(
        "  Sites: {}",
        project
            .sites
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Locales: {}",
        project
            .locales
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Pages: {}", config.html_tasks().count());
    println!("  Mode: {}", mode);

    let missing = missing_sources(&path, &config);
    if missing.is_empty() {
        println!("✓ All entry modules and templates found");
    } else {
        for source in &missing {
            eprintln!("   ⚠ Warning: not found: {}", source);
        }
    }

    Ok(())
}
