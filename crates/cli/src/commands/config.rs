use anyhow::{Context, Result};
use citypack_core::{BuildMode, load_project};
use citypack_generator::{BuildConfiguration, assemble_configuration};
use std::fs;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Load the project at `path` and assemble its configuration
pub fn load_configuration(path: &Path, mode: BuildMode) -> Result<BuildConfiguration> {
    if !path.exists() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    let root = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let project = load_project(&root).context("Failed to load citypack.toml")?;

    assemble_configuration(mode, &project, &root).context("Failed to assemble configuration")
}

pub fn render(config: &BuildConfiguration, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")
        }
        OutputFormat::Toml => {
            toml::to_string_pretty(config).context("Failed to serialize configuration")
        }
    }
}

/// Print or write the assembled configuration
pub async fn run(
    path: PathBuf,
    mode: BuildMode,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_configuration(&path, mode)?;
    let rendered = render(&config, format)?;

    match output {
        Some(output) => {
            fs::write(&output, rendered)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("✓ Wrote {} configuration to {}", mode, output.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
