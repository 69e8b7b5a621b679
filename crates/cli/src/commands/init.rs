use anyhow::{Context, Result};
use citypack_core::config::PROJECT_FILE;
use citypack_core::{DEFAULT_LOCALES, DEFAULT_SITES, Locale, ProjectConfig, Site, parse_project_toml_str};
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for safe inclusion in a TOML basic string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn toml_string_array(values: &[String]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", toml_escape_string(v)))
        .collect();
    format!("[{}]", items.join(", "))
}

/// Initialize a project directory.
///
/// Writes `citypack.toml` and a skeleton entry module and page template for
/// every site and locale. Existing source files are left untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The directory doesn't exist
/// - citypack.toml already exists in the directory
/// - A site or locale name is not a valid identifier
pub async fn run(path: PathBuf, sites: Vec<String>, locales: Vec<String>) -> Result<()> {
    println!("Initializing project: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let project_path = path.join(PROJECT_FILE);
    if project_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            PROJECT_FILE,
            project_path.display()
        );
    }

    let sites = or_defaults(sites, DEFAULT_SITES);
    let locales = or_defaults(locales, DEFAULT_LOCALES);

    let project = generate_project_toml(&path, &sites, &locales)?;
    println!("✓ Wrote {}", PROJECT_FILE);

    let created = create_site_skeletons(&path, &project)?;
    println!("✓ Created {} source file(s)", created);

    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── {}", PROJECT_FILE);
    for site in &project.sites {
        println!("  ├── {}/", site);
        println!("  │   ├── src/main.js");
        for locale in &project.locales {
            println!("  │   └── public/{}/index.html", locale);
        }
    }

    println!("\nNext steps:");
    println!("  1. Check the layout: citypack validate {}", path.display());
    println!("  2. Emit the bundler config: citypack config {}", path.display());

    Ok(())
}

fn or_defaults(values: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|v| v.to_string()).collect()
    } else {
        values
    }
}

/// Write citypack.toml, returning the project it describes
fn generate_project_toml(base: &Path, sites: &[String], locales: &[String]) -> Result<ProjectConfig> {
    let toml = format!(
        "# Generated by citypack init\n\
# Each site is bundled separately; every site gets one page per locale\n\
\n\
sites = {}\n\
locales = {}\n\
\n\
[output]\n\
dir = \"dist\"\n\
public_path = \"/\"\n",
        toml_string_array(sites),
        toml_string_array(locales)
    );

    // Parse it back so bad names are rejected before anything is written
    let project = parse_project_toml_str(&toml).context("Invalid site or locale name")?;

    fs::write(base.join(PROJECT_FILE), toml)?;

    Ok(project)
}

fn create_site_skeletons(base: &Path, project: &ProjectConfig) -> Result<usize> {
    let mut created = 0;

    for site in &project.sites {
        let entry = base.join(site.entry_path().trim_start_matches("./"));
        if write_if_absent(&entry, &entry_module(site))? {
            created += 1;
        }

        for locale in &project.locales {
            let template = base
                .join(site.public_dir())
                .join(locale.as_str())
                .join("index.html");
            if write_if_absent(&template, &page_template(site, locale))? {
                created += 1;
            }
        }
    }

    Ok(created)
}

fn write_if_absent(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn entry_module(site: &Site) -> String {
    format!("// Entry point for {}\nconsole.log('{} loaded');\n", site, site)
}

fn page_template(site: &Site, locale: &Locale) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{locale}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{site}</title>
</head>
<body>
    <main></main>
</body>
</html>
"#
    )
}
