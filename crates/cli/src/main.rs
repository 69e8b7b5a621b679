mod commands;

use citypack_core::BuildMode;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "citypack")]
#[command(version, about = "Bundler configuration for multi-city, multi-locale static sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new project with site skeletons
    Init {
        /// Path to project directory
        path: PathBuf,

        /// Site (city) to create; repeat for several
        #[arg(long = "site")]
        sites: Vec<String>,

        /// Locale to create pages for; repeat for several
        #[arg(long = "locale")]
        locales: Vec<String>,
    },

    /// Validate project configuration
    Validate {
        /// Path to project directory
        path: PathBuf,
    },

    /// Print the assembled bundler configuration
    Config {
        /// Path to project directory
        path: PathBuf,

        /// Build mode (defaults to NODE_ENV)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List binary assets with their hashed output names
    Assets {
        /// Path to project directory
        path: PathBuf,

        /// Build mode (defaults to NODE_ENV)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Development,
    Production,
}

impl From<ModeArg> for BuildMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Development => BuildMode::Development,
            ModeArg::Production => BuildMode::Production,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Toml,
}

fn resolve_mode(arg: Option<ModeArg>) -> BuildMode {
    arg.map(BuildMode::from).unwrap_or_else(BuildMode::from_env)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            path,
            sites,
            locales,
        } => commands::init::run(path, sites, locales).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Config {
            path,
            mode,
            format,
            output,
        } => commands::config::run(path, resolve_mode(mode), format, output).await,
        Command::Assets { path, mode, json } => {
            commands::assets::run(path, resolve_mode(mode), json).await
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "citypack", &mut io::stdout());
            Ok(())
        }
    }
}
