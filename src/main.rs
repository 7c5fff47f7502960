use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use servgen::{Error, GenerateConfig};

#[derive(Parser)]
#[command(name = "servgen")]
#[command(version)]
#[command(about = "Generate backend service projects from templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project tree from a project-structure description
    #[clap(visible_alias = "g")]
    Generate {
        /// Path to the project-structure JSON file
        #[arg(short, long)]
        structure: PathBuf,
        /// Template tree root (defaults to the bundled starter set)
        #[arg(short, long)]
        templates: Option<PathBuf>,
        /// Target directory for the generated project
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Work with the bundled starter templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

#[derive(Subcommand)]
enum TemplatesCommand {
    /// Export the bundled starter templates to a directory
    Export { dir: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<ExitCode, Error> {
    match command {
        Commands::Generate { structure, templates, out } => {
            let text = std::fs::read_to_string(&structure)
                .map_err(|e| Error::Read { path: structure.clone(), source: e })?;

            // Without a template root, unpack the bundled set into a
            // per-run directory; a shared path would race with concurrent
            // invocations and mix template versions across binaries.
            let mut bundled_dir = None;
            let templates_dir = match templates {
                Some(dir) => dir,
                None => {
                    let dir = tempfile::tempdir()
                        .map_err(|e| Error::Write { path: std::env::temp_dir(), source: e })?;
                    servgen::export_bundled(dir.path())?;
                    bundled_dir.insert(dir).path().to_path_buf()
                }
            };

            let config = GenerateConfig { templates_dir, target_dir: out };
            let report = servgen::generate_from_json(&text, &config).await?;

            if report.is_success() {
                println!(
                    "✅ Generated {} files into {}",
                    report.written.len(),
                    config.target_dir.display()
                );
                Ok(ExitCode::SUCCESS)
            } else {
                for failure in &report.failures {
                    eprintln!("  failed {}: {}", failure.template.display(), failure.error);
                }
                eprintln!(
                    "⚠️  {} of {} items failed; generated tree is incomplete",
                    report.failures.len(),
                    report.failures.len() + report.written.len()
                );
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Templates { command: TemplatesCommand::Export { dir } } => {
            let count = servgen::export_bundled(&dir)?;
            println!("✅ Exported {} template files to {}", count, dir.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
