use api_starter::scaffold::{create_structure, default_layout, load_layout};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Create the project directory layout with empty files.
#[derive(Debug, Parser)]
#[command(name = "scaffold", version)]
struct Cli {
    /// Directory to generate into (defaults to the current directory)
    #[arg(long, short)]
    root: Option<PathBuf>,

    /// JSON file describing the layout to generate
    #[arg(long, short, env = "SCAFFOLD_LAYOUT")]
    layout: Option<PathBuf>,

    /// Print the built-in layout as JSON and exit
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error creating structure: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.print {
        println!("{}", serde_json::to_string_pretty(&default_layout())?);
        return Ok(());
    }

    let layout = match &cli.layout {
        Some(path) => load_layout(path)?,
        None => default_layout(),
    };
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    tracing::info!("Creating project structure in: {}", root.display());
    let report = create_structure(&root, &layout)?;
    tracing::info!(
        directories = report.directories,
        created = report.files_created,
        skipped = report.files_skipped,
        "Folder structure created successfully"
    );

    Ok(())
}
