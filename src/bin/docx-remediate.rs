//! docx-remediate CLI
//!
//! Remediates a single `.docx` file and prints either the JSON report or the
//! path of the rebuilt package.

use clap::{Parser, Subcommand};
use docx_remediate::{Error, RemediationConfig, Remediator, Upload};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Accessibility remediation for Word (.docx) packages
#[derive(Parser)]
#[command(name = "docx-remediate")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remediate a file and print the accessibility report as JSON
    Report {
        /// Package to remediate
        file: PathBuf,

        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Declared media type of the upload
        #[arg(long)]
        mime: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write the rebuilt package into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Remediate a file and write the rebuilt package
    Fix {
        /// Package to remediate
        file: PathBuf,

        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the rebuilt package
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("docx_remediate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docx_remediate=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn remediator(config: Option<&Path>) -> Result<Remediator, Error> {
    let config = match config {
        Some(path) => RemediationConfig::load(path)?,
        None => RemediationConfig::default(),
    };
    Ok(Remediator::new(config))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

struct ReportArgs<'a> {
    file: &'a Path,
    config: Option<&'a Path>,
    mime: Option<String>,
    output: Option<&'a Path>,
    out_dir: Option<&'a Path>,
}

fn report(args: ReportArgs<'_>) -> Result<(), Error> {
    let ReportArgs {
        file,
        config,
        mime,
        output,
        out_dir,
    } = args;
    let remediator = remediator(config)?;
    let bytes = std::fs::read(file)?;
    let mut upload = Upload::new(&bytes, file_name(file));
    if let Some(mime) = mime {
        upload = upload.with_media_type(mime);
    }

    let outcome = remediator.remediate_and_report(&upload)?;
    let json = serde_json::to_string_pretty(&outcome.report)?;
    write_output(&json, output)?;

    match (out_dir, &outcome.package) {
        (Some(dir), Some(package)) => {
            let target = dir.join(package.file_name());
            std::fs::write(&target, package.bytes())?;
            eprintln!("Package written to {}", target.display());
        },
        (Some(_), None) => eprintln!("Rebuilt package failed validation; nothing written"),
        (None, _) => {},
    }
    Ok(())
}

fn fix(file: &Path, config: Option<&Path>, out_dir: &Path) -> Result<(), Error> {
    let remediator = remediator(config)?;
    let bytes = std::fs::read(file)?;
    let package = remediator.remediate_and_download(&Upload::new(&bytes, file_name(file)))?;

    let target = out_dir.join(package.file_name());
    std::fs::write(&target, package.bytes())?;
    println!("{}  {}", package.sha256(), target.display());
    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> std::io::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        },
        None => {
            println!("{}", content);
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            file,
            config,
            mime,
            output,
            out_dir,
            verbose,
        } => {
            init_logging(verbose);
            report(ReportArgs {
                file: &file,
                config: config.as_deref(),
                mime,
                output: output.as_deref(),
                out_dir: out_dir.as_deref(),
            })
        },
        Commands::Fix {
            file,
            config,
            out_dir,
            verbose,
        } => {
            init_logging(verbose);
            fix(&file, config.as_deref(), &out_dir)
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match serde_json::to_string_pretty(&err.to_payload()) {
                Ok(payload) => println!("{}", payload),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        },
    }
}
