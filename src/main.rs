use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};

use schemkit::{document_from_settings, init_logging, EditorConfig, BUILD_DATE, VERSION};

/// Reads a `.fcd` drawing, reports malformed lines and writes it back in
/// normalized form.
#[derive(Debug, Parser)]
#[command(name = "schemkit", version)]
struct Cli {
    /// Drawing to read
    input: PathBuf,

    /// Folder of `.fcl` macro libraries (repeatable)
    #[arg(long = "library", value_name = "DIR")]
    libraries: Vec<PathBuf>,

    /// Omit FCJ extension lines and the FJC header
    #[arg(long)]
    no_extensions: bool,

    /// Write the normalized drawing here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only report diagnostics; exit status 1 when there are any
    #[arg(long)]
    check: bool,

    /// Editor preferences file (JSON or TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log one JSON object per event
    #[arg(long)]
    json_log: bool,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load settings {}", path.display())),
        None => match EditorConfig::default_path() {
            Ok(path) => EditorConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load settings {}", path.display())),
            Err(e) => {
                warn!("{}; using default settings", e);
                Ok(EditorConfig::default())
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = load_settings(cli.config.as_ref())?;
    let mut doc = document_from_settings(&settings, &cli.libraries)?;

    let report = doc.load_from_file(&cli.input)?;
    info!(
        "{}: {} primitives, {} diagnostics",
        cli.input.display(),
        report.added,
        report.diagnostics.len()
    );

    if cli.check {
        return Ok(if report.is_clean() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let extensions = settings.files.extensions_on_save && !cli.no_extensions;
    match cli.output {
        Some(path) => doc.save_to_file(&path, extensions)?,
        None => print!("{}", doc.text(extensions)),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.json_log)?;
    debug!("schemkit {} (built {})", VERSION, BUILD_DATE);
    run(cli)
}
