use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use specgen::{GenerateError, GeneratorConfig, Generator, RunSummary, TemplateSyntax};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "specgen")]
#[command(about = "Generate type-specialized sources from KType/VType templates.", long_about = None)]
struct Cli {
    /// Root of the template tree.
    #[arg(long)]
    templates: PathBuf,

    /// Root of the generated tree; unclaimed files in it are deleted.
    #[arg(long)]
    output: PathBuf,

    /// Regenerate every output even if it is newer than its template.
    #[arg(long)]
    no_incremental: bool,

    /// Log every file written or kept.
    #[arg(long, short)]
    verbose: bool,

    /// Stop at the first error.
    #[arg(long)]
    fail_fast: bool,

    /// Worker threads (default: one per core).
    #[arg(long)]
    threads: Option<usize>,

    /// Template and output file extension.
    #[arg(long, default_value = "java")]
    extension: String,

    /// Do not prefix outputs with a generated-file comment.
    #[arg(long)]
    no_header: bool,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Name of the primary placeholder type.
    #[arg(long, default_value = "KType")]
    primary: String,

    /// Name of the secondary placeholder type.
    #[arg(long, default_value = "VType")]
    secondary: String,

    /// Receiver class of intrinsic calls.
    #[arg(long, default_value = "Intrinsics")]
    intrinsics: String,

    /// Mixing function emitted by the `mix` intrinsic.
    #[arg(long, default_value = "BitMixer.mix")]
    mixer: String,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let syntax = TemplateSyntax {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            intrinsics_class: self.intrinsics.clone(),
            mixer: self.mixer.clone(),
        };
        GeneratorConfig::new(&self.templates, &self.output)
            .with_incremental(!self.no_incremental)
            .with_verbose(self.verbose)
            .with_fail_fast(self.fail_fast)
            .with_threads(self.threads)
            .with_extension(&self.extension)
            .with_header(!self.no_header)
            .with_syntax(syntax)
    }
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match Generator::new(cli.config()).run() {
        Ok(summary) => {
            report(&summary, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(GenerateError::Failed { errors, summary }) => {
            for err in &errors {
                eprintln!("error: {err}");
            }
            report(&summary, cli.json)?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("generation failed"),
    }
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", summary.to_json().context("serialize run summary")?);
    } else {
        eprintln!("{summary}");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "specgen=debug" } else { "specgen=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
