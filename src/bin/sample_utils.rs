use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use annotated_samples::config::ImportConfig;
use annotated_samples::error::SampleError;
use annotated_samples::importer::SampleImporter;
use annotated_samples::output::{JsonOutput, OutputMode, TextOutput};

#[derive(Parser)]
#[command(name = "sample-utils")]
#[command(about = "Annotated sample processing utilities")]
#[command(version, author)]
struct Cli {
    /// Display more frequent log messages.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the run summary as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Copy samples from binning output directories")]
    Import(ImportArgs),
}

#[derive(Args)]
struct ImportArgs {
    /// Input directory containing binned samples in subdirectories.
    input_dir: Utf8PathBuf,

    /// Output directory to contain the annotated samples.
    output_dir: Utf8PathBuf,

    /// Only copy samples not already in the output directory.
    #[arg(long, conflicts_with = "clear")]
    missing: bool,

    /// Erase the output directory before copying.
    #[arg(long)]
    clear: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<SampleError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SampleError) -> u8 {
    match error {
        SampleError::Validation(_) => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    match cli.command {
        Commands::Import(args) => run_import(args, output_mode),
    }
}

fn run_import(args: ImportArgs, output_mode: OutputMode) -> miette::Result<()> {
    let config = ImportConfig::resolve(&args.input_dir, &args.output_dir, args.missing, args.clear)?;
    let summary = SampleImporter::new(config).run()?;
    match output_mode {
        OutputMode::Json => JsonOutput::print_import(&summary).into_diagnostic(),
        OutputMode::Text => TextOutput::print_import(&summary).into_diagnostic(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use annotated_samples::error::ConversionError;

    use super::*;

    #[test]
    fn exit_codes_by_error_kind() {
        let validation = SampleError::Validation("--missing and --clear".to_string());
        assert_eq!(map_exit_code(&validation), 2);

        let format = SampleError::format("S.sample.gz", 1, "archive has no metadata line");
        assert_eq!(map_exit_code(&format), 1);

        let io_err = SampleError::io("out", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(map_exit_code(&io_err), 1);

        let conversion = SampleError::from(ConversionError::MissingQuality {
            path: "S/bin1.gto".into(),
        });
        assert_eq!(map_exit_code(&conversion), 1);
    }

    #[test]
    fn missing_and_clear_rejected_by_parser() {
        let parsed = Cli::try_parse_from(["sample-utils", "import", "in", "out", "--missing", "--clear"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["sample-utils", "-v", "import", "in", "out", "--missing"]).unwrap();
        assert!(cli.verbose);
        let Commands::Import(args) = cli.command;
        assert!(args.missing);
        assert!(!args.clear);
    }
}
