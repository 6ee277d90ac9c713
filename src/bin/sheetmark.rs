//! sheetmark - spreadsheet to Markdown CLI
//!
//! Usage:
//!   sheetmark sheets <file>                       List sheet names
//!   sheetmark convert <inputs>... [--sheet NAME]  Convert sheets to .md files
//!   sheetmark merge <files>... [-o DIR]           Concatenate .md files

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sheetmark::config::Settings;
use sheetmark::convert::{Converter, SheetSelection};
use sheetmark::markdown::merge_markdown_files;
use sheetmark::sheet::ColumnPolicy;

#[derive(Parser)]
#[command(name = "sheetmark", version, about = "Convert spreadsheet sheets to Markdown tables")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of a workbook
    Sheets {
        /// Workbook (.xlsx)
        file: PathBuf,
    },
    /// Convert inputs to Markdown files
    Convert {
        /// Input files or URLs
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Sheet to convert (repeatable); all sheets when omitted
        #[arg(short, long = "sheet")]
        sheets: Vec<String>,
        /// Synthesize `Column N` labels instead of using the first row
        #[arg(long)]
        no_header: bool,
        /// Place cells by their column reference, padding gaps
        #[arg(long)]
        positional: bool,
        /// Convert sheets concurrently
        #[arg(long)]
        parallel: bool,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// YAML settings file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Merge Markdown files into one document
    Merge {
        /// Markdown files, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sheets { file } => cmd_sheets(&file),
        Commands::Convert {
            inputs,
            sheets,
            no_header,
            positional,
            parallel,
            output,
            config,
        } => {
            let overrides = ConvertOverrides {
                no_header,
                positional,
                parallel,
                output,
            };
            cmd_convert(&inputs, sheets, config, overrides)
        },
        Commands::Merge { files, output } => cmd_merge(&files, output),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn cmd_sheets(file: &Path) -> sheetmark::Result<ExitCode> {
    for name in sheetmark::list_sheet_names(file)? {
        println!("{}", name);
    }
    Ok(ExitCode::SUCCESS)
}

struct ConvertOverrides {
    no_header: bool,
    positional: bool,
    parallel: bool,
    output: Option<PathBuf>,
}

fn cmd_convert(
    inputs: &[String],
    sheets: Vec<String>,
    config: Option<PathBuf>,
    overrides: ConvertOverrides,
) -> sheetmark::Result<ExitCode> {
    let mut settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if overrides.no_header {
        settings.has_header = false;
    }
    if overrides.positional {
        settings.column_policy = ColumnPolicy::Positional;
    }
    if overrides.parallel {
        settings.parallel = true;
    }
    if overrides.output.is_some() {
        settings.output_dir = overrides.output;
    }

    let selection = if sheets.is_empty() {
        SheetSelection::All
    } else {
        SheetSelection::Named(sheets)
    };

    let report = Converter::new(settings).convert_all(inputs, &selection, None);
    for item in report.items() {
        println!("{}", item);
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_merge(files: &[PathBuf], output: PathBuf) -> sheetmark::Result<ExitCode> {
    let merged = merge_markdown_files(files, &output)?;
    println!("{}", merged.display());
    Ok(ExitCode::SUCCESS)
}
