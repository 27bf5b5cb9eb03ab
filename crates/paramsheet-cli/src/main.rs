//! Paramsheet CLI - annotate parameter sheets in a document

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use paramsheet::prelude::*;
use paramsheet::DEFAULT_BLANK_RUN_LIMIT;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramsheet")]
#[command(
    author,
    version,
    about = "Bind parameter names to their value cells and tag units and styles"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate every parameter sheet and save the result
    Annotate {
        /// Input document (json, csv)
        input: PathBuf,

        /// Output .json snapshot (default: overwrite a .json input when something changed)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Case-insensitive regex selecting sheets by name (default: names starting with "param")
        #[arg(short, long)]
        pattern: Option<String>,

        /// Skip display unit inference
        #[arg(long)]
        no_units: bool,

        /// Skip style tags
        #[arg(long)]
        no_styles: bool,

        /// Consecutive blank name cells that end a sheet
        #[arg(long, default_value_t = DEFAULT_BLANK_RUN_LIMIT)]
        blank_run: u32,

        /// Report what would change without saving
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show information about a document
    Info {
        /// Input document
        input: PathBuf,
    },

    /// List all sheets and whether they would be annotated
    Sheets {
        /// Input document
        input: PathBuf,

        /// Case-insensitive regex selecting sheets by name
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// List all bindings in a document
    Bindings {
        /// Input document
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Annotate {
            input,
            output,
            pattern,
            no_units,
            no_styles,
            blank_run,
            dry_run,
        } => {
            let options = AnnotateOptions {
                blank_run_limit: blank_run,
                units: !no_units,
                styles: !no_styles,
                ..AnnotateOptions::default()
            };
            annotate(
                &input,
                output.as_deref(),
                pattern.as_deref(),
                &options,
                dry_run,
            )
        }
        Commands::Info { input } => show_info(&input),
        Commands::Sheets { input, pattern } => list_sheets(&input, pattern.as_deref()),
        Commands::Bindings { input } => list_bindings(&input),
    }
}

/// Console logging on stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open(input: &Path) -> Result<Workbook> {
    Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn selector(pattern: Option<&str>) -> Result<SheetSelector> {
    match pattern {
        Some(pattern) => SheetSelector::pattern(pattern).context("Bad --pattern"),
        None => Ok(SheetSelector::default()),
    }
}

fn annotate(
    input: &Path,
    output: Option<&Path>,
    pattern: Option<&str>,
    options: &AnnotateOptions,
    dry_run: bool,
) -> Result<()> {
    let selector = selector(pattern)?;
    let mut workbook = open(input)?;

    let report = workbook.annotate_with_options(&selector, options);

    if report.sheets.is_empty() {
        eprintln!("Warning: no sheet matches {}", selector);
    }
    for sheet in &report.sheets {
        println!("[{}]", sheet.sheet);
        for line in sheet.lines() {
            println!("  {}", line);
        }
        println!("  {}", sheet.summary());
    }
    for (sheet, error) in report.commit_errors() {
        eprintln!("Warning: final commit failed on '{}': {}", sheet, error);
    }

    if dry_run {
        info!("dry run, nothing saved");
        return Ok(());
    }

    let Some(target) = save_target(input, output, report.had_changes())? else {
        debug!("no changes, input left untouched");
        return Ok(());
    };
    workbook
        .save(target)
        .with_context(|| format!("Failed to write '{}'", target.display()))?;
    eprintln!(
        "Wrote {} change(s) to '{}'",
        report.change_count(),
        target.display()
    );

    Ok(())
}

/// Where `annotate` saves: an explicit output always, the input only when it
/// changed. Targets that cannot hold bindings, units and colors are refused.
fn save_target<'a>(
    input: &'a Path,
    output: Option<&'a Path>,
    had_changes: bool,
) -> Result<Option<&'a Path>> {
    let target = match output {
        Some(path) => path,
        None if had_changes => input,
        None => return Ok(None),
    };

    match FileFormat::from_path(target) {
        Some(format) if format.keeps_annotations() => Ok(Some(target)),
        Some(_) => {
            let hint = target.with_extension("json");
            bail!(
                "'{}' can only hold cell text, so the annotations would be lost; \
                 save to a JSON snapshot instead, e.g. -o '{}'",
                target.display(),
                hint.display()
            )
        }
        None => bail!("Unsupported output format: {}", target.display()),
    }
}

fn show_info(input: &Path) -> Result<()> {
    let workbook = open(input)?;
    let selector = SheetSelector::default();

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());
    println!("Bindings: {}", workbook.bindings().len());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());
        println!(
            "    Used rows: {}, cells: {}",
            sheet.row_count(),
            sheet.cell_count()
        );
        println!("    Bindings: {}", sheet.bindings().count());
        println!(
            "    Parameter sheet: {}",
            if selector.matches(sheet.name()) {
                "yes"
            } else {
                "no"
            }
        );
    }

    Ok(())
}

fn list_sheets(input: &Path, pattern: Option<&str>) -> Result<()> {
    let selector = selector(pattern)?;
    let workbook = open(input)?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        let mark = if selector.matches(sheet.name()) {
            "*"
        } else {
            " "
        };
        println!("{}\t{}\t{}", i, mark, sheet.name());
    }

    Ok(())
}

fn list_bindings(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    for (name, target) in workbook.bindings().iter() {
        let sheet = workbook
            .worksheet(target.sheet)
            .map_or("?", |ws| ws.name());
        println!("{}\t{}!{}", name, sheet, target.cell);
    }

    Ok(())
}
