//! VDIFF command-line interface.
//!
//! Parses two structured documents, compares them and prints one of the
//! views of the comparison tree.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing::{debug, Level};
use vdiff_rs::{
    compute_diff, format_diff, parse_file, parse_stdin, DiffConfig, FormatHint, IdentityHook,
    KeyField, Node, OutputFormat, OutputOptions,
};

/// VDIFF - Structural diff for JSON, YAML and TOML
///
/// Compares two documents value by value. List elements can be matched by an
/// identity field instead of by position.
#[derive(Parser)]
#[command(name = "vdiff")]
#[command(version)]
#[command(about = "Structural diff for JSON, YAML and TOML documents", long_about = None)]
struct Cli {
    /// First file to compare (`-` reads standard input)
    #[arg(value_name = "FILE1")]
    file1: String,

    /// Second file to compare (`-` reads standard input)
    #[arg(value_name = "FILE2")]
    file2: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "changes")]
    format: OutputFormatArg,

    /// Match list elements by this field (repeatable, first present field wins)
    #[arg(short = 'k', long = "id-key", value_name = "FIELD")]
    id_keys: Vec<String>,

    /// Sort list elements without identity before pairing them
    #[arg(short, long)]
    sort_array_items: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Print nothing, report the result through the exit status only
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Source document with change markers
    Annotated,
    /// Both documents in two columns
    SideBySide,
    /// Aligned rows of changed values
    Changes,
    /// The comparison tree as JSON
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Annotated => OutputFormat::Annotated,
            OutputFormatArg::SideBySide => OutputFormat::SideBySide,
            OutputFormatArg::Changes => OutputFormat::Changes,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    if cli.file1 == "-" && cli.file2 == "-" {
        bail!("standard input can only be used for one of the two files");
    }

    let old = read_input(&cli.file1)
        .with_context(|| format!("Failed to parse first file: {}", cli.file1))?;
    let new = read_input(&cli.file2)
        .with_context(|| format!("Failed to parse second file: {}", cli.file2))?;

    if cli.id_keys.is_empty() {
        let config = DiffConfig::new().sort_array_items(cli.sort_array_items);
        report(&old, &new, &config, &cli)
    } else {
        let identity = KeyField::from_fields(cli.id_keys.iter().cloned())?;
        debug!(fields = ?identity.fields(), "matching list elements by key");
        let config = DiffConfig::with_identity(identity).sort_array_items(cli.sort_array_items);
        report(&old, &new, &config, &cli)
    }
}

fn read_input(name: &str) -> Result<Node> {
    debug!(input = name, "parsing");
    let node = if name == "-" {
        parse_stdin(FormatHint::Auto)?
    } else {
        parse_file(Path::new(name))?
    };
    Ok(node)
}

fn report<H: IdentityHook>(
    old: &Node,
    new: &Node,
    config: &DiffConfig<H>,
    cli: &Cli,
) -> Result<i32> {
    let diff = compute_diff(old, new, config).context("Failed to compare documents")?;
    let exit_code = if diff.same_value() { 0 } else { 1 };

    if cli.quiet {
        return Ok(exit_code);
    }

    let output_options = OutputOptions {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };
    let output_format: OutputFormat = cli.format.into();
    let output = format_diff(&diff, &output_format, &output_options)
        .context("Failed to format diff output")?;
    println!("{}", output);

    Ok(exit_code)
}
