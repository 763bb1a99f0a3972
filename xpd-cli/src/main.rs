//! xpd - path-addressed XML comparison CLI

use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use xmlpath_diff::{
    build_tree, compare_documents, resolve_status, BuildSettings, CompareRequest,
    CompareResponse, DiffReport, Side, TreeNode,
};

/// Path-addressed XML comparison
#[derive(Parser)]
#[command(name = "xpd")]
#[command(version)]
#[command(
    about = "Compare XML documents element by element using path identity",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two XML files
    #[command(visible_alias = "c")]
    Compare {
        /// Left file
        left: String,
        /// Right file
        right: String,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the path tree of one XML file
    #[command(visible_alias = "t")]
    Tree {
        /// Input file
        file: String,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Answer JSON-line compare requests from stdin on stdout
    Serve,
}

/// Path settings shared by `compare` and `tree`.
#[derive(Args)]
struct SettingsArgs {
    /// JSON settings file (elementsArray, indexAttribute, leafOmit)
    #[arg(short, long)]
    settings: Option<String>,

    /// Tags whose first occurrence is never bracketed (comma separated)
    #[arg(long, value_delimiter = ',')]
    elements_array: Vec<String>,

    /// Attribute whose positive-integer value replaces the sibling index
    #[arg(long)]
    index_attribute: Option<String>,

    /// Bracket lone childless elements as `[1]`
    #[arg(long)]
    no_leaf_omit: bool,
}

impl SettingsArgs {
    /// Loads the settings file, if any, then applies command line overrides.
    fn resolve(&self) -> Result<BuildSettings, Box<dyn std::error::Error>> {
        let mut settings = match &self.settings {
            Some(path) => {
                debug!("Loading settings: {}", path);
                BuildSettings::load(path)?
            }
            None => BuildSettings::default(),
        };
        if !self.elements_array.is_empty() {
            settings.elements_array = self.elements_array.clone();
        }
        if self.index_attribute.is_some() {
            settings.index_attribute = self.index_attribute.clone();
        }
        if self.no_leaf_omit {
            settings.leaf_omit = false;
        }
        Ok(settings)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Exit code when the documents are identical.
const EXIT_IDENTICAL: u8 = 0;
/// Exit code when the documents differ.
const EXIT_DIFFERENT: u8 = 1;
/// Exit code on error.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compare {
            left,
            right,
            settings,
            format,
            output,
        } => run_compare(&left, &right, &settings, format, output.as_deref()).map(ExitCode::from),
        Commands::Tree {
            file,
            settings,
            format,
        } => run_tree(&file, &settings, format).map(|()| ExitCode::SUCCESS),
        Commands::Serve => {
            serve(io::stdin().lock(), io::stdout().lock()).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Installs a stderr subscriber so stdout carries only results.
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
        .with_writer(io::stderr)
        .init();
}

/// Builds and compares two files, returning the exit code.
fn run_compare(
    left_path: &str,
    right_path: &str,
    settings: &SettingsArgs,
    format: Format,
    output_path: Option<&str>,
) -> Result<u8, Box<dyn std::error::Error>> {
    let settings = settings.resolve()?;

    info!("Reading left: {}", left_path);
    let left_xml = fs::read_to_string(left_path)?;
    info!("Reading right: {}", right_path);
    let right_xml = fs::read_to_string(right_path)?;

    let comparison = compare_documents(&left_xml, &right_xml, &settings)?;

    // Get output writer
    let mut output: Box<dyn Write> = match output_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut output, &comparison)?;
            writeln!(output)?;
        }
        Format::Text => {
            writeln!(output, "--- {}", left_path)?;
            write_annotated(&mut output, &comparison.left, &comparison.report, Side::Left)?;
            writeln!(output, "+++ {}", right_path)?;
            write_annotated(&mut output, &comparison.right, &comparison.report, Side::Right)?;
            write_stats(&mut output, &comparison.report)?;
        }
    }
    output.flush()?;

    Ok(exit_status(&comparison.report))
}

fn exit_status(report: &DiffReport) -> u8 {
    if report.is_identical() {
        EXIT_IDENTICAL
    } else {
        EXIT_DIFFERENT
    }
}

/// Writes every path of one side with its status marker.
fn write_annotated<W: Write + ?Sized>(
    out: &mut W,
    tree: &TreeNode,
    report: &DiffReport,
    side: Side,
) -> io::Result<()> {
    for node in tree.iter() {
        let status = resolve_status(node.path(), Some(report), side);
        writeln!(out, "  {:<9} {}", status, node.path())?;
    }
    Ok(())
}

fn write_stats<W: Write + ?Sized>(out: &mut W, report: &DiffReport) -> io::Result<()> {
    let stats = report.stats();
    writeln!(
        out,
        "{} matched, {} different, {} left only, {} right only ({} left nodes, {} right nodes)",
        stats.matched,
        stats.different,
        stats.left_only,
        stats.right_only,
        stats.total_left,
        stats.total_right
    )
}

/// Prints the built tree of one file.
fn run_tree(
    path: &str,
    settings: &SettingsArgs,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings.resolve()?;
    let xml = fs::read_to_string(path)?;
    let tree = build_tree(&xml, &settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &tree)?;
            writeln!(out)?;
        }
        Format::Text => {
            for node in tree.iter() {
                write!(out, "{}", node.path())?;
                if node.comparison_key() != node.tag_name() {
                    write!(out, "  {}", node.comparison_key())?;
                }
                if !node.text_content().is_empty() {
                    write!(out, "  {:?}", node.text_content())?;
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Reads one request per line and writes one response per line.
fn serve<R: BufRead, W: Write>(input: R, mut out: W) -> Result<(), Box<dyn std::error::Error>> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<CompareRequest>(&line) {
            Ok(request) => xmlpath_diff::handle_request(&request),
            Err(e) => {
                warn!("Rejecting request: {}", e);
                CompareResponse::invalid(request_id(&line), e.to_string())
            }
        };
        serde_json::to_writer(&mut out, &response)?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}

/// Recovers the id of a request that failed to decode, or 0.
fn request_id(line: &str) -> u64 {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|value| value.get("id").and_then(serde_json::Value::as_u64))
        .unwrap_or(0)
}
