use clap::Parser;
use colored::Colorize;
use sheet2json::cli;
use sheet2json::converter::{ConvertOptions, DEFAULT_HEADER_ROW, DEFAULT_INDENT};
use sheet2json::types::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sheet2json")]
#[command(about = "Convert a spreadsheet worksheet to JSON records (one object per row).")]
#[command(long_about = "Sheet2JSON - spreadsheet worksheet to JSON records

Reads one worksheet from an .xlsx, .xlsm, .xlsb, .xls or .ods file.
The header row (row 1 unless --header-row says otherwise) names the
fields; every row below it becomes one object, keys in column order.

RULES:
  Blank header cell in column N  → key \"columnN\"
  Blank data cell                → \"\"
  Cells right of the header      → dropped

EXAMPLES:
  sheet2json people.xlsx                    # writes people.json
  sheet2json people.xlsx -s Staff -i 2      # named sheet, 2-space indent
  sheet2json report.xlsx -r 3 -o out.json   # headers on row 3
  sheet2json people.xlsx --compact          # single-line JSON
  sheet2json people.xlsx -f yaml            # writes people.yaml")]
#[command(version)]
struct Cli {
    /// Path to the input spreadsheet
    input: PathBuf,

    /// Output file path (default: input path with .json/.yaml extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worksheet name to convert (exact, case-sensitive; default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Indentation width for JSON output
    #[arg(short, long, default_value_t = DEFAULT_INDENT, env = "SHEET2JSON_INDENT")]
    indent: usize,

    /// Write compact single-line JSON (ignores --indent)
    #[arg(short, long)]
    compact: bool,

    /// 1-based row holding the column headers
    #[arg(
        short = 'r',
        long,
        default_value_t = DEFAULT_HEADER_ROW,
        env = "SHEET2JSON_HEADER_ROW",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    header_row: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Show verbose conversion steps
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "sheet2json=debug"
    } else {
        "sheet2json=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let options = ConvertOptions {
        input: args.input,
        output: args.output,
        sheet: args.sheet,
        indent: (!args.compact).then_some(args.indent),
        header_row: args.header_row,
        format: args.format,
    };

    match cli::convert(options, args.verbose) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
