use crate::converter::{self, ConvertOptions, ConvertReport};
use crate::error::ConvertResult;
use colored::Colorize;

/// Execute the convert command
pub fn convert(options: ConvertOptions, verbose: bool) -> ConvertResult<ConvertReport> {
    if verbose {
        println!("{}", "📖 Sheet2JSON - Converting worksheet".bold().green());
        println!("   Input:  {}", options.input.display());
        println!("   Output: {}", options.output_path().display());
        if let Some(ref sheet) = options.sheet {
            println!("   Sheet:  {}", sheet.bright_yellow().bold());
        }
        println!("   Header row: {}", options.header_row);
        match options.indent {
            Some(width) => println!("   Format: {} (indent {})", options.format, width),
            None => println!("   Format: {} (compact)", options.format),
        }
        println!();
    }

    let report = converter::convert(&options)?;
    print_report(&report);
    Ok(report)
}

fn print_report(report: &ConvertReport) {
    println!(
        "{} '{}' to '{}'",
        "✅ Successfully converted".bold().green(),
        report.input.display(),
        report.output.display()
    );
    println!(
        "   Used row {} of sheet {} as headers: {}",
        report.header_row,
        report.sheet.bright_blue().bold(),
        format_headers(report.headers.names())
    );
    println!("   Records written: {}", report.records);
}

/// Render header names as `["a", "b"]`
fn format_headers(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("{:?}", n)).collect();
    format!("[{}]", quoted.join(", "))
}
