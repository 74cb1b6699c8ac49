//! sty2katex CLI - Convert LaTeX macro stylesheets into KaTeX macro tables

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use sty2katex::{
    diagnostics::{check_stylesheet, format_diagnostics},
    export::{export_macros, OutputFormat},
    ConversionWarning, MacroParser, ParseOptions,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sty2katex")]
#[command(version)]
#[command(about = "Convert LaTeX macro stylesheets into KaTeX macro tables", long_about = None)]
struct Cli {
    /// Input stylesheet path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Check mode - report issues in the stylesheet without converting
    #[arg(long)]
    check: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Strict mode: exit with error if any warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Rewrite passes allowed before an expansion is reported as cyclic
    #[arg(long)]
    max_passes: Option<usize>,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// JSON object
    Json,
    /// ES module with a default export
    Js,
}

#[cfg(feature = "cli")]
impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Js => OutputFormat::JsModule,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // If check mode, analyze and report issues
    if cli.check {
        let result = check_stylesheet(&input);
        let output = format_diagnostics(&result, !cli.no_color);
        println!("{}", output);

        // Exit with error code if there are errors
        if result.has_errors() || (cli.strict && result.warnings > 0) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut options = ParseOptions::default();
    if let Some(passes) = cli.max_passes {
        options = options.with_max_expansion_passes(passes);
    }

    let parsed = match MacroParser::with_options(options).parse_with_diagnostics(&input) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Print warnings to stderr (unless quiet mode)
    if !cli.quiet && parsed.has_warnings() {
        print_warnings_to_stderr(&parsed.warnings, !cli.no_color);
    }

    // Check strict mode
    if cli.strict && parsed.has_warnings() {
        eprintln!(
            "Error: {} warning(s) in strict mode",
            parsed.warnings.len()
        );
        std::process::exit(1);
    }

    let result = match export_macros(&parsed.macros, cli.format.into(), !cli.compact) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            write!(file, "{}", result)?;
            if !result.ends_with('\n') {
                writeln!(file)?;
            }
            if parsed.warnings.is_empty() {
                eprintln!(
                    "✓ {} macro(s) written to: {}",
                    parsed.macros.len(),
                    path
                );
            } else {
                eprintln!(
                    "⚠ {} macro(s) written to: {} ({} warning(s))",
                    parsed.macros.len(),
                    path,
                    parsed.warnings.len()
                );
            }
        }
        None => {
            print!("{}", result);
            if !result.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    let (color, reset) = if use_color {
        ("\x1b[33m", "\x1b[0m")
    } else {
        ("", "")
    };

    eprintln!();
    eprintln!("{}⚠ {} warning(s):{}", color, warnings.len(), reset);
    for warning in warnings {
        eprintln!("  {}", warning);
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install sty2katex --features cli");
    eprintln!("  sty2katex [OPTIONS] [INPUT_FILE]");
}
