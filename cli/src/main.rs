//! ooxml-validator CLI - Office Open XML validation tool
//!
//! A command-line tool for validating DOCX, XLSX, and PPTX files against an
//! Office compatibility version.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use ooxml_validator::render::{JsonFormat, JsonOptions, ReferenceHandling};
use ooxml_validator::{FileFormatVersion, ValidationErrorInfo, ValidationErrorType, ValidationRequest};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Office Open XML document validation
#[derive(Parser)]
#[command(
    name = "ooxml-validator",
    author = "iyulab",
    version,
    about = "Validate Office documents against an Office version",
    long_about = "ooxml-validator - Office Open XML validation tool.\n\n\
                  Validates DOCX, XLSX, and PPTX files against the markup understood by\n\
                  Office 2007 through Office 2019 and reports the findings as JSON."
)]
struct Cli {
    /// Log verbosity
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a document
    #[command(visible_alias = "check")]
    Validate {
        /// Input file path
        input: PathBuf,

        /// Office version index (0 = Office 2007 ... 4 = Office 2019)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        /// Write shared records in full instead of `$ref` references
        #[arg(long)]
        no_preserve: bool,

        /// Print a summary instead of JSON
        #[arg(short, long)]
        summary: bool,
    },

    /// Handle a raw JSON request, as an invocation host would
    Invoke {
        /// Request JSON (default: read from stdin)
        request: Option<String>,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },

    /// List the supported Office versions
    Versions,

    /// Show version information
    Version,
}

/// Log verbosity
#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Validate {
            input,
            format,
            output,
            compact,
            no_preserve,
            summary,
        } => {
            let pb = create_spinner("Opening document...");

            let request = ValidationRequest {
                file_name: Some(input.to_string_lossy().into_owned()),
                // An omitted flag behaves like `"format": null`.
                format: Some(format),
            };
            let resolved = request.resolve()?;
            pb.set_message(format!("Validating against {}...", resolved.version));

            let findings = ooxml_validator::validate_file(&resolved.path, resolved.version)?;

            pb.finish_and_clear();

            if summary {
                print_summary(&input, resolved.version, &findings);
                return Ok(());
            }

            let options = JsonOptions::new()
                .with_format(if compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                })
                .with_references(if no_preserve {
                    ReferenceHandling::Plain
                } else {
                    ReferenceHandling::Preserve
                });
            let json = ooxml_validator::render::to_json(&findings, &options)?;

            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} {} findings written to {}",
                    "✓".green().bold(),
                    findings.len(),
                    path.display()
                );
            }
        }

        Commands::Invoke { request, pretty } => {
            let request = match request {
                Some(request) => request,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let json = ooxml_validator::invoke(&request)?;
            let json = if pretty {
                let value: serde_json::Value = serde_json::from_str(&json)?;
                serde_json::to_string_pretty(&value)?
            } else {
                json
            };

            write_output(None, &json)?;
        }

        Commands::Versions => {
            println!("{}", "Supported Office versions".cyan().bold());
            println!("{}", "─".repeat(40));
            for version in FileFormatVersion::ALL {
                println!("  {}  {}", version.index().to_string().bold(), version);
            }
            println!();
            println!(
                "Index 0 and unparseable values select {}.",
                FileFormatVersion::newest()
            );
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_summary(input: &std::path::Path, version: FileFormatVersion, findings: &[ValidationErrorInfo]) {
    println!("{}", "Validation Summary".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Version".bold(), version);

    if findings.is_empty() {
        println!("\n{} No findings", "✓".green().bold());
        return;
    }

    let count = |error_type: ValidationErrorType| {
        findings
            .iter()
            .filter(|f| f.error_type == error_type)
            .count()
    };
    println!("{}: {}", "Schema".bold(), count(ValidationErrorType::Schema));
    println!("{}: {}", "Semantic".bold(), count(ValidationErrorType::Semantic));
    println!("{}: {}", "Package".bold(), count(ValidationErrorType::Package));
    println!(
        "{}: {}",
        "Markup compatibility".bold(),
        count(ValidationErrorType::MarkupCompatibility)
    );

    println!();
    for finding in findings {
        let location = finding
            .path
            .as_ref()
            .map(|p| match &p.xpath {
                Some(xpath) => format!("{} {}", p.part_uri, xpath),
                None => p.part_uri.clone(),
            })
            .unwrap_or_default();
        println!("{} {} {}", "!".yellow().bold(), finding.id.bold(), location.dimmed());
        println!("    {}", finding.description);
    }
}

fn print_version() {
    println!("{} {}", "ooxml-validator".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Office Open XML validation against Office 2007-2019");
    println!();
    println!("Supported formats: DOCX, XLSX, PPTX");
    println!("Repository: https://github.com/iyulab/ooxml-validator");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::try_parse_from([
            "ooxml-validator",
            "validate",
            "report.docx",
            "--format",
            "2",
            "--no-preserve",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate {
                input,
                format,
                no_preserve,
                compact,
                ..
            } => {
                assert_eq!(input, PathBuf::from("report.docx"));
                assert_eq!(format.as_deref(), Some("2"));
                assert!(no_preserve);
                assert!(!compact);
            }
            _ => panic!("expected validate"),
        }
    }
}
