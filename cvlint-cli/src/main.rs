use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cvlint::{
    criteria_for, filter_criteria, score_criteria, validate_passing_score, FileSource,
    ScoreReport, ValidationConfig,
};

#[derive(Parser)]
#[command(
    name = "cvlint",
    about = "Validate PDF resumes against quality criteria",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a PDF resume against quality criteria
    Check(CheckArgs),

    /// List all available validation criteria
    ListCriteria,

    /// Show default configuration values
    Config,
}

#[derive(Args)]
struct CheckArgs {
    /// Path to the PDF file to validate
    pdf_path: PathBuf,

    /// Specific criteria to run (repeat for multiple)
    #[arg(short, long = "criteria", value_name = "NAME")]
    criteria: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Minimum score required for the command to succeed (0-100)
    #[arg(long, default_value_t = 80.0)]
    passing_score: f64,

    /// Maximum allowed pages
    #[arg(long, default_value_t = 1)]
    max_pages: u32,

    /// Minimum font size in points
    #[arg(long, default_value_t = 8.0)]
    min_font: f64,

    /// Maximum font size in points
    #[arg(long, default_value_t = 21.0)]
    max_font: f64,

    /// Maximum file size in KB
    #[arg(long, default_value_t = 500.0)]
    max_file_size: f64,

    /// Disable the HTTPS requirement for links
    #[arg(long)]
    no_https: bool,

    /// Allow embedded images
    #[arg(long)]
    allow_images: bool,

    /// Allow non-grayscale colors
    #[arg(long)]
    allow_colors: bool,

    /// Don't require a white background
    #[arg(long)]
    no_white_bg: bool,

    /// Custom words file (one word per line)
    #[arg(long, value_name = "FILE")]
    custom_words: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Summary,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvlint=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::ListCriteria => {
            list_criteria();
            Ok(())
        }
        Commands::Config => {
            show_config();
            Ok(())
        }
    }
}

fn run_check(args: CheckArgs) -> Result<()> {
    if let Err(err) = validate_passing_score(args.passing_score) {
        eprintln!("Error: {err}");
        process::exit(1);
    }

    if !args.pdf_path.exists() {
        eprintln!("Error: PDF file not found: {}", args.pdf_path.display());
        process::exit(1);
    }

    let custom_words = match &args.custom_words {
        Some(path) if path.exists() => load_custom_words(path)?,
        Some(path) => {
            eprintln!("Warning: Custom words file not found: {}", path.display());
            Vec::new()
        }
        None => Vec::new(),
    };

    let mut config = ValidationConfig::new(&args.pdf_path);
    config.max_pages = args.max_pages;
    config.max_file_size_kb = args.max_file_size;
    config.min_font = args.min_font;
    config.max_font = args.max_font;
    config.enforce_https = !args.no_https;
    config.no_images = !args.allow_images;
    config.background_white = !args.no_white_bg;
    config.grayscale_colors = !args.allow_colors;
    config.custom_words = custom_words;
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        process::exit(1);
    }

    let mut criteria = criteria_for(&config);
    if !args.criteria.is_empty() {
        let names: Vec<String> = args
            .criteria
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        let available: Vec<String> = criteria.iter().map(|c| c.name().to_string()).collect();
        criteria = filter_criteria(criteria, &names);
        if criteria.is_empty() {
            eprintln!("Error: No matching criteria found. Available criteria:");
            for name in available {
                eprintln!("  - {name}");
            }
            process::exit(1);
        }
    }

    let source = FileSource::new(&args.pdf_path);
    let report = score_criteria(args.pdf_path.display().to_string(), &source, &criteria);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Summary => print_summary(&report, args.passing_score),
        OutputFormat::Table => print_table(&report, args.passing_score),
    }

    if !report.meets(args.passing_score) {
        process::exit(1);
    }
    Ok(())
}

fn load_custom_words(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn print_summary(report: &ScoreReport, passing_score: f64) {
    println!();
    println!("CV Validation Results for: {}", report.document);
    println!(
        "Score: {:.1}% (Required: {:.1}%)",
        report.score, passing_score
    );
    println!(
        "Passed: {}/{} criteria",
        report.passed_count, report.total_count
    );

    if report.meets(passing_score) {
        println!("PASSED - Score meets minimum requirement");
    } else {
        println!(
            "FAILED - Score below minimum requirement of {passing_score:.1}%"
        );
    }

    let failed: Vec<_> = report.results.iter().filter(|r| !r.passed).collect();
    if !failed.is_empty() {
        println!();
        println!("Failed Criteria:");
        for result in failed {
            println!("  - {}", result.name);
            if let Some(error) = &result.error {
                println!("     Error: {error}");
            }
        }
    }
}

fn print_table(report: &ScoreReport, passing_score: f64) {
    println!("CV Validation Results - {}", report.document);
    println!("{:=<96}", "");
    println!(
        "{:<32} {:^6} {:>6}  {}",
        "Criterion", "Status", "Weight", "Description"
    );
    println!("{:-<96}", "");
    for result in &report.results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        println!(
            "{:<32} {:^6} {:>6.1}  {}",
            result.name, status, result.weight, result.description
        );
    }
    println!("{:-<96}", "");

    let verdict = if report.meets(passing_score) {
        "PASSED"
    } else {
        "FAILED"
    };
    println!(
        "Summary - {verdict} | Score: {:.1}% (Required: {:.1}%) | Passed: {}/{} criteria",
        report.score, passing_score, report.passed_count, report.total_count
    );
}

fn list_criteria() {
    let config = ValidationConfig::new("dummy.pdf");
    let criteria = criteria_for(&config);
    let total: f64 = criteria.iter().map(|c| c.weight()).sum();

    println!("Available Validation Criteria");
    println!("{:=<96}", "");
    println!("{:<32} {:>6}  {}", "Name", "Weight", "Description");
    println!("{:-<96}", "");
    for criterion in &criteria {
        println!(
            "{:<32} {:>6.1}  {}",
            criterion.name(),
            criterion.weight(),
            criterion.description()
        );
    }
    println!();
    println!("Total Weight: {total:.1} points");
}

fn show_config() {
    let defaults = ValidationConfig::new("example.pdf");

    println!("Default Configuration Values");
    println!("{:=<72}", "");
    println!("{:<20} {:<12} {}", "Setting", "Default", "Description");
    println!("{:-<72}", "");
    let rows: [(&str, String, &str); 8] = [
        (
            "max_pages",
            defaults.max_pages.to_string(),
            "Maximum allowed pages",
        ),
        (
            "min_font",
            defaults.min_font.to_string(),
            "Minimum font size in points",
        ),
        (
            "max_font",
            defaults.max_font.to_string(),
            "Maximum font size in points",
        ),
        (
            "enforce_https",
            defaults.enforce_https.to_string(),
            "Require HTTPS for links",
        ),
        (
            "max_file_size_kb",
            defaults.max_file_size_kb.to_string(),
            "Maximum file size in KB",
        ),
        (
            "no_images",
            defaults.no_images.to_string(),
            "Prohibit embedded images",
        ),
        (
            "background_white",
            defaults.background_white.to_string(),
            "Require white background",
        ),
        (
            "grayscale_colors",
            defaults.grayscale_colors.to_string(),
            "Require grayscale colors only",
        ),
    ];
    for (setting, value, description) in rows {
        println!("{setting:<20} {value:<12} {description}");
    }
    println!();
    println!("Note: These are default values. Use command-line options to override them.");
}
