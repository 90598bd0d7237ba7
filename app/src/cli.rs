//! Command-line boundary: argument parsing and command dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use image_engine::GridDetector;

use crate::batch::run_batch_file;
use crate::config::{Color, GenerationConfig, Settings};
use crate::error::{BatchError, VericodeError};
use crate::export::{ExportFormat, export};
use crate::generate::{generate, read_data_file};
use crate::scan::{PasswordPrompt, scan_file};

#[derive(Debug, Parser)]
#[command(
    name = "vericode",
    version,
    about = "Generate and scan QR codes with optional encryption and logos"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a single QR code
    Generate(GenerateArgs),
    /// Generate one QR code per row of a CSV or spreadsheet file
    Batch(BatchArgs),
    /// Decode the QR code in an image
    Scan(ScanArgs),
    /// Print the effective settings as JSON
    Config,
}

#[derive(Debug, Clone, Default, Args)]
pub struct StyleArgs {
    /// Module color (#rrggbb, #rgb or a color name)
    #[arg(long)]
    pub fg: Option<Color>,
    /// Background color
    #[arg(long)]
    pub bg: Option<Color>,
    /// Logo image to place in the center
    #[arg(long, conflicts_with = "no_logo")]
    pub logo: Option<PathBuf>,
    /// Ignore any logo configured in the environment
    #[arg(long)]
    pub no_logo: bool,
}

impl StyleArgs {
    /// Apply flags over the loaded settings.
    pub fn resolve(&self, settings: &Settings) -> GenerationConfig {
        let mut config = settings.generation();
        if let Some(fg) = self.fg {
            config.foreground = fg;
        }
        if let Some(bg) = self.bg {
            config.background = bg;
        }
        if self.no_logo {
            config.logo = None;
        } else if let Some(logo) = &self.logo {
            config.logo = Some(logo.clone());
        }
        config
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Text to encode
    #[arg(required_unless_present = "data_file")]
    pub data: Option<String>,
    /// Read the text to encode from a file
    #[arg(long, conflicts_with = "data")]
    pub data_file: Option<PathBuf>,
    /// Password-protect the payload
    #[arg(long)]
    pub password: Option<String>,
    /// Output file (.png, .jpg or .pdf)
    #[arg(short, long)]
    pub output: PathBuf,
    /// Output format; inferred from the extension when omitted
    #[arg(long, value_parser = parse_format)]
    pub format: Option<ExportFormat>,
    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV or spreadsheet file; the first row holds column names
    pub dataset: PathBuf,
    /// Letter of the identifier column used for file names (A, B, ...)
    #[arg(short, long)]
    pub column: String,
    /// Directory for the generated images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Image containing a QR code
    pub image: PathBuf,
    /// Answer to the password prompt for protected codes
    #[arg(long)]
    pub password: Option<String>,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: VericodeError| e.to_string())
}

/// Interactive password prompt on stderr/stdin.
pub struct StdinPrompt;

impl PasswordPrompt for StdinPrompt {
    fn prompt(&mut self) -> Option<String> {
        eprint!("Enter password: ");
        io::stderr().flush().ok()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line).ok()?;
        let password = line.trim_end_matches(['\r', '\n']).to_owned();
        (!password.is_empty()).then_some(password)
    }
}

/// Run one parsed command against the loaded settings.
pub fn execute(cli: Cli, settings: &Settings) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => run_generate(args, settings)?,
        Command::Batch(args) => run_batch_command(args, settings)?,
        Command::Scan(args) => run_scan(args)?,
        Command::Config => println!("{}", serde_json::to_string_pretty(settings)?),
    }
    Ok(())
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), VericodeError> {
    // Resolve the output format before doing any work.
    let format = match args.format {
        Some(format) => format,
        None => ExportFormat::from_path(&args.output)?,
    };
    let data = match (&args.data, &args.data_file) {
        (_, Some(path)) => read_data_file(path)?,
        (Some(data), None) => data.clone(),
        (None, None) => String::new(),
    };
    let config = args.style.resolve(settings);

    let generated = generate(&data, args.password.as_deref(), &config)?;
    if let Some(e) = &generated.logo_error {
        eprintln!("Warning: {}", e.user_message());
    }

    let exported = export(&generated.image, &args.output, format)?;
    println!("QR saved as {}", exported.path.display());
    Ok(())
}

fn run_batch_command(args: BatchArgs, settings: &Settings) -> Result<(), BatchError> {
    let config = args.style.resolve(settings);
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| settings.output_dir.clone());

    let summary = run_batch_file(&args.dataset, &args.column, &config, &output_dir)?;
    if let Some(e) = &summary.logo_error {
        eprintln!("Warning: {}", e.user_message());
    }
    println!(
        "Successfully generated {} QR codes in '{}'",
        summary.written,
        output_dir.display()
    );
    Ok(())
}

fn run_scan(args: ScanArgs) -> Result<(), VericodeError> {
    let scanned = match args.password {
        Some(password) => {
            let mut prompt = move || Some(password.clone());
            scan_file(&args.image, &GridDetector, &mut prompt)?
        }
        None => scan_file(&args.image, &GridDetector, &mut StdinPrompt)?,
    };
    println!("{}", scanned.text);
    Ok(())
}

/// One-line message for an error reaching the command boundary.
pub fn describe(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<VericodeError>() {
        return e.user_message();
    }
    if let Some(e) = err.downcast_ref::<BatchError>() {
        return format!(
            "{} ({} QR codes were generated before stopping)",
            e.source.user_message(),
            e.written
        );
    }
    err.to_string()
}
