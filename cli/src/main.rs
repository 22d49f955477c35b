//! docx2txt CLI - Word document text extraction tool
//!
//! Prints the text of a .docx file, optionally extracting its images
//! and dumping every extracted field.

use clap::Parser;
use colored::*;
use docx2txt::render::{self, JsonFormat};
use docx2txt::ExtractOptions;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract text, images and properties from .docx files
#[derive(Parser)]
#[command(
    name = "docx2txt",
    author = "iyulab",
    version,
    about = "Extract data from Word .docx files"
)]
struct Cli {
    /// Path of the docx file
    docx: PathBuf,

    /// Directory to extract images into (created if missing)
    #[arg(short, long)]
    img_dir: Option<PathBuf>,

    /// Print all document data instead of just the text
    #[arg(short, long)]
    details: bool,

    /// Print all document data as JSON
    #[arg(long, conflicts_with = "details")]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    exit_status(run(cli), &mut io::stderr().lock())
}

/// Exit code for a finished run; failures print one line to `err`.
fn exit_status(result: Result<(), Box<dyn Error>>, err: &mut impl Write) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "{}: {}", "Error".red().bold(), e);
            ExitCode::from(1)
        }
    }
}

/// Validate the input path and create the image directory.
///
/// Runs before the document is touched so an unusable directory fails fast.
fn prepare(cli: &Cli) -> Result<ExtractOptions, Box<dyn Error>> {
    if !cli.docx.exists() {
        return Err(format!("File {:?} does not exist.", cli.docx).into());
    }

    let mut options = ExtractOptions::new();
    if let Some(dir) = &cli.img_dir {
        docx2txt::docx::create_image_dir(dir)?;
        options = options.with_image_dir(dir.clone());
    }
    Ok(options)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let options = prepare(&cli)?;

    let pb = create_spinner("Extracting document...");
    let doc = docx2txt::process_file(&cli.docx, &options);
    pb.finish_and_clear();
    let doc = doc?;

    let output = if cli.json {
        render::to_json(&doc, JsonFormat::Pretty)?
    } else if cli.details {
        render::to_details(&doc)
    } else {
        render::to_text(&doc)
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.details {
        write!(handle, "{}", output)?;
    } else {
        writeln!(handle, "{}", output)?;
    }
    Ok(())
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
