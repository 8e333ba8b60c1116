use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use icon_crop_wasm::{Color, IconConverter, DEFAULT_SUBJECT_HEX, DEFAULT_TOLERANCE};

/// Crop images to their subject color and convert them to multi-size icons.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the automatically detected subject color
    Detect {
        /// Input image path
        input: PathBuf,

        /// Print JSON including the detected background color
        #[arg(long)]
        json: bool,
    },

    /// Crop to the subject color and write an .ico
    Convert {
        /// Input image path
        input: PathBuf,

        /// Output .ico path (defaults to the input path with an .ico extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Subject color as hex, e.g. #42D6FF
        #[arg(short, long, default_value = DEFAULT_SUBJECT_HEX, conflicts_with = "auto")]
        color: String,

        /// Detect the subject color automatically instead of using --color
        #[arg(short, long)]
        auto: bool,

        /// Maximum RGB distance for a pixel to count as subject
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: u32,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Detect { input, json } => {
            let converter = IconConverter::new(&input)?;
            let detected = converter
                .detect_colors()
                .with_context(|| format!("auto-detection failed for {}", input.display()))?;

            if json {
                let report = serde_json::json!({
                    "color": detected.subject.to_hex(),
                    "background": detected.background.to_hex(),
                });
                println!("{report}");
            } else {
                println!("{}", detected.subject.to_hex());
            }
        }
        Command::Convert {
            input,
            output,
            color,
            auto,
            tolerance,
        } => {
            let converter = IconConverter::new(&input)?;
            let subject = if auto {
                converter
                    .find_dominant_color()
                    .context("auto-detection failed; pass --color instead")?
            } else {
                Color::from_hex(&color)?
            };

            let report = converter
                .convert(output.as_deref(), subject, tolerance)
                .context("icon conversion failed")?;
            println!(
                "Saved → {} ({}x{} → {}x{})",
                report.output.display(),
                report.original.0,
                report.original.1,
                report.cropped.0,
                report.cropped.1
            );
        }
    }

    Ok(())
}
