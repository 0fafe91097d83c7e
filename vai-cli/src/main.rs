//! VAI CLI Tool
//!
//! Command-line interface for probing, inspecting and extracting frames
//! from VAI video files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use image::RgbaImage;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use vai_core::ParsedContainer;
use vai_decoder::Session;

#[derive(Parser)]
#[command(name = "vai")]
#[command(about = "VAI sprite-sheet video - container inspection and frame extraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a file looks like a VAI container (magic bytes only)
    Probe {
        /// Input file path
        input: PathBuf,
    },

    /// Show container information
    Info {
        /// Input VAI file path
        input: PathBuf,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a single frame to a PNG file
    Frame {
        /// Input VAI file path
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Frame number to render
        #[arg(long, conflicts_with = "time")]
        frame: Option<u64>,

        /// Timestamp in milliseconds to render
        #[arg(long)]
        time: Option<u64>,
    },

    /// Extract all frames to a directory of PNG files
    Extract {
        /// Input VAI file path
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Probe { input } => return probe_file(input),
        Commands::Info { input, json } => show_info(input, json),
        Commands::Frame {
            input,
            output,
            frame,
            time,
        } => extract_frame(input, output, frame, time),
        Commands::Extract { input, output } => extract_all(input, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn probe_file(input: PathBuf) -> ExitCode {
    let bytes = match std::fs::read(&input) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("error: failed to read {}: {err}", input.display());
            return ExitCode::FAILURE;
        }
    };

    if vai_host::probe(&bytes) {
        println!("{}: VAI container", input.display());
        ExitCode::SUCCESS
    } else {
        println!("{}: not a VAI container", input.display());
        ExitCode::FAILURE
    }
}

fn show_info(input: PathBuf, json: bool) -> Result<()> {
    let bytes = std::fs::read(&input).context("Failed to read VAI file")?;
    let container = ParsedContainer::parse(&bytes).context("Failed to parse VAI container")?;
    let meta = container.metadata();

    // Distinct payload blocks; repeated frames alias one block.
    let unique_blocks: HashSet<_> = container
        .index()
        .entries()
        .map(|e| (e.offset, e.len))
        .collect();

    if json {
        let info = serde_json::json!({
            "metadata": meta,
            "fps": meta.fps(),
            "payload_bytes": container.payload().len(),
            "unique_blocks": unique_blocks.len(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("=== VAI File Information ===");
    println!("Resolution: {}x{}", meta.width, meta.height);
    println!(
        "Frame rate: {}/{} ({:.2} fps)",
        meta.fps_num,
        meta.fps_den,
        meta.fps()
    );
    println!(
        "Duration: {} ms ({:.2} seconds)",
        meta.duration_ms,
        meta.duration_ms as f64 / 1000.0
    );
    println!("Frames: {}", meta.total_frames);
    println!(
        "Payload: {} bytes ({:.2} KB), {} unique blocks for {} frames",
        container.payload().len(),
        container.payload().len() as f64 / 1024.0,
        unique_blocks.len(),
        meta.total_frames
    );

    Ok(())
}

fn extract_frame(
    input: PathBuf,
    output: PathBuf,
    frame: Option<u64>,
    time: Option<u64>,
) -> Result<()> {
    let bytes = std::fs::read(&input).context("Failed to read VAI file")?;
    let mut session = Session::open(&bytes).context("Failed to open VAI container")?;

    match (frame, time) {
        (Some(frame), _) => session.seek_to_frame(frame),
        (None, Some(time)) => session.seek_to_time(time),
        (None, None) => bail!("Pass either --frame or --time"),
    }

    let frame = session.current_frame();
    println!(
        "Extracting frame {} at {}ms",
        frame,
        session.current_time_ms()
    );

    save_frame(&session, frame, &output)?;
    println!("Saved frame to {}", output.display());
    Ok(())
}

fn extract_all(input: PathBuf, output_dir: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&input).context("Failed to read VAI file")?;
    let session = Session::open(&bytes).context("Failed to open VAI container")?;
    let total = session.metadata().total_frames;

    std::fs::create_dir_all(&output_dir).context("Failed to create output directory")?;
    println!("Extracting {} frames to {}", total, output_dir.display());

    for frame in 0..total {
        let path = output_dir.join(format!("frame_{frame:06}.png"));
        save_frame(&session, frame, &path)?;

        if (frame + 1) % 10 == 0 {
            println!("Extracted {} / {} frames", frame + 1, total);
        }
    }

    println!("Successfully extracted all frames");
    Ok(())
}

fn save_frame(session: &Session, frame: u64, path: &PathBuf) -> Result<()> {
    let meta = session.metadata();
    let pixels = session
        .pixels_for(frame)
        .with_context(|| format!("Failed to read frame {frame}"))?;

    let image = RgbaImage::from_raw(meta.width, meta.height, pixels.to_vec())
        .context("Frame size does not match dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}
