use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "qrferry",
    about = "Turn any file into a deck of scannable QR code images",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compress and encode a file, then save QR parts plus a combined grid
    Encode(EncodeArgs),
    /// Run the byte pipeline without rendering images and print statistics
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct EncodeArgs {
    /// The file to encode
    pub file: PathBuf,

    /// Directory the images and manifest are written to
    #[arg(short, long)]
    pub out: PathBuf,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args)]
pub struct InspectArgs {
    /// The file to analyze
    pub file: PathBuf,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args)]
pub struct TuningArgs {
    /// Use the historical lossy pair encoding instead of 11-bit packing
    #[arg(long)]
    pub legacy_encoding: bool,

    /// Override the symbols-per-chunk capacity
    #[arg(long)]
    pub capacity: Option<usize>,
}
