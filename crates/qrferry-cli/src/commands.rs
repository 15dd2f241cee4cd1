use colored::Colorize;
use serde_json::json;

use qrferry_codec::SymbolCodec;
use qrferry_pipeline::{survey, PipelineConfig, Session, StreamStats};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Encode(args) => cmd_encode(args, &cli.format),
        Command::Inspect(args) => cmd_inspect(args, &cli.format),
    }
}

fn build_config(tuning: &TuningArgs) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    if tuning.legacy_encoding {
        config.codec = SymbolCodec::Legacy;
    }
    if let Some(capacity) = tuning.capacity {
        config.profile.chunk_capacity = capacity;
    }
    config
}

fn cmd_encode(args: EncodeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = build_config(&args.tuning);
    let session = Session::from_path(&args.file, config)?;
    let report = session.report().clone();
    let manifest = session.save(&args.out)?;

    match format {
        OutputFormat::Json => {
            let out = json!({ "report": report, "manifest": manifest });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print_stats(&report.stats);
            for failure in report.failures() {
                println!(
                    "{} chunk {} skipped: {}",
                    "!".yellow().bold(),
                    failure.index.to_string().bold(),
                    failure.reason().unwrap_or("unknown")
                );
            }
            println!(
                "{} {} of {} parts saved to {}",
                "✓".green().bold(),
                report.generated().to_string().bold(),
                report.stats.chunk_count,
                args.out.display().to_string().cyan()
            );
            println!("  Combined: {}", manifest.combined.display().to_string().cyan());
            println!("  Manifest: digest {}", manifest.source_digest[..16].dimmed());
        }
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = build_config(&args.tuning);
    let bytes = std::fs::read(&args.file)?;
    let stats = survey(&bytes, config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            print_stats(&stats);
            if stats.oversized_chunks > 0 {
                println!(
                    "{} {} chunk(s) will not fit a single code at the forced version",
                    "!".yellow().bold(),
                    stats.oversized_chunks.to_string().bold()
                );
            }
        }
    }
    Ok(())
}

fn print_stats(stats: &StreamStats) {
    println!(
        "{} {} bytes → {} compressed → {} symbols → {} chunk(s)",
        "→".bold(),
        stats.raw_len.to_string().bold(),
        stats.compressed_len.to_string().bold(),
        stats.symbol_count.to_string().bold(),
        stats.chunk_count.to_string().bold()
    );
}
