use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::analyzers::GridAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::GridConfig;
use crate::error::{ProcessingError, Result};
use crate::models::ChannelGrid;
use crate::processors::{ChannelPipeline, ChannelReport, GridMerger};
use crate::readers::FeedReader;
use crate::utils::init_tracing;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Process {
            input_file,
            output_dir,
            output_stem,
            channels,
            window_start,
            window_end,
            century_offset,
            sentinel,
            invalid_tokens,
            skip_intermediate,
            validate_only,
            max_workers,
        } => {
            let config = build_config(
                channels,
                window_start,
                window_end,
                century_offset,
                sentinel,
                invalid_tokens,
                output_dir,
                output_stem,
            )?;

            println!("Processing REM feed...");
            println!("Input file: {}", input_file.display());
            println!(
                "Window: [{}, {}) over {} channels",
                config.window_start,
                config.window_end,
                config.channels.len()
            );

            configure_thread_pool(max_workers)?;

            let (grids, reports) = run_pipelines(&config, &input_file).await?;

            for report in &reports {
                println!("\n{}", report.summary());
            }

            if validate_only {
                println!("Validation complete - no output written");
                return Ok(());
            }

            std::fs::create_dir_all(&config.output_dir)?;
            let writer = CsvWriter::new();

            if !skip_intermediate {
                for grid in &grids {
                    let path = config.channel_output_path(grid.channel());
                    writer.write_channel_grid(grid, &path)?;
                    println!("Wrote {}", path.display());
                }
            }

            let records = GridMerger::new().merge(&grids)?;
            let merged_path = config.merged_output_path();
            writer.write_merged(&config.channels, &records, &merged_path)?;
            println!("Wrote {} rows to {}", records.len(), merged_path.display());

            println!("Processing complete!");
        }

        Commands::Validate {
            input_file,
            channels,
            window_start,
            window_end,
            century_offset,
            invalid_tokens,
            max_workers,
        } => {
            let config = build_config(
                channels,
                window_start,
                window_end,
                century_offset,
                crate::utils::constants::SENTINEL_UNKNOWN,
                invalid_tokens,
                PathBuf::from(crate::utils::constants::DEFAULT_OUTPUT_DIR),
                crate::utils::constants::DEFAULT_OUTPUT_STEM.to_string(),
            )?;

            println!("Validating REM feed...");
            println!("Input file: {}", input_file.display());

            configure_thread_pool(max_workers)?;

            let (grids, reports) = run_pipelines(&config, &input_file).await?;

            for report in &reports {
                println!("\n{}", report.summary());
            }

            let leaked: usize = grids.iter().map(|g| g.sentinel_count()).sum();
            if leaked == 0 {
                println!("All channel grids are dense and gap-free");
            } else {
                println!("{} cells kept the sentinel value", leaked);
            }
        }

        Commands::Info { file } => {
            println!("Analyzing cleaned table: {}", file.display());

            let stats = GridAnalyzer::new().analyze_csv(&file)?;
            println!("\n{}", stats.detailed_summary());
        }
    }

    Ok(())
}

/// Read the feed once, then run one pipeline task per channel and join
/// them in channel order before any merging happens.
async fn run_pipelines(
    config: &GridConfig,
    input_file: &Path,
) -> Result<(Vec<ChannelGrid>, Vec<ChannelReport>)> {
    let progress = ProgressReporter::new_spinner("Reading feed...", false);

    let reader = FeedReader::new(config.clone());
    let mut feed = reader.read_feed(input_file)?;

    progress.set_message("Gridding channels...");

    let mut handles = Vec::with_capacity(config.channels.len());
    for channel in &config.channels {
        let channel = channel.clone();
        let stations = feed.stations.clone();
        let readings = feed.readings.remove(&channel).unwrap_or_default();
        let pipeline = ChannelPipeline::new(config.clone());

        handles.push(tokio::spawn(async move {
            pipeline.run(&channel, &stations, &readings)
        }));
    }

    let mut grids = Vec::with_capacity(handles.len());
    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        let (grid, report) = handle.await??;
        grids.push(grid);
        reports.push(report);
    }

    progress.finish_with_message(&format!("Processed {} channels", grids.len()));

    Ok((grids, reports))
}

#[allow(clippy::too_many_arguments)]
fn build_config(
    channels: Vec<String>,
    window_start: NaiveDate,
    window_end: NaiveDate,
    century_offset: i32,
    sentinel: f64,
    invalid_tokens: Vec<String>,
    output_dir: PathBuf,
    output_stem: String,
) -> Result<GridConfig> {
    let defaults = GridConfig::default();
    let config = GridConfig {
        window_start,
        window_end,
        century_offset,
        channels: if channels.is_empty() {
            defaults.channels
        } else {
            channels
        },
        invalid_tokens: if invalid_tokens.is_empty() {
            defaults.invalid_tokens
        } else {
            invalid_tokens
        },
        sentinel,
        output_dir,
        output_stem,
    };

    config.validate()?;
    Ok(config)
}

fn configure_thread_pool(max_workers: usize) -> Result<()> {
    if max_workers == 0 {
        return Ok(());
    }
    // build_global errors once a pool exists; the CLI calls this once per run
    rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .build_global()
        .map_err(|e| ProcessingError::Config(e.to_string()))
}
