use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_CENTURY_OFFSET, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_STEM, DEFAULT_WINDOW_END,
    DEFAULT_WINDOW_START, SENTINEL_UNKNOWN,
};

#[derive(Parser)]
#[command(name = "rem-processor")]
#[command(about = "Dense-grid reconstruction of sparse REM radionuclide readings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Grid, gap-fill and export the raw feed
    Process {
        #[arg(short, long, help = "Input delimited feed file")]
        input_file: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(long, default_value = DEFAULT_OUTPUT_STEM)]
        output_stem: String,

        #[arg(
            long = "channel",
            help = "Channel column to reconstruct (repeatable) [default: the three stock nuclides]"
        )]
        channels: Vec<String>,

        #[arg(long, default_value = DEFAULT_WINDOW_START)]
        window_start: NaiveDate,

        #[arg(long, default_value = DEFAULT_WINDOW_END, help = "Exclusive window end")]
        window_end: NaiveDate,

        #[arg(long, default_value_t = DEFAULT_CENTURY_OFFSET)]
        century_offset: i32,

        #[arg(long, default_value_t = SENTINEL_UNKNOWN)]
        sentinel: f64,

        #[arg(
            long = "invalid-token",
            help = "Reserved invalid-value marker (repeatable) [default: ? L N]"
        )]
        invalid_tokens: Vec<String>,

        #[arg(long, default_value = "false", help = "Skip per-channel intermediate files")]
        skip_intermediate: bool,

        #[arg(long, default_value = "false")]
        validate_only: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Run the channel pipelines and report, writing nothing
    Validate {
        #[arg(short, long, help = "Input delimited feed file")]
        input_file: PathBuf,

        #[arg(long = "channel")]
        channels: Vec<String>,

        #[arg(long, default_value = DEFAULT_WINDOW_START)]
        window_start: NaiveDate,

        #[arg(long, default_value = DEFAULT_WINDOW_END)]
        window_end: NaiveDate,

        #[arg(long, default_value_t = DEFAULT_CENTURY_OFFSET)]
        century_offset: i32,

        #[arg(long = "invalid-token")]
        invalid_tokens: Vec<String>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Summarize an already-cleaned merged table
    Info {
        #[arg(short, long)]
        file: PathBuf,
    },
}
