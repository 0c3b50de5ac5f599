use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_CENTURY_OFFSET, DEFAULT_CHANNELS, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_STEM,
    DEFAULT_WINDOW_END, DEFAULT_WINDOW_START, RESERVED_INVALID_TOKENS, SENTINEL_UNKNOWN,
};
use crate::utils::filename::sanitize_channel;

/// All knobs of the gridding pipeline in one place, passed to each
/// component by construction. Window bounds are closed-open.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub century_offset: i32,
    pub channels: Vec<String>,
    pub invalid_tokens: Vec<String>,
    pub sentinel: f64,
    pub output_dir: PathBuf,
    pub output_stem: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            window_start: NaiveDate::parse_from_str(DEFAULT_WINDOW_START, "%Y-%m-%d").unwrap(),
            window_end: NaiveDate::parse_from_str(DEFAULT_WINDOW_END, "%Y-%m-%d").unwrap(),
            century_offset: DEFAULT_CENTURY_OFFSET,
            channels: DEFAULT_CHANNELS.iter().map(|c| c.to_string()).collect(),
            invalid_tokens: RESERVED_INVALID_TOKENS.iter().map(|t| t.to_string()).collect(),
            sentinel: SENTINEL_UNKNOWN,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_stem: DEFAULT_OUTPUT_STEM.to_string(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_start >= self.window_end {
            return Err(ProcessingError::Config(format!(
                "Window start {} must precede window end {}",
                self.window_start, self.window_end
            )));
        }
        if self.channels.is_empty() {
            return Err(ProcessingError::Config(
                "At least one measurement channel is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of days covered by the window
    pub fn duration(&self) -> usize {
        (self.window_end - self.window_start).num_days() as usize
    }

    /// Day offset of `date` within the window, `None` outside it
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if date < self.window_start || date >= self.window_end {
            return None;
        }
        Some((date - self.window_start).num_days() as usize)
    }

    pub fn date_at(&self, day: usize) -> NaiveDate {
        self.window_start + chrono::Duration::days(day as i64)
    }

    pub fn is_invalid_token(&self, token: &str) -> bool {
        self.invalid_tokens.iter().any(|t| t == token)
    }

    /// Parse a feed date of the form `YY/MM/DD`, applying the century offset
    pub fn parse_feed_date(&self, raw: &str) -> Result<NaiveDate> {
        let mut parts = raw.trim().splitn(3, '/');
        let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d)) => (y, m, d),
            _ => {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Feed date '{}' is not of the form YY/MM/DD",
                    raw
                )))
            }
        };

        let year = year.trim().parse::<i32>().map_err(|_| {
            ProcessingError::InvalidFormat(format!("Invalid year in feed date '{}'", raw))
        })? + self.century_offset;
        let month = month.trim().parse::<u32>().map_err(|_| {
            ProcessingError::InvalidFormat(format!("Invalid month in feed date '{}'", raw))
        })?;
        let day = day.trim().parse::<u32>().map_err(|_| {
            ProcessingError::InvalidFormat(format!("Invalid day in feed date '{}'", raw))
        })?;

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ProcessingError::InvalidFormat(format!("Feed date '{}' is out of range", raw))
        })
    }

    pub fn channel_output_path(&self, channel: &str) -> PathBuf {
        let filename = format!("{}_{}.csv", self.output_stem, sanitize_channel(channel));
        self.output_dir.join(filename)
    }

    pub fn merged_output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.output_stem))
    }
}
