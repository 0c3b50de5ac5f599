use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{ProcessingError, Result};
use crate::models::Station;
use crate::utils::constants::{FEED_COL_X, FEED_COL_Y, OUTPUT_DATE_FORMAT};

#[derive(Debug)]
pub struct GridStatistics {
    pub total_rows: usize,
    pub unique_stations: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub channel_stats: Vec<ChannelStats>,
}

#[derive(Debug)]
pub struct ChannelStats {
    pub channel: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub zero_cells: usize,
}

impl GridStatistics {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Cleaned Grid Summary ===\n");
        summary.push_str(&format!("Rows: {}\n", self.total_rows));
        summary.push_str(&format!("Stations: {}\n", self.unique_stations));
        summary.push_str(&format!(
            "Date range: {} .. {}\n",
            self.date_range.0, self.date_range.1
        ));
        for stats in &self.channel_stats {
            summary.push_str(&format!(
                "{}: min={:.3} max={:.3} mean={:.3} zero-cells={}\n",
                stats.channel, stats.min, stats.max, stats.mean, stats.zero_cells
            ));
        }
        summary
    }
}

/// Summarizes an already-cleaned merged table: row/station counts, date
/// coverage, and per-channel value ranges. Used by the `info` command.
pub struct GridAnalyzer;

impl GridAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_csv(&self, path: &Path) -> Result<GridStatistics> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let expect = |idx: usize, name: &str| -> Result<()> {
            match headers.get(idx) {
                Some(h) if h == name => Ok(()),
                _ => Err(ProcessingError::InvalidFormat(format!(
                    "Expected column '{}' at position {} of {}",
                    name,
                    idx,
                    path.display()
                ))),
            }
        };
        expect(0, FEED_COL_X)?;
        expect(1, FEED_COL_Y)?;
        expect(2, "date")?;

        let channels: Vec<String> = headers.iter().skip(3).map(|h| h.to_string()).collect();
        if channels.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "No channel columns in {}",
                path.display()
            )));
        }

        let mut stations = HashSet::new();
        let mut total_rows = 0usize;
        let mut min_date: Option<NaiveDate> = None;
        let mut max_date: Option<NaiveDate> = None;
        let mut mins = vec![f64::INFINITY; channels.len()];
        let mut maxs = vec![f64::NEG_INFINITY; channels.len()];
        let mut sums = vec![0.0f64; channels.len()];
        let mut zeros = vec![0usize; channels.len()];

        for record in reader.records() {
            let record = record?;
            total_rows += 1;

            stations.insert(Station::new(
                record.get(0).unwrap_or(""),
                record.get(1).unwrap_or(""),
            ));

            let date = NaiveDate::parse_from_str(record.get(2).unwrap_or(""), OUTPUT_DATE_FORMAT)?;
            min_date = Some(min_date.map_or(date, |d| d.min(date)));
            max_date = Some(max_date.map_or(date, |d| d.max(date)));

            for (i, _) in channels.iter().enumerate() {
                let raw = record.get(3 + i).unwrap_or("");
                let value = raw.parse::<f64>().map_err(|_| {
                    ProcessingError::InvalidFormat(format!(
                        "Non-numeric cell '{}' in cleaned table {}",
                        raw,
                        path.display()
                    ))
                })?;
                mins[i] = mins[i].min(value);
                maxs[i] = maxs[i].max(value);
                sums[i] += value;
                if value == 0.0 {
                    zeros[i] += 1;
                }
            }
        }

        let (Some(min_date), Some(max_date)) = (min_date, max_date) else {
            return Err(ProcessingError::InvalidFormat(format!(
                "No rows found in {}",
                path.display()
            )));
        };

        let channel_stats = channels
            .into_iter()
            .enumerate()
            .map(|(i, channel)| ChannelStats {
                channel,
                min: mins[i],
                max: maxs[i],
                mean: sums[i] / total_rows as f64,
                zero_cells: zeros[i],
            })
            .collect();

        Ok(GridStatistics {
            total_rows,
            unique_stations: stations.len(),
            date_range: (min_date, max_date),
            channel_stats,
        })
    }
}

impl Default for GridAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
