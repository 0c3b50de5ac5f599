use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use crate::config::GridConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{ChannelReading, Station};
use crate::utils::constants::{FEED_COL_DATE, FEED_COL_X, FEED_COL_Y};

/// The parsed raw feed: distinct stations in first-appearance order plus
/// one reading list per configured channel. Tokens are left unvalidated;
/// classification happens in the channel pipelines.
#[derive(Debug)]
pub struct FeedData {
    pub stations: Vec<Station>,
    pub readings: HashMap<String, Vec<ChannelReading>>,
}

impl FeedData {
    pub fn channel_readings(&self, channel: &str) -> &[ChannelReading] {
        self.readings.get(channel).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Reads the delimited REM feed. Columns are located by header name, so
/// the archive's extra metadata columns (country, town, sampling times)
/// pass through unharmed.
pub struct FeedReader {
    config: GridConfig,
}

impl FeedReader {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn read_feed(&self, path: &Path) -> Result<FeedData> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
        };

        let x_idx = find(FEED_COL_X)?;
        let y_idx = find(FEED_COL_Y)?;
        let date_idx = find(FEED_COL_DATE)?;
        let channel_indices = self
            .config
            .channels
            .iter()
            .map(|c| -> Result<(String, usize)> { Ok((c.clone(), find(c)?)) })
            .collect::<Result<Vec<(String, usize)>>>()?;

        let mut stations = Vec::new();
        let mut seen = HashSet::new();
        let mut readings: HashMap<String, Vec<ChannelReading>> = self
            .config
            .channels
            .iter()
            .map(|c| (c.clone(), Vec::new()))
            .collect();

        for (row, record) in reader.records().enumerate() {
            let record = record?;

            let station = Station::new(
                field(&record, row, x_idx)?,
                field(&record, row, y_idx)?,
            );
            if seen.insert(station.clone()) {
                stations.push(station.clone());
            }

            let date = self.config.parse_feed_date(field(&record, row, date_idx)?)?;

            for (channel, idx) in &channel_indices {
                let reading =
                    ChannelReading::new(station.clone(), date, field(&record, row, *idx)?);
                readings.entry(channel.clone()).or_default().push(reading);
            }
        }

        info!(
            path = %path.display(),
            stations = stations.len(),
            channels = channel_indices.len(),
            "Feed loaded"
        );

        Ok(FeedData { stations, readings })
    }
}

fn field<'r>(record: &'r csv::StringRecord, row: usize, idx: usize) -> Result<&'r str> {
    record.get(idx).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!("Feed row {} is missing column {}", row + 1, idx))
    })
}
