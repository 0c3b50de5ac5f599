use std::path::Path;

use crate::error::Result;
use crate::models::ChannelGrid;
use crate::processors::MergedRecord;
use crate::utils::constants::{FEED_COL_X, FEED_COL_Y, OUTPUT_DATE_FORMAT};

/// Writes reconstructed grids as delimited tables: one intermediate file
/// per channel and the merged wide table the visualization side consumes.
/// Output is a pure function of grid state, so rewriting identical grids
/// produces byte-identical files.
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write one channel's dense grid as `[X, Y, date, <channel>]`
    pub fn write_channel_grid(&self, grid: &ChannelGrid, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        writer.write_record([FEED_COL_X, FEED_COL_Y, "date", grid.channel()])?;

        for station in grid.stations() {
            for day in 0..grid.duration() {
                let value = grid.get(station, day).unwrap_or(grid.sentinel());
                let date = grid.date_at(day).format(OUTPUT_DATE_FORMAT).to_string();
                let cell = format_value(value);
                writer.write_record([
                    station.x.as_str(),
                    station.y.as_str(),
                    date.as_str(),
                    cell.as_str(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Write the joined table as `[X, Y, date, <channel₁>, <channel₂>, …]`
    pub fn write_merged(
        &self,
        channels: &[String],
        records: &[MergedRecord],
        path: &Path,
    ) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        let mut header = vec![FEED_COL_X.to_string(), FEED_COL_Y.to_string(), "date".to_string()];
        header.extend(channels.iter().cloned());
        writer.write_record(&header)?;

        for record in records {
            let mut row = vec![
                record.station.x.clone(),
                record.station.y.clone(),
                record.date.format(OUTPUT_DATE_FORMAT).to_string(),
            ];
            row.extend(record.values.iter().map(|v| format_value(*v)));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(value: f64) -> String {
    value.to_string()
}
