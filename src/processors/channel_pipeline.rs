use tracing::info;

use crate::config::GridConfig;
use crate::error::Result;
use crate::models::{ChannelGrid, ChannelReading, Station};
use crate::processors::{
    Accumulator, GapInterpolator, GridBuilder, Projection, TokenVerdict, ValidationFilter,
};

/// Per-channel processing counters, printed at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct ChannelReport {
    pub channel: String,
    pub readings: usize,
    pub projected: usize,
    pub rejected_tokens: usize,
    pub out_of_window: usize,
    pub unknown_station: usize,
    pub interpolated_cells: usize,
    pub degenerate_series: usize,
}

impl ChannelReport {
    pub fn new(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            ..Self::default()
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("=== Channel {} ===\n", self.channel));
        summary.push_str(&format!("Raw readings: {}\n", self.readings));
        summary.push_str(&format!("Projected onto grid: {}\n", self.projected));
        summary.push_str(&format!(
            "Skipped (invalid marker): {}\n",
            self.rejected_tokens
        ));
        summary.push_str(&format!("Skipped (out of window): {}\n", self.out_of_window));
        summary.push_str(&format!(
            "Skipped (station not on grid): {}\n",
            self.unknown_station
        ));
        summary.push_str(&format!(
            "Gap-filled cells: {}\n",
            self.interpolated_cells
        ));
        summary.push_str(&format!(
            "Stations with no valid reading: {}\n",
            self.degenerate_series
        ));
        summary
    }
}

/// Runs one channel end to end: build the dense grid, project every
/// validated reading, then fill the gaps. Channels are independent; the
/// CLI runs one pipeline per channel and joins the results at export.
pub struct ChannelPipeline {
    config: GridConfig,
}

impl ChannelPipeline {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        channel: &str,
        stations: &[Station],
        readings: &[ChannelReading],
    ) -> Result<(ChannelGrid, ChannelReport)> {
        let filter = ValidationFilter::new(self.config.invalid_tokens.clone());
        let builder = GridBuilder::new(self.config.clone());
        let accumulator = Accumulator::new();

        let mut grid = builder.build(stations, channel);
        let mut report = ChannelReport::new(channel);
        report.readings = readings.len();

        for reading in readings {
            match filter.classify(reading, channel)? {
                TokenVerdict::Rejected => report.rejected_tokens += 1,
                TokenVerdict::Accepted(value) => {
                    match accumulator.project(&mut grid, &reading.station, reading.date, value) {
                        Projection::Applied => report.projected += 1,
                        Projection::OutOfWindow => report.out_of_window += 1,
                        Projection::UnknownStation => report.unknown_station += 1,
                    }
                }
            }
        }

        let interpolator = GapInterpolator::new(self.config.sentinel);
        let stats = interpolator.fill_grid(&mut grid);
        report.interpolated_cells = stats.filled_cells;
        report.degenerate_series = stats.degenerate_series;

        debug_assert_eq!(grid.sentinel_count(), 0);
        info!(
            channel = channel,
            projected = report.projected,
            rejected = report.rejected_tokens,
            filled = report.interpolated_cells,
            "Channel pipeline complete"
        );

        Ok((grid, report))
    }
}
