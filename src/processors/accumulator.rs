use chrono::NaiveDate;
use tracing::warn;

use crate::models::{ChannelGrid, Station};

/// What happened to one projected reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The value landed on the grid (set or summed)
    Applied,
    /// Reading dated outside the window; dropped
    OutOfWindow,
    /// Station has no row on the grid; dropped
    UnknownStation,
}

/// Projects validated readings onto a channel grid. Multiple readings for
/// the same (station, day) sum; the first one moves the cell off the
/// sentinel. Out-of-window and off-grid readings are dropped with a log
/// line, never an error: the feed legitimately references dates and
/// stations the window does not cover.
#[derive(Debug, Default)]
pub struct Accumulator;

impl Accumulator {
    pub fn new() -> Self {
        Self
    }

    pub fn project(
        &self,
        grid: &mut ChannelGrid,
        station: &Station,
        date: NaiveDate,
        value: f64,
    ) -> Projection {
        let Some(day) = grid.day_index(date) else {
            warn!(
                station = %station,
                date = %date,
                channel = grid.channel(),
                value = value,
                "Skipped reading (out of date range)"
            );
            return Projection::OutOfWindow;
        };

        if !grid.contains_station(station) {
            warn!(
                station = %station,
                date = %date,
                channel = grid.channel(),
                value = value,
                "Skipped reading (station not on grid)"
            );
            return Projection::UnknownStation;
        }

        let sentinel = grid.sentinel();
        if let Some(cell) = grid.cell_mut(station, day) {
            if *cell == sentinel {
                *cell = value;
            } else {
                *cell += value;
            }
        }
        Projection::Applied
    }
}
