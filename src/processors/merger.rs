use chrono::NaiveDate;

use crate::error::{ProcessingError, Result};
use crate::models::{ChannelGrid, Station};

/// One row of the joined output table: a station-day with one value per
/// channel, channels in the order the grids were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub station: Station,
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

/// Joins independently reconstructed channel grids into one wide table.
///
/// Grids built from the same config and station sequence are always
/// joinable; divergence means a bug upstream and is reported as a hard
/// schema mismatch rather than silently truncated or reordered.
pub struct GridMerger;

impl GridMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(&self, grids: &[ChannelGrid]) -> Result<Vec<MergedRecord>> {
        let Some(first) = grids.first() else {
            return Err(ProcessingError::SchemaMismatch(
                "no channel grids to merge".to_string(),
            ));
        };

        for grid in &grids[1..] {
            if !first.is_aligned_with(grid) {
                return Err(ProcessingError::SchemaMismatch(format!(
                    "channel '{}' diverges from '{}' in station set or window",
                    grid.channel(),
                    first.channel()
                )));
            }
        }

        let mut records = Vec::with_capacity(first.row_count());
        for station in first.stations() {
            for day in 0..first.duration() {
                let values = grids
                    .iter()
                    .map(|g| {
                        g.get(station, day).ok_or_else(|| {
                            ProcessingError::SchemaMismatch(format!(
                                "channel '{}' has no cell for station {} day {}",
                                g.channel(),
                                station,
                                day
                            ))
                        })
                    })
                    .collect::<Result<Vec<f64>>>()?;

                records.push(MergedRecord {
                    station: station.clone(),
                    date: first.date_at(day),
                    values,
                });
            }
        }

        Ok(records)
    }
}

impl Default for GridMerger {
    fn default() -> Self {
        Self::new()
    }
}
