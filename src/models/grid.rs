use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::Station;

/// Dense station × day grid for a single measurement channel.
///
/// Cells are laid out row-major per station: station `s` owns the slice
/// `[s * duration, (s + 1) * duration)`, ordered by day offset from the
/// window start. Every station's series therefore is a disjoint slice,
/// which is what lets interpolation run per-station in parallel.
#[derive(Debug, Clone)]
pub struct ChannelGrid {
    channel: String,
    stations: Vec<Station>,
    station_index: HashMap<Station, usize>,
    window_start: NaiveDate,
    duration: usize,
    sentinel: f64,
    values: Vec<f64>,
}

impl ChannelGrid {
    pub fn new(
        channel: &str,
        stations: Vec<Station>,
        window_start: NaiveDate,
        duration: usize,
        sentinel: f64,
    ) -> Self {
        let station_index = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        let values = vec![sentinel; stations.len() * duration];

        Self {
            channel: channel.to_string(),
            stations,
            station_index,
            window_start,
            duration,
            sentinel,
            values,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn duration(&self) -> usize {
        self.duration
    }

    pub fn sentinel(&self) -> f64 {
        self.sentinel
    }

    pub fn row_count(&self) -> usize {
        self.stations.len() * self.duration
    }

    pub fn is_unknown(&self, value: f64) -> bool {
        value == self.sentinel
    }

    /// Day offset of `date` within this grid's window, `None` outside it
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.window_start).num_days();
        if offset < 0 || offset >= self.duration as i64 {
            return None;
        }
        Some(offset as usize)
    }

    pub fn date_at(&self, day: usize) -> NaiveDate {
        self.window_start + chrono::Duration::days(day as i64)
    }

    pub fn contains_station(&self, station: &Station) -> bool {
        self.station_index.contains_key(station)
    }

    pub fn get(&self, station: &Station, day: usize) -> Option<f64> {
        let base = self.station_index.get(station)?;
        self.values.get(base * self.duration + day).copied()
    }

    pub fn cell_mut(&mut self, station: &Station, day: usize) -> Option<&mut f64> {
        if day >= self.duration {
            return None;
        }
        let base = *self.station_index.get(station)?;
        self.values.get_mut(base * self.duration + day)
    }

    /// A station's full day-ordered series
    pub fn series(&self, station: &Station) -> Option<&[f64]> {
        let base = self.station_index.get(station)?;
        let start = base * self.duration;
        Some(&self.values[start..start + self.duration])
    }

    pub fn sentinel_count(&self) -> usize {
        let sentinel = self.sentinel;
        self.values.iter().filter(|&&v| v == sentinel).count()
    }

    /// Whether `other` was built over the identical key sequence: same
    /// station order, window start, and duration. Grids that agree here
    /// are joinable row-for-row.
    pub fn is_aligned_with(&self, other: &ChannelGrid) -> bool {
        self.window_start == other.window_start
            && self.duration == other.duration
            && self.stations == other.stations
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}
