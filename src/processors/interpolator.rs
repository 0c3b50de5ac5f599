use rayon::prelude::*;
use tracing::debug;

use crate::models::ChannelGrid;

/// Result of filling one station's series.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesFill {
    /// Cells that were moved off the sentinel
    pub filled: usize,
    /// Series had no known value at all and was zero-filled wholesale
    pub degenerate: bool,
}

/// Aggregate over all stations of a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpolationStats {
    pub filled_cells: usize,
    pub degenerate_series: usize,
}

/// Fills sentinel runs in a station's day-ordered series by
/// piecewise-linear interpolation between the nearest known anchors.
///
/// Policy, in order:
/// - a series with no known value anywhere becomes all zeros;
/// - an unknown first or last element is zeroed before interpolation
///   (concentration is taken to be zero just outside the window);
/// - each interior run `(i, j)` between anchors is filled half-open: the
///   anchors keep their values, interpolated cells get
///   `series[i] + (k - i) * (series[j] - series[i]) / (j - i)`;
/// - equal anchors get a constant fill instead of a ramp, so a zero-length
///   step can never produce NaN.
///
/// One linear pass resolves every run; after the boundary step each
/// unknown run is bracketed by known anchors, so no rescans are needed.
pub struct GapInterpolator {
    sentinel: f64,
}

impl GapInterpolator {
    pub fn new(sentinel: f64) -> Self {
        Self { sentinel }
    }

    pub fn fill_series(&self, series: &mut [f64]) -> SeriesFill {
        if series.is_empty() {
            return SeriesFill::default();
        }

        let sentinel = self.sentinel;
        if series.iter().all(|&v| v == sentinel) {
            for v in series.iter_mut() {
                *v = 0.0;
            }
            return SeriesFill {
                filled: series.len(),
                degenerate: true,
            };
        }

        let mut filled = 0;
        let last = series.len() - 1;
        if series[0] == sentinel {
            series[0] = 0.0;
            filled += 1;
        }
        if series[last] == sentinel {
            series[last] = 0.0;
            filled += 1;
        }

        let mut anchor = 0;
        for i in 1..series.len() {
            if series[i] == sentinel {
                continue;
            }
            if i > anchor + 1 {
                let (lo, hi) = (series[anchor], series[i]);
                if lo == hi {
                    for cell in &mut series[anchor + 1..i] {
                        *cell = lo;
                    }
                } else {
                    let step = (hi - lo) / (i - anchor) as f64;
                    for k in anchor + 1..i {
                        series[k] = lo + (k - anchor) as f64 * step;
                    }
                }
                filled += i - anchor - 1;
            }
            anchor = i;
        }

        SeriesFill {
            filled,
            degenerate: false,
        }
    }

    /// Fill every station's series of `grid`. Station slices are disjoint,
    /// so they run in parallel; accumulation must already be complete.
    pub fn fill_grid(&self, grid: &mut ChannelGrid) -> InterpolationStats {
        let duration = grid.duration();
        if duration == 0 {
            return InterpolationStats::default();
        }

        let fills: Vec<SeriesFill> = grid
            .values_mut()
            .par_chunks_mut(duration)
            .map(|series| self.fill_series(series))
            .collect();

        let stats = fills.iter().fold(InterpolationStats::default(), |mut acc, f| {
            acc.filled_cells += f.filled;
            acc.degenerate_series += f.degenerate as usize;
            acc
        });

        debug!(
            channel = grid.channel(),
            filled_cells = stats.filled_cells,
            degenerate_series = stats.degenerate_series,
            "Gap interpolation complete"
        );
        stats
    }
}
