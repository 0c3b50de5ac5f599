use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rem_processor::config::GridConfig;
use rem_processor::models::{ChannelReading, Station};
use rem_processor::processors::{ChannelPipeline, GapInterpolator};

// Create sparse synthetic readings: one every third day per station
fn create_test_feed(station_count: usize) -> (GridConfig, Vec<Station>, Vec<ChannelReading>) {
    let config = GridConfig::default();
    let mut stations = Vec::with_capacity(station_count);
    let mut readings = Vec::new();

    for i in 0..station_count {
        let station = Station::new(&format!("{}.5", i), &format!("{}.25", i));
        stations.push(station.clone());

        for day in (0..config.duration()).step_by(3) {
            let date = config.window_start + chrono::Duration::days(day as i64);
            let value = format!("{}", (i % 7) as f64 + day as f64 * 0.1);
            readings.push(ChannelReading::new(station.clone(), date, &value));
        }
    }

    (config, stations, readings)
}

fn benchmark_channel_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_pipeline_by_stations");

    for &size in &[10, 100, 500] {
        let (config, stations, readings) = create_test_feed(size);

        group.bench_with_input(BenchmarkId::new("stations", size), &size, |b, _| {
            b.iter(|| {
                let pipeline = ChannelPipeline::new(config.clone());
                let (grid, report) = pipeline
                    .run("I_131_(Bq/m3)", &stations, &readings)
                    .unwrap();
                black_box((grid.row_count(), report.projected))
            })
        });
    }
    group.finish();
}

fn benchmark_gap_interpolation(c: &mut Criterion) {
    let interpolator = GapInterpolator::new(-1.0);

    // Long series, anchors every tenth cell
    let mut template = vec![-1.0f64; 10_000];
    for (i, cell) in template.iter_mut().enumerate() {
        if i % 10 == 0 {
            *cell = (i % 100) as f64;
        }
    }

    c.bench_function("fill_series_10k", |b| {
        b.iter(|| {
            let mut series = template.clone();
            let fill = interpolator.fill_series(&mut series);
            black_box(fill.filled)
        })
    });
}

fn benchmark_date_parsing(c: &mut Criterion) {
    let config = GridConfig::default();
    let dates = ["86/04/27", "86/05/01", "86/05/15", "86/05/31"];

    c.bench_function("parse_feed_dates", |b| {
        b.iter(|| {
            let mut parsed = 0;
            for raw in &dates {
                if config.parse_feed_date(raw).is_ok() {
                    parsed += 1;
                }
            }
            black_box(parsed)
        })
    });
}

criterion_group!(
    benches,
    benchmark_channel_pipeline,
    benchmark_gap_interpolation,
    benchmark_date_parsing
);
criterion_main!(benches);
