use std::collections::HashSet;
use std::io::Write;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};

use rem_processor::config::GridConfig;
use rem_processor::processors::{ChannelPipeline, GridMerger};
use rem_processor::readers::FeedReader;
use rem_processor::writers::CsvWriter;

fn test_config() -> GridConfig {
    GridConfig {
        window_start: NaiveDate::from_ymd_opt(1986, 4, 27).unwrap(),
        window_end: NaiveDate::from_ymd_opt(1986, 5, 4).unwrap(),
        ..GridConfig::default()
    }
}

fn write_test_feed() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "PAYS,Ville,X,Y,Date,I_131_(Bq/m3),Cs_134_(Bq/m3),Cs_137_(Bq/m3)\n\
         SE,STOCKHOLM,18.06,59.33,86/04/29,4.0,1.0,2.0\n\
         SE,STOCKHOLM,18.06,59.33,86/05/02,6.0,1.0,?\n\
         SE,STOCKHOLM,18.06,59.33,86/05/02,4.0,N,L\n\
         SE,STOCKHOLM,18.06,59.33,86/04/20,9.0,9.0,9.0\n\
         DE,BERLIN,13.40,52.52,86/04/28,?,L,N\n"
    )
    .unwrap();
    file
}

fn run_all_channels(
    config: &GridConfig,
    feed_path: &std::path::Path,
) -> Vec<rem_processor::models::ChannelGrid> {
    let mut feed = FeedReader::new(config.clone()).read_feed(feed_path).unwrap();
    let pipeline = ChannelPipeline::new(config.clone());

    config
        .channels
        .iter()
        .map(|channel| {
            let readings = feed.readings.remove(channel).unwrap_or_default();
            let (grid, _report) = pipeline.run(channel, &feed.stations, &readings).unwrap();
            grid
        })
        .collect()
}

#[test]
fn test_end_to_end_reconstruction() {
    let config = test_config();
    let feed = write_test_feed();

    let grids = run_all_channels(&config, feed.path());

    // Density: every grid covers stations × duration with no sentinel left
    for grid in &grids {
        assert_eq!(grid.row_count(), 2 * 7);
        assert_eq!(grid.sentinel_count(), 0);
    }

    let stockholm = rem_processor::models::Station::new("18.06", "59.33");
    let berlin = rem_processor::models::Station::new("13.40", "52.52");

    // I-131: anchors at day 2 (4.0) and day 5 (6.0 + 4.0 summed), edges zeroed
    assert_eq!(
        grids[0].series(&stockholm).unwrap(),
        &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 0.0]
    );
    // Cs-134: equal anchors 1.0/1.0 get a flat fill, never a ramp
    assert_eq!(
        grids[1].series(&stockholm).unwrap(),
        &[0.0, 0.5, 1.0, 1.0, 1.0, 1.0, 0.0]
    );
    // Cs-137: single anchor ramps down to the zeroed tail
    assert_eq!(
        grids[2].series(&stockholm).unwrap(),
        &[0.0, 1.0, 2.0, 1.5, 1.0, 0.5, 0.0]
    );

    // Berlin only ever reported reserved markers: all-zero everywhere
    for grid in &grids {
        assert_eq!(grid.series(&berlin).unwrap(), &[0.0; 7]);
    }
}

#[test]
fn test_merged_export() {
    let config = test_config();
    let feed = write_test_feed();
    let out = TempDir::new().unwrap();

    let grids = run_all_channels(&config, feed.path());
    let records = GridMerger::new().merge(&grids).unwrap();
    assert_eq!(records.len(), 14);

    let merged_path = out.path().join("cleaned.csv");
    CsvWriter::new()
        .write_merged(&config.channels, &records, &merged_path)
        .unwrap();

    let contents = std::fs::read_to_string(&merged_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "X,Y,date,I_131_(Bq/m3),Cs_134_(Bq/m3),Cs_137_(Bq/m3)");
    assert_eq!(lines.len(), 15);

    // Spot checks: the summed day and a degenerate station day
    assert!(lines.contains(&"18.06,59.33,1986-05-02,10,1,0.5"));
    assert!(lines.contains(&"13.40,52.52,1986-04-27,0,0,0"));

    // Every (station, day) pair appears exactly once
    let mut keys = HashSet::new();
    for line in &lines[1..] {
        let mut fields = line.splitn(4, ',');
        let key = (
            fields.next().unwrap().to_string(),
            fields.next().unwrap().to_string(),
            fields.next().unwrap().to_string(),
        );
        assert!(keys.insert(key), "duplicate station-day row: {line}");
    }
    assert_eq!(keys.len(), 14);

    // No sentinel or invalid marker survives in any cell
    for line in &lines[1..] {
        for cell in line.split(',').skip(3) {
            let value: f64 = cell.parse().unwrap();
            assert!(value >= 0.0, "negative cell in output: {line}");
        }
    }
}

#[test]
fn test_export_is_idempotent() {
    let config = test_config();
    let feed = write_test_feed();
    let out = TempDir::new().unwrap();

    let grids = run_all_channels(&config, feed.path());
    let records = GridMerger::new().merge(&grids).unwrap();

    let writer = CsvWriter::new();
    let first = out.path().join("first.csv");
    let second = out.path().join("second.csv");
    writer.write_merged(&config.channels, &records, &first).unwrap();
    writer.write_merged(&config.channels, &records, &second).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_malformed_feed_value_aborts_with_row_context() {
    let config = test_config();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "X,Y,Date,I_131_(Bq/m3),Cs_134_(Bq/m3),Cs_137_(Bq/m3)\n\
         18.06,59.33,86/04/29,garbled,1.0,2.0\n"
    )
    .unwrap();

    let mut feed = FeedReader::new(config.clone()).read_feed(file.path()).unwrap();
    let pipeline = ChannelPipeline::new(config.clone());

    let channel = &config.channels[0];
    let readings = feed.readings.remove(channel).unwrap();
    let err = pipeline.run(channel, &feed.stations, &readings).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("garbled"));
    assert!(message.contains("(18.06, 59.33)"));
    assert!(message.contains("1986-04-29"));
}
