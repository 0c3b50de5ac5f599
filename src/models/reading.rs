use chrono::NaiveDate;

use crate::models::Station;

/// One raw measurement for a single channel, date already parsed, value
/// still the unvalidated feed token.
#[derive(Debug, Clone)]
pub struct ChannelReading {
    pub station: Station,
    pub date: NaiveDate,
    pub token: String,
}

impl ChannelReading {
    pub fn new(station: Station, date: NaiveDate, token: &str) -> Self {
        Self {
            station,
            date,
            token: token.trim().to_string(),
        }
    }
}
