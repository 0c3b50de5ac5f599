use tracing::warn;

use crate::error::{ProcessingError, Result};
use crate::models::ChannelReading;

/// Outcome of classifying one raw value token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenVerdict {
    /// Token parsed to a usable measurement
    Accepted(f64),
    /// Token is one of the reserved invalid markers; skip the reading
    Rejected,
}

/// Classifies raw value tokens. Reserved markers ("?", "L", "N" in the
/// stock feed) are expected and skipped softly with a diagnostic; any
/// other non-numeric token means the feed itself is broken and aborts
/// the channel run.
pub struct ValidationFilter {
    invalid_tokens: Vec<String>,
}

impl ValidationFilter {
    pub fn new(invalid_tokens: Vec<String>) -> Self {
        Self { invalid_tokens }
    }

    pub fn classify(&self, reading: &ChannelReading, channel: &str) -> Result<TokenVerdict> {
        if self.invalid_tokens.iter().any(|t| t == &reading.token) {
            warn!(
                station = %reading.station,
                date = %reading.date,
                channel = channel,
                value = %reading.token,
                "Skipped reading (reserved invalid marker)"
            );
            return Ok(TokenVerdict::Rejected);
        }

        match reading.token.parse::<f64>() {
            Ok(value) => Ok(TokenVerdict::Accepted(value)),
            Err(_) => Err(ProcessingError::MalformedValue {
                station: reading.station.to_string(),
                date: reading.date,
                channel: channel.to_string(),
                token: reading.token.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Station;
    use chrono::NaiveDate;

    fn reading(token: &str) -> ChannelReading {
        ChannelReading::new(
            Station::new("30.09", "51.38"),
            NaiveDate::from_ymd_opt(1986, 4, 30).unwrap(),
            token,
        )
    }

    fn filter() -> ValidationFilter {
        ValidationFilter::new(vec!["?".to_string(), "L".to_string(), "N".to_string()])
    }

    #[test]
    fn test_reserved_markers_are_rejected_softly() {
        let filter = filter();
        for marker in ["?", "L", "N"] {
            let verdict = filter.classify(&reading(marker), "I_131_(Bq/m3)").unwrap();
            assert_eq!(verdict, TokenVerdict::Rejected);
        }
    }

    #[test]
    fn test_numerals_are_accepted() {
        let filter = filter();
        let verdict = filter.classify(&reading("3.5"), "I_131_(Bq/m3)").unwrap();
        assert_eq!(verdict, TokenVerdict::Accepted(3.5));

        let verdict = filter.classify(&reading("0"), "I_131_(Bq/m3)").unwrap();
        assert_eq!(verdict, TokenVerdict::Accepted(0.0));
    }

    #[test]
    fn test_malformed_token_is_a_hard_error() {
        let filter = filter();
        let err = filter.classify(&reading("bogus"), "I_131_(Bq/m3)").unwrap_err();

        match err {
            ProcessingError::MalformedValue { token, channel, .. } => {
                assert_eq!(token, "bogus");
                assert_eq!(channel, "I_131_(Bq/m3)");
            }
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }
}
