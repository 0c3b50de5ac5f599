/// Measurement channel column names as they appear in the REM feed
pub const CHANNEL_I131: &str = "I_131_(Bq/m3)";
pub const CHANNEL_CS134: &str = "Cs_134_(Bq/m3)";
pub const CHANNEL_CS137: &str = "Cs_137_(Bq/m3)";

pub const DEFAULT_CHANNELS: [&str; 3] = [CHANNEL_I131, CHANNEL_CS134, CHANNEL_CS137];

/// Feed header columns holding station identity and reading date
pub const FEED_COL_X: &str = "X";
pub const FEED_COL_Y: &str = "Y";
pub const FEED_COL_DATE: &str = "Date";

/// Reserved markers the feed uses for unusable readings
pub const RESERVED_INVALID_TOKENS: [&str; 3] = ["?", "L", "N"];

/// Grid cell placeholder for "no reading yet"; legitimate
/// concentrations are non-negative
pub const SENTINEL_UNKNOWN: f64 = -1.0;

/// Observation window defaults, closed-open
pub const DEFAULT_WINDOW_START: &str = "1986-04-27";
pub const DEFAULT_WINDOW_END: &str = "1986-06-01";

/// Feed dates carry two-digit years
pub const DEFAULT_CENTURY_OFFSET: i32 = 1900;

/// Output conventions
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_STEM: &str = "cleaned";
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";
