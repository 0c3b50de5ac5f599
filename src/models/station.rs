use std::fmt;

use serde::{Deserialize, Serialize};

/// A monitoring station, identified by its coordinate pair exactly as it
/// appears in the feed. The pair is an opaque composite key: downstream
/// consumers look rows up by the verbatim X/Y tokens, so the core never
/// reinterprets them numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Station {
    pub x: String,
    pub y: String,
}

impl Station {
    pub fn new(x: &str, y: &str) -> Self {
        Self {
            x: x.trim().to_string(),
            y: y.trim().to_string(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_identity_is_exact() {
        let a = Station::new("30.09", "51.38");
        let b = Station::new(" 30.09", "51.38 ");
        let c = Station::new("30.090", "51.38");

        assert_eq!(a, b);
        // Textually distinct coordinates are distinct stations,
        // even if numerically equal
        assert_ne!(a, c);
    }

    #[test]
    fn test_station_display() {
        let station = Station::new("30.09", "51.38");
        assert_eq!(station.to_string(), "(30.09, 51.38)");
    }
}
