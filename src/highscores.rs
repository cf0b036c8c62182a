//! High score record
//!
//! One record per game variant: the points, the level reached and the day
//! the score was set. Storage lives in [`crate::persistence`].

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A high score record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub points: u32,
    /// Level reached when the score was set
    pub level: u32,
    /// Unix timestamp (seconds) when the record was set
    #[serde(default)]
    pub date: Option<u64>,
}

impl Score {
    /// Undated record
    pub fn new(points: u32, level: u32) -> Self {
        Self {
            points,
            level,
            date: None,
        }
    }

    pub fn with_date(mut self, timestamp: u64) -> Self {
        self.date = Some(timestamp);
        self
    }

    /// Stamp the record with the current system time (if available)
    pub fn dated_now(mut self) -> Self {
        self.date = now_timestamp();
        self
    }

    /// Whether this score replaces `record`
    pub fn beats(&self, record: &Score) -> bool {
        self.points > record.points
    }
}

fn now_timestamp() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// Format a record date as `YYYY-MM-DD` (UTC)
pub fn format_date(date: Option<u64>) -> String {
    let Some(timestamp) = date else {
        return "N/A".to_string();
    };
    let (year, month, day) = civil_from_days((timestamp / 86_400) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Days since 1970-01-01 to a proleptic Gregorian date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_requires_more_points() {
        let record = Score::new(5000, 3);
        assert!(Score::new(5010, 1).beats(&record));
        assert!(!Score::new(5000, 9).beats(&record));
        assert!(Score::new(10, 1).beats(&Score::default()));
        assert!(!Score::default().beats(&Score::default()));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some(0)), "1970-01-01");
        assert_eq!(format_date(Some(1_700_000_000)), "2023-11-14");
        // Leap day
        assert_eq!(format_date(Some(951_782_400)), "2000-02-29");
    }

    #[test]
    fn test_dated_now_sets_date() {
        let score = Score::new(100, 1).dated_now();
        assert!(score.date.is_some());
        assert_eq!(score.points, 100);
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(Score::new(1230, 2).with_date(60)).unwrap();
        assert_eq!(json["points"], 1230);
        assert_eq!(json["level"], 2);
        assert_eq!(json["date"], 60);
        let old: Score = serde_json::from_str(r#"{"points":7,"level":1}"#).unwrap();
        assert_eq!(old.date, None);
    }
}
