//! The `HH:MM` cutoff embedded in a QR code's scan URL.
//!
//! A label only carries a wall-clock minute, so it is resolved against the
//! current time: a label can point at most one validity window ahead, and
//! otherwise refers to the most recent occurrence of that minute. This keeps
//! labels issued just before midnight valid just after it.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

const LABEL_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryLabel(NaiveTime);

impl ExpiryLabel {
    /// Label for `now + validity`, truncated to the minute.
    pub fn after(now: NaiveDateTime, validity: Duration) -> Self {
        let time = (now + validity).time();
        Self(
            time.with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(time),
        )
    }

    /// The label stays valid through the whole of its minute, so a scan at
    /// 10:02:59 is accepted for `10:02` and rejected from 10:03:00.
    ///
    /// `validity` bounds how far ahead of `now` a label may point; anything
    /// further ahead is taken as an earlier occurrence that has passed.
    pub fn is_expired_at(&self, now: NaiveDateTime, validity: Duration) -> bool {
        now >= self.deadline(now, validity) + Duration::minutes(1)
    }

    /// Latest occurrence of the label's minute no later than `now + validity`.
    fn deadline(&self, now: NaiveDateTime, validity: Duration) -> NaiveDateTime {
        let horizon = now + validity;
        let same_day = now.date().and_time(self.0);
        let next_day = same_day + Duration::days(1);

        if next_day <= horizon {
            next_day
        } else if same_day <= horizon {
            same_day
        } else {
            same_day - Duration::days(1)
        }
    }
}

impl fmt::Display for ExpiryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LABEL_FORMAT))
    }
}

impl FromStr for ExpiryLabel {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), LABEL_FORMAT).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn label(s: &str) -> ExpiryLabel {
        s.parse().unwrap()
    }

    fn ttl() -> Duration {
        Duration::minutes(2)
    }

    #[test]
    fn issued_label_is_truncated_to_the_minute() {
        let issued = ExpiryLabel::after(at(10, 0, 45), Duration::minutes(2));
        assert_eq!(issued.to_string(), "10:02");
    }

    #[test]
    fn valid_until_the_end_of_the_labelled_minute() {
        let exp = label("10:02");
        assert!(!exp.is_expired_at(at(10, 0, 45), ttl()));
        assert!(!exp.is_expired_at(at(10, 2, 0), ttl()));
        assert!(!exp.is_expired_at(at(10, 2, 59), ttl()));
        assert!(exp.is_expired_at(at(10, 3, 0), ttl()));
        assert!(exp.is_expired_at(at(11, 30, 0), ttl()));
    }

    #[test]
    fn label_issued_before_midnight_expires_after_it() {
        let exp = label("23:59");
        assert!(!exp.is_expired_at(at(23, 58, 10), ttl()));
        assert!(exp.is_expired_at(at(0, 1, 0), ttl()));
    }

    #[test]
    fn label_past_midnight_is_still_valid_late_in_the_day() {
        let issued = ExpiryLabel::after(at(23, 59, 30), Duration::minutes(2));
        assert_eq!(issued.to_string(), "00:01");
        assert!(!issued.is_expired_at(at(23, 59, 30), ttl()));
    }

    #[test]
    fn label_from_earlier_in_the_day_stays_expired() {
        // Twelve hours later the same wall-clock minute must not come back to life
        assert!(label("08:02").is_expired_at(at(20, 5, 0), ttl()));
        assert!(label("08:02").is_expired_at(at(20, 2, 30), ttl()));
        assert!(label("09:00").is_expired_at(at(20, 0, 0), ttl()));
        assert!(label("21:30").is_expired_at(at(10, 0, 0), ttl()));
    }

    #[test]
    fn label_beyond_the_validity_window_is_in_the_past() {
        assert!(label("10:10").is_expired_at(at(10, 0, 0), ttl()));
        assert!(!label("10:10").is_expired_at(at(10, 0, 0), Duration::minutes(15)));
    }

    #[test]
    fn malformed_labels_are_rejected() {
        assert!("".parse::<ExpiryLabel>().is_err());
        assert!("25:00".parse::<ExpiryLabel>().is_err());
        assert!("noon".parse::<ExpiryLabel>().is_err());
        assert_eq!(label(" 09:05 ").to_string(), "09:05");
    }
}
