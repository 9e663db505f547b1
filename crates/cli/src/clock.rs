//! Wall-clock timestamps in the fixed 14-byte form.
//!
//! The engine never parses a timestamp; it stores and compares them as
//! opaque fixed-width strings. The only contract here is the width.

use time::OffsetDateTime;

/// Source of `YYYYMMDDHHMMSS` timestamp strings.
pub trait Clock {
    /// Current time as a fixed-width digit string of
    /// [`tpcc_core::scale::DATETIME_LEN`] bytes.
    fn timestamp(&self) -> String;
}

/// System UTC clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        let now = OffsetDateTime::now_utc();
        format!(
            "{:04}{:02}{:02}{:02}{:02}{:02}",
            now.year(),
            u8::from(now.month()),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        )
    }
}

/// Clock pinned to one instant; used by tests and benchmarks that need
/// reproducible rows.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpcc_core::scale::DATETIME_LEN;

    #[test]
    fn test_system_clock_width_and_digits() {
        let ts = SystemClock.timestamp();
        assert_eq!(ts.len(), DATETIME_LEN);
        assert!(ts.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_fixed_clock_echoes_its_instant() {
        let clock = FixedClock("20260801120000".to_string());
        assert_eq!(clock.timestamp(), "20260801120000");
        assert_eq!(clock.timestamp().len(), DATETIME_LEN);
    }
}
