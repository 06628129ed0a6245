//! Publishing-cadence time slot resolution.
//!
//! The satellite provider publishes one full-disk frame per cadence interval
//! (10 minutes for Himawari-8), and frames appear on the mirrors some minutes
//! after their nominal capture time. A [`TimeSlot`] is the most recent
//! timestamp that has plausibly already been published: wall-clock time minus
//! a configured safety delay, truncated down to the cadence boundary.

use chrono::{DateTime, Duration, Utc};

/// A cadence-aligned UTC timestamp identifying one published frame.
///
/// For a fixed delay and cadence, slots resolved at increasing wall-clock
/// times are monotonically non-decreasing, and always at or before
/// `now - delay`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use himawall::timeslot::TimeSlot;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 47, 31).unwrap();
/// let slot = TimeSlot::resolve(now, 30, 10);
/// assert_eq!(slot.path_fragment(), "2024/03/01/121000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSlot(DateTime<Utc>);

impl TimeSlot {
    /// Resolve the slot for a given wall-clock time.
    ///
    /// Subtracts `delay_minutes` from `now`, then truncates down to the
    /// nearest `cadence_minutes` boundary (seconds and subseconds zeroed).
    /// No network call is made to verify the frame exists; a too-small delay
    /// surfaces downstream as 404s absorbed by the tile fetcher.
    pub fn resolve(now: DateTime<Utc>, delay_minutes: i64, cadence_minutes: i64) -> Self {
        let cadence_secs = cadence_minutes.max(1) * 60;
        let target = now - Duration::minutes(delay_minutes.max(0));
        let secs = target.timestamp();
        let aligned = secs - secs.rem_euclid(cadence_secs);
        // Always representable: aligned is within cadence_secs of a valid timestamp
        Self(DateTime::from_timestamp(aligned, 0).unwrap_or(target))
    }

    /// Resolve the slot for the current wall-clock time.
    pub fn now(delay_minutes: i64, cadence_minutes: i64) -> Self {
        Self::resolve(Utc::now(), delay_minutes, cadence_minutes)
    }

    /// The underlying UTC timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }

    /// Remote URL path fragment: `YYYY/MM/DD/HHMMSS`.
    pub fn path_fragment(&self) -> String {
        self.0.format("%Y/%m/%d/%H%M%S").to_string()
    }

    /// Filename token: `YYYYMMDDHHMMSS`.
    ///
    /// Lexical order of tokens equals chronological order, which the history
    /// store relies on for eviction.
    pub fn file_token(&self) -> String {
        self.0.format("%Y%m%d%H%M%S").to_string()
    }
}
