//! Epoch-second timestamps for record creation and expiry.
//!
//! Timestamps are plain synchronous reads of the wall clock; the only
//! arithmetic the library needs is shifting "now" by whole hours.

use chrono::Utc;

/// Number of seconds in an hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Returns the current wall-clock time as Unix epoch seconds.
///
/// # Examples
///
/// ```
/// use callback_guard::clock::epoch_now;
///
/// assert!(epoch_now() > 0);
/// ```
#[must_use]
pub fn epoch_now() -> i64 {
    Utc::now().timestamp()
}

/// Returns the current time shifted by `hours` whole hours, as epoch seconds.
///
/// `hours` may be positive, negative, or zero; a zero offset equals
/// [`epoch_now`].
///
/// # Examples
///
/// ```
/// use callback_guard::clock::{epoch_now, epoch_now_offset_hours};
///
/// let now = epoch_now();
/// let in_a_day = epoch_now_offset_hours(24);
/// assert!(in_a_day - now >= 24 * 3600);
/// ```
#[must_use]
pub fn epoch_now_offset_hours(hours: i64) -> i64 {
    epoch_now() + hours * SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_offset_equals_now() {
        let before = epoch_now();
        let offset = epoch_now_offset_hours(0);
        let after = epoch_now();
        assert!(offset >= before);
        assert!(offset <= after);
    }

    #[test]
    fn test_positive_offset() {
        let now = epoch_now();
        let later = epoch_now_offset_hours(24 * 7);
        // The two reads may straddle a second boundary.
        let delta = later - now;
        assert!(delta >= 7 * 24 * SECONDS_PER_HOUR);
        assert!(delta <= 7 * 24 * SECONDS_PER_HOUR + 1);
    }

    #[test]
    fn test_negative_offset() {
        let now = epoch_now();
        let earlier = epoch_now_offset_hours(-1);
        let delta = now - earlier;
        assert!(delta >= SECONDS_PER_HOUR - 1);
        assert!(delta <= SECONDS_PER_HOUR + 1);
    }
}
