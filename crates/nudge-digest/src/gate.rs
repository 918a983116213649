use chrono::{Datelike, NaiveDate, Weekday};
use nudge_common::types::Frequency;

/// Weekday on which weekly-frequency runs fire (the anchor day).
pub const DEFAULT_ANCHOR: Weekday = Weekday::Mon;

/// Decides whether today's invocation should proceed at all.
///
/// Pure and side-effect free; the caller runs this before touching the
/// prospect table so that skipped days stay idempotent no-ops.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use nudge_common::types::Frequency;
/// use nudge_digest::gate::should_run;
///
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
///
/// assert!(should_run(Frequency::Daily, tuesday, Weekday::Mon));
/// assert!(should_run(Frequency::Weekly, monday, Weekday::Mon));
/// assert!(!should_run(Frequency::Weekly, tuesday, Weekday::Mon));
/// assert!(!should_run(Frequency::Off, monday, Weekday::Mon));
/// ```
pub fn should_run(frequency: Frequency, today: NaiveDate, anchor: Weekday) -> bool {
    match frequency {
        Frequency::Off => false,
        Frequency::Weekly => today.weekday() == anchor,
        Frequency::Daily => true,
    }
}
