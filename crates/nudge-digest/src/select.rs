use chrono::{Duration, NaiveDate};
use nudge_common::types::FollowUpRecord;

use crate::DueFollowUp;

/// Parse an ISO `YYYY-MM-DD` date column. The table is also populated by
/// CSV imports, so values are not trusted.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Filters candidate rows down to the due-set for the current run.
///
/// A row survives iff all of:
/// - its follow-up date parses and is `<= today + window_days` (overdue
///   rows never age out; they only leave the set once notified today),
/// - it was not already notified today (`last_reminded_on != today`),
/// - it has a non-empty owner address.
///
/// Rows with an unparseable follow-up date are logged at `warn` and
/// dropped without aborting the run. A malformed `last_reminded_on` is
/// treated as "never notified" so it can never suppress a reminder.
pub fn select_due(
    records: Vec<FollowUpRecord>,
    today: NaiveDate,
    window_days: i64,
) -> Vec<DueFollowUp> {
    let window_end = today + Duration::days(window_days);
    let mut due = Vec::new();

    for record in records {
        let raw = match record.follow_up_date.as_deref() {
            Some(raw) => raw,
            None => continue,
        };
        let due_date = match parse_date(raw) {
            Some(d) => d,
            None => {
                tracing::warn!(
                    prospect_id = %record.id,
                    follow_up_date = %raw,
                    "Skipping prospect with unparseable follow-up date"
                );
                continue;
            }
        };

        if due_date > window_end {
            continue;
        }

        let reminded_today = record
            .last_reminded_on
            .as_deref()
            .and_then(parse_date)
            .is_some_and(|d| d == today);
        if reminded_today {
            tracing::debug!(prospect_id = %record.id, "Already reminded today, suppressing");
            continue;
        }

        if record.assigned_to_email.trim().is_empty() {
            tracing::debug!(prospect_id = %record.id, "No owner address, skipping");
            continue;
        }

        due.push(DueFollowUp {
            due: due_date,
            record,
        });
    }

    due
}
