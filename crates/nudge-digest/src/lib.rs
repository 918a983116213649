//! Core reminder logic: frequency gating, due-set selection, and digest
//! rendering.
//!
//! Everything in this crate is pure and synchronous. The job binary feeds
//! in rows read from storage and sends out the digests this crate builds;
//! no I/O happens here, which is what makes the selection rules unit
//! testable against the calendar.

pub mod gate;
pub mod render;
pub mod select;

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use nudge_common::types::FollowUpRecord;

/// A prospect that passed selection, with its follow-up date parsed.
#[derive(Debug, Clone)]
pub struct DueFollowUp {
    pub record: FollowUpRecord,
    pub due: NaiveDate,
}

/// One rendered reminder email for a single recipient, covering all of
/// that recipient's due and overdue follow-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub recipient: String,
    /// Ids of every prospect included in the body, in body order. These
    /// are the ids stamped with `last_reminded_on` after a successful send.
    pub record_ids: Vec<String>,
    pub subject: String,
    pub body: String,
}
