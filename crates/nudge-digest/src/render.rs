use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{Digest, DueFollowUp};

/// Fixed subject line for every digest. The window mentioned here tracks
/// the default `window_days`; the admin UI shows the same wording.
pub const SUBJECT: &str = "Follow-Up Digest: Overdue & Upcoming (7 days)";

const INTRO: &str = "Here are your follow-ups that are overdue or due within the next 7 days:";
const SIGNATURE: &str = "— Nudge CRM";

fn format_line(item: &DueFollowUp, today: NaiveDate) -> String {
    let status = if item.due < today {
        "OVERDUE".to_string()
    } else {
        format!("Due {}", item.due)
    };
    format!(
        "- {} {} @ {}  [{}]",
        item.record.first_name, item.record.last_name, item.record.company, status
    )
}

/// Partitions the due-set by owner address and renders one digest per
/// owner.
///
/// Within a digest, entries are ordered by ascending due date, ties broken
/// by ascending prospect id. Digests come back sorted by recipient so a
/// run's dispatch order is deterministic. Every input row lands in exactly
/// one digest; nothing is dropped here.
pub fn build_digests(mut due: Vec<DueFollowUp>, today: NaiveDate) -> Vec<Digest> {
    due.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.record.id.cmp(&b.record.id)));

    let mut groups: BTreeMap<String, Vec<DueFollowUp>> = BTreeMap::new();
    for item in due {
        groups
            .entry(item.record.assigned_to_email.clone())
            .or_default()
            .push(item);
    }

    groups
        .into_iter()
        .map(|(recipient, items)| {
            let record_ids = items.iter().map(|i| i.record.id.clone()).collect();
            let lines: Vec<String> = items.iter().map(|i| format_line(i, today)).collect();
            let body = format!("{INTRO}\n\n{}\n\n{SIGNATURE}\n", lines.join("\n"));
            Digest {
                recipient,
                record_ids,
                subject: SUBJECT.to_string(),
                body,
            }
        })
        .collect()
}
