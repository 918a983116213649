use chrono::{NaiveDate, Utc, Weekday};
use nudge_common::types::{FollowUpRecord, Frequency};

use crate::gate::{should_run, DEFAULT_ANCHOR};
use crate::render::{build_digests, SUBJECT};
use crate::select::select_due;

// 2026-03-02 is a Monday.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn rec(id: &str, email: &str, follow_up: Option<&str>, last_reminded: Option<&str>) -> FollowUpRecord {
    let now = Utc::now();
    FollowUpRecord {
        id: id.to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        company: "Eckert-Mauchly".to_string(),
        assigned_to_email: email.to_string(),
        follow_up_date: follow_up.map(|s| s.to_string()),
        last_reminded_on: last_reminded.map(|s| s.to_string()),
        created_at: now,
        updated_at: now,
    }
}

// ── Frequency gate ──

#[test]
fn gate_off_never_runs() {
    for offset in 0..7 {
        let day = today() + chrono::Duration::days(offset);
        assert!(!should_run(Frequency::Off, day, DEFAULT_ANCHOR));
    }
}

#[test]
fn gate_daily_always_runs() {
    for offset in 0..7 {
        let day = today() + chrono::Duration::days(offset);
        assert!(should_run(Frequency::Daily, day, DEFAULT_ANCHOR));
    }
}

#[test]
fn gate_weekly_runs_only_on_anchor_day() {
    let monday = today();
    assert!(should_run(Frequency::Weekly, monday, DEFAULT_ANCHOR));
    for offset in 1..7 {
        let day = monday + chrono::Duration::days(offset);
        assert!(!should_run(Frequency::Weekly, day, DEFAULT_ANCHOR));
    }
}

#[test]
fn gate_weekly_respects_configured_anchor() {
    let wednesday = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    assert!(should_run(Frequency::Weekly, wednesday, Weekday::Wed));
    assert!(!should_run(Frequency::Weekly, wednesday, DEFAULT_ANCHOR));
}

// ── Due-set selector ──

#[test]
fn selector_includes_overdue_and_window() {
    let records = vec![
        rec("p-1", "a@x.com", Some("2026-02-28"), None), // overdue
        rec("p-2", "a@x.com", Some("2026-03-02"), None), // due today
        rec("p-3", "a@x.com", Some("2026-03-09"), None), // window boundary (today + 7)
        rec("p-4", "a@x.com", Some("2026-03-12"), None), // outside window (today + 10)
    ];
    let due = select_due(records, today(), 7);
    let ids: Vec<&str> = due.iter().map(|d| d.record.id.as_str()).collect();
    assert_eq!(ids, vec!["p-1", "p-2", "p-3"]);
}

#[test]
fn selector_never_expires_overdue_rows() {
    let records = vec![rec("p-1", "a@x.com", Some("2020-01-01"), None)];
    let due = select_due(records, today(), 7);
    assert_eq!(due.len(), 1);
}

#[test]
fn selector_suppresses_rows_reminded_today() {
    let records = vec![
        rec("p-1", "a@x.com", Some("2026-02-20"), Some("2026-03-02")),
        rec("p-2", "a@x.com", Some("2026-02-20"), Some("2026-03-01")),
        rec("p-3", "a@x.com", Some("2026-02-20"), None),
    ];
    let due = select_due(records, today(), 7);
    let ids: Vec<&str> = due.iter().map(|d| d.record.id.as_str()).collect();
    assert_eq!(ids, vec!["p-2", "p-3"]);
}

#[test]
fn selector_drops_rows_without_owner() {
    let records = vec![
        rec("p-1", "", Some("2026-03-02"), None),
        rec("p-2", "   ", Some("2026-03-02"), None),
        rec("p-3", "a@x.com", Some("2026-03-02"), None),
    ];
    let due = select_due(records, today(), 7);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].record.id, "p-3");
}

#[test]
fn selector_warns_and_skips_malformed_dates() {
    let records = vec![
        rec("p-1", "a@x.com", Some("soon"), None),
        rec("p-2", "a@x.com", Some("2026-13-40"), None),
        rec("p-3", "a@x.com", None, None),
        rec("p-4", "a@x.com", Some("2026-03-02"), None),
    ];
    let due = select_due(records, today(), 7);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].record.id, "p-4");
}

#[test]
fn selector_treats_malformed_last_reminded_as_absent() {
    let records = vec![rec("p-1", "a@x.com", Some("2026-03-02"), Some("yesterday"))];
    let due = select_due(records, today(), 7);
    assert_eq!(due.len(), 1);
}

// ── Digest grouper ──

#[test]
fn digests_group_by_owner_with_every_row_exactly_once() {
    let records = vec![
        rec("p-1", "a@x.com", Some("2026-03-01"), None),
        rec("p-2", "b@x.com", Some("2026-03-02"), None),
        rec("p-3", "a@x.com", Some("2026-03-04"), None),
    ];
    let due = select_due(records, today(), 7);
    let digests = build_digests(due, today());

    assert_eq!(digests.len(), 2);
    // Sorted by recipient
    assert_eq!(digests[0].recipient, "a@x.com");
    assert_eq!(digests[1].recipient, "b@x.com");

    let mut all_ids: Vec<String> = digests.iter().flat_map(|d| d.record_ids.clone()).collect();
    all_ids.sort();
    assert_eq!(all_ids, vec!["p-1", "p-2", "p-3"]);
}

#[test]
fn digest_orders_by_due_date_then_id() {
    let records = vec![
        rec("p-9", "a@x.com", Some("2026-03-03"), None),
        rec("p-2", "a@x.com", Some("2026-03-03"), None),
        rec("p-5", "a@x.com", Some("2026-03-01"), None),
    ];
    let due = select_due(records, today(), 7);
    let digests = build_digests(due, today());

    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0].record_ids, vec!["p-5", "p-2", "p-9"]);
}

#[test]
fn digest_renders_overdue_and_due_tags() {
    let records = vec![
        rec("p-1", "a@x.com", Some("2026-02-28"), None),
        rec("p-2", "a@x.com", Some("2026-03-05"), None),
    ];
    let due = select_due(records, today(), 7);
    let digests = build_digests(due, today());

    let body = &digests[0].body;
    assert!(body.contains("- Grace Hopper @ Eckert-Mauchly  [OVERDUE]"));
    assert!(body.contains("- Grace Hopper @ Eckert-Mauchly  [Due 2026-03-05]"));
    assert!(body.starts_with("Here are your follow-ups"));
    assert!(body.trim_end().ends_with("— Nudge CRM"));
    assert_eq!(digests[0].subject, SUBJECT);
}

#[test]
fn same_owner_due_today_and_in_three_days_is_one_digest_today_first() {
    let records = vec![
        rec("p-2", "a@x.com", Some("2026-03-05"), None),
        rec("p-1", "a@x.com", Some("2026-03-02"), None),
    ];
    let due = select_due(records, today(), 7);
    let digests = build_digests(due, today());

    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0].record_ids, vec!["p-1", "p-2"]);
    let lines: Vec<&str> = digests[0]
        .body
        .lines()
        .filter(|l| l.starts_with("- "))
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[Due 2026-03-02]"));
    assert!(lines[1].contains("[Due 2026-03-05]"));
}

#[test]
fn overdue_scenario_renders_and_selects() {
    // {id: 1, due: today-2, owner: a@x.com, last_reminded: null}
    let records = vec![rec("1", "a@x.com", Some("2026-02-28"), None)];
    let due = select_due(records, today(), 7);
    assert_eq!(due.len(), 1);

    let digests = build_digests(due, today());
    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0].recipient, "a@x.com");
    assert_eq!(digests[0].record_ids, vec!["1"]);
    assert!(digests[0].body.contains("[OVERDUE]"));
}

#[test]
fn empty_due_set_builds_no_digests() {
    let digests = build_digests(Vec::new(), today());
    assert!(digests.is_empty());
}
