use std::time::Instant;

use anyhow::Result;
use chrono::{NaiveDate, Weekday};

use nudge_common::types::Frequency;
use nudge_digest::{gate, render, select};
use nudge_notify::MessageTransport;
use nudge_storage::store::NewReminderLog;
use nudge_storage::CrmStore;

/// Per-run inputs, fixed at run start. The frequency setting is read once
/// and never re-read mid-run so a run's behavior stays deterministic.
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    pub today: NaiveDate,
    pub window_days: i64,
    pub anchor: Weekday,
}

/// Terminal state of a single run.
///
/// All three variants are successful exits; fatal conditions (unreachable
/// repository, failed suppression write) surface as `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The frequency gate rejected today's invocation.
    Skipped { frequency: Frequency },
    /// The due-set was empty after filtering.
    NothingToDo,
    /// Digests were dispatched; failed recipients stay eligible next run.
    Completed { sent: usize, failed: usize },
}

/// Executes one reminder run: gate → select → group → dispatch → suppress.
///
/// A transport failure for one recipient never aborts the others; only
/// records belonging to successfully sent digests are stamped with
/// `last_reminded_on`. Dispatch and suppression are not atomic: a crash
/// between them can produce one duplicate digest on the next run.
pub async fn run(
    store: &CrmStore,
    transport: &dyn MessageTransport,
    params: &RunParams,
) -> Result<RunOutcome> {
    let frequency = store.get_reminder_frequency().await?;
    if !gate::should_run(frequency, params.today, params.anchor) {
        tracing::info!(frequency = %frequency, "Reminder run gated off for today");
        return Ok(RunOutcome::Skipped { frequency });
    }
    tracing::info!(frequency = %frequency, today = %params.today, "Selecting follow-ups");

    let candidates = store.list_follow_up_candidates().await?;
    let due = select::select_due(candidates, params.today, params.window_days);
    if due.is_empty() {
        tracing::info!("No due or overdue follow-ups");
        return Ok(RunOutcome::NothingToDo);
    }

    let digests = render::build_digests(due, params.today);
    tracing::info!(recipients = digests.len(), "Dispatching digests");

    let mut sent_ids: Vec<String> = Vec::new();
    let mut sent = 0usize;
    let mut failed = 0usize;

    for digest in &digests {
        let started = Instant::now();
        let result = transport
            .send(&digest.recipient, &digest.subject, &digest.body)
            .await;
        let duration_ms = started.elapsed().as_millis() as i64;

        let log = match result {
            Ok(()) => {
                tracing::info!(
                    recipient = %digest.recipient,
                    records = digest.record_ids.len(),
                    "Sent digest"
                );
                sent += 1;
                sent_ids.extend(digest.record_ids.iter().cloned());
                NewReminderLog {
                    run_date: params.today,
                    recipient: digest.recipient.clone(),
                    status: "sent".to_string(),
                    error_message: None,
                    record_ids: digest.record_ids.clone(),
                    duration_ms,
                }
            }
            Err(e) => {
                tracing::error!(
                    recipient = %digest.recipient,
                    error = %e,
                    "Failed to send digest, records stay eligible for the next run"
                );
                failed += 1;
                NewReminderLog {
                    run_date: params.today,
                    recipient: digest.recipient.clone(),
                    status: "failed".to_string(),
                    error_message: Some(e.to_string()),
                    record_ids: digest.record_ids.clone(),
                    duration_ms,
                }
            }
        };

        // Audit trail is best-effort; never fail a run over it.
        if let Err(e) = store.insert_reminder_log(&log).await {
            tracing::warn!(recipient = %digest.recipient, error = %e, "Failed to write reminder log");
        }
    }

    let updated = store.mark_reminded(&sent_ids, params.today).await?;
    tracing::info!(updated, sent, failed, "Run complete");

    Ok(RunOutcome::Completed { sent, failed })
}
