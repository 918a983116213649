use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::entities::reminder_log::{self, Column, Entity};
use crate::error::Result;
use crate::store::CrmStore;

/// One dispatched digest, as recorded for operational forensics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderLogRow {
    pub id: String,
    pub run_date: String,
    pub recipient: String,
    pub status: String,
    pub error_message: Option<String>,
    pub record_count: i32,
    pub record_ids: Vec<String>,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert request for a reminder log row; id and created_at are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewReminderLog {
    pub run_date: NaiveDate,
    pub recipient: String,
    pub status: String,
    pub error_message: Option<String>,
    pub record_ids: Vec<String>,
    pub duration_ms: i64,
}

fn to_row(m: reminder_log::Model) -> ReminderLogRow {
    let record_ids = serde_json::from_str(&m.record_ids).unwrap_or_default();
    ReminderLogRow {
        id: m.id,
        run_date: m.run_date,
        recipient: m.recipient,
        status: m.status,
        error_message: m.error_message,
        record_count: m.record_count,
        record_ids,
        duration_ms: m.duration_ms,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

impl CrmStore {
    pub async fn insert_reminder_log(&self, log: &NewReminderLog) -> Result<ReminderLogRow> {
        let now = Utc::now().fixed_offset();
        let am = reminder_log::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            run_date: Set(log.run_date.to_string()),
            recipient: Set(log.recipient.clone()),
            status: Set(log.status.clone()),
            error_message: Set(log.error_message.clone()),
            record_count: Set(log.record_ids.len() as i32),
            record_ids: Set(serde_json::to_string(&log.record_ids)?),
            duration_ms: Set(log.duration_ms),
            created_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    pub async fn list_reminder_logs(
        &self,
        run_date: Option<NaiveDate>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ReminderLogRow>> {
        let mut q = Entity::find();
        if let Some(d) = run_date {
            q = q.filter(Column::RunDate.eq(d.to_string()));
        }
        let rows = q
            .order_by(Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_row).collect())
    }
}
