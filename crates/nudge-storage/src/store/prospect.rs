use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder,
};

use crate::entities::prospect::{self, Column, Entity};
use crate::error::Result;
use crate::store::CrmStore;
use nudge_common::types::FollowUpRecord;

fn to_row(m: prospect::Model) -> FollowUpRecord {
    FollowUpRecord {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        company: m.company,
        assigned_to_email: m.assigned_to_email,
        follow_up_date: m.follow_up_date,
        last_reminded_on: m.last_reminded_on,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

impl CrmStore {
    pub async fn insert_prospect(&self, row: &FollowUpRecord) -> Result<FollowUpRecord> {
        let now = Utc::now().fixed_offset();
        let am = prospect::ActiveModel {
            id: Set(row.id.clone()),
            first_name: Set(row.first_name.clone()),
            last_name: Set(row.last_name.clone()),
            company: Set(row.company.clone()),
            assigned_to_email: Set(row.assigned_to_email.clone()),
            follow_up_date: Set(row.follow_up_date.clone()),
            last_reminded_on: Set(row.last_reminded_on.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(to_row(model))
    }

    pub async fn get_prospect_by_id(&self, id: &str) -> Result<Option<FollowUpRecord>> {
        Ok(Entity::find_by_id(id).one(self.db()).await?.map(to_row))
    }

    /// Lists every prospect that has a follow-up date set, ordered by
    /// follow-up date ascending.
    ///
    /// The due-window cut and same-day suppression happen in the selector:
    /// `follow_up_date` is TEXT and may hold values a SQL comparison would
    /// silently misorder, and the selector wants to warn about those rows
    /// rather than lose them.
    pub async fn list_follow_up_candidates(&self) -> Result<Vec<FollowUpRecord>> {
        let rows = Entity::find()
            .filter(Column::FollowUpDate.is_not_null())
            .order_by(Column::FollowUpDate, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(to_row).collect())
    }

    /// Stamps `last_reminded_on = date` for exactly the given ids.
    ///
    /// Returns the number of rows updated. This is the only prospect write
    /// the reminder job performs.
    pub async fn mark_reminded(&self, ids: &[String], date: NaiveDate) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now = Utc::now().fixed_offset();
        let res = Entity::update_many()
            .col_expr(Column::LastRemindedOn, Expr::value(date.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .exec(self.db())
            .await?;
        Ok(res.rows_affected)
    }
}
