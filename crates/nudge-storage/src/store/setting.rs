use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};

use crate::entities::app_setting::{self, Entity};
use crate::error::Result;
use crate::store::CrmStore;
use nudge_common::types::Frequency;

/// Setting key the admin UI writes the reminder cadence under.
pub const REMINDER_FREQUENCY_KEY: &str = "reminder_frequency";

impl CrmStore {
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(Entity::find_by_id(key)
            .one(self.db())
            .await?
            .map(|m| m.value))
    }

    /// Inserts or replaces a setting value. Owned by the admin UI; the
    /// reminder job itself never calls this outside of tests.
    pub async fn upsert_setting(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().fixed_offset();
        match Entity::find_by_id(key).one(self.db()).await? {
            Some(m) => {
                let mut am: app_setting::ActiveModel = m.into();
                am.value = Set(value.to_owned());
                am.updated_at = Set(now);
                am.update(self.db()).await?;
            }
            None => {
                let am = app_setting::ActiveModel {
                    key: Set(key.to_owned()),
                    value: Set(value.to_owned()),
                    updated_at: Set(now),
                };
                am.insert(self.db()).await?;
            }
        }
        Ok(())
    }

    /// Reads the reminder cadence, falling back to [`Frequency::Daily`]
    /// when the row is absent or holds an unrecognized value.
    ///
    /// A database error is still surfaced: an unreachable repository is
    /// fatal for the run, only a missing row is recovered locally.
    pub async fn get_reminder_frequency(&self) -> Result<Frequency> {
        let value = self.get_setting(REMINDER_FREQUENCY_KEY).await?;
        Ok(Frequency::from_setting(value.as_deref()))
    }
}
