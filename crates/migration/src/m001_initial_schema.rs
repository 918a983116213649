use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_initial_schema"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(UP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DOWN_SQL)
            .await?;
        Ok(())
    }
}

const UP_SQL: &str = "
CREATE TABLE IF NOT EXISTS prospects (
    id TEXT PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    company TEXT NOT NULL DEFAULT '',
    assigned_to_email TEXT NOT NULL DEFAULT '',
    follow_up_date TEXT,
    last_reminded_on TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_prospects_follow_up_date ON prospects(follow_up_date);
CREATE INDEX IF NOT EXISTS idx_prospects_assigned_to ON prospects(assigned_to_email);

CREATE TABLE IF NOT EXISTS app_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reminder_logs (
    id TEXT PRIMARY KEY NOT NULL,
    run_date TEXT NOT NULL,
    recipient TEXT NOT NULL,
    status TEXT NOT NULL,
    error_message TEXT,
    record_count INTEGER NOT NULL DEFAULT 0,
    record_ids TEXT NOT NULL DEFAULT '[]',
    duration_ms INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_reminder_logs_run_date ON reminder_logs(run_date);
CREATE INDEX IF NOT EXISTS idx_reminder_logs_recipient ON reminder_logs(recipient);
";

const DOWN_SQL: &str = "
DROP TABLE IF EXISTS reminder_logs;
DROP TABLE IF EXISTS app_settings;
DROP TABLE IF EXISTS prospects;
";
