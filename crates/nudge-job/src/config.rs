use anyhow::{anyhow, Context};
use chrono::Weekday;
use chrono_tz::Tz;
use serde::Deserialize;

use nudge_notify::email::SmtpConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Database connection URL for the shared CRM store.
    /// SQLite example: `sqlite://data/crm.db?mode=rwc`
    pub db_url: String,
    pub smtp: SmtpConfig,
    /// IANA timezone the run date is computed in. Owners plan their day in
    /// office time, not UTC.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Upper edge of the due window, in days from today.
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    /// Weekday on which weekly-frequency runs fire.
    #[serde(default = "default_weekly_anchor")]
    pub weekly_anchor: String,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_window_days() -> i64 {
    7
}

fn default_weekly_anchor() -> String {
    "mon".to_string()
}

impl JobConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let mut config: Self = toml::from_str(&content)?;

        // Secrets can stay out of the config file.
        if config.smtp.password.is_none() {
            if let Ok(password) = std::env::var("NUDGE_SMTP_PASSWORD") {
                config.smtp.password = Some(password);
            }
        }

        Ok(config)
    }

    pub fn reporting_timezone(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow!("invalid timezone '{}': {e}", self.timezone))
    }

    pub fn anchor_weekday(&self) -> anyhow::Result<Weekday> {
        self.weekly_anchor
            .parse()
            .map_err(|_| anyhow!("invalid weekly_anchor '{}'", self.weekly_anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config: JobConfig = toml::from_str(
            r#"
            db_url = "sqlite://data/crm.db?mode=rwc"

            [smtp]
            host = "smtp.example.com"
            from = "crm@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.timezone, "America/New_York");
        assert_eq!(config.window_days, 7);
        assert_eq!(config.anchor_weekday().unwrap(), Weekday::Mon);
        assert!(config.reporting_timezone().is_ok());
    }

    #[test]
    fn rejects_unknown_timezone_and_anchor() {
        let config: JobConfig = toml::from_str(
            r#"
            db_url = "sqlite://data/crm.db?mode=rwc"
            timezone = "Mars/Olympus_Mons"
            weekly_anchor = "someday"

            [smtp]
            host = "smtp.example.com"
            from = "crm@example.com"
            "#,
        )
        .unwrap();

        assert!(config.reporting_timezone().is_err());
        assert!(config.anchor_weekday().is_err());
    }
}
