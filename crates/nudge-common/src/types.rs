use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin-configured reminder cadence, read from the `app_settings` table.
///
/// # Examples
///
/// ```
/// use nudge_common::types::Frequency;
///
/// let freq: Frequency = "weekly".parse().unwrap();
/// assert_eq!(freq, Frequency::Weekly);
/// assert_eq!(freq.to_string(), "weekly");
///
/// // Unknown or missing setting values fall back to daily.
/// assert_eq!(Frequency::from_setting(Some("hourly")), Frequency::Daily);
/// assert_eq!(Frequency::from_setting(None), Frequency::Daily);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Off,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "off" => Ok(Frequency::Off),
            _ => Err(format!("unknown frequency: {s}")),
        }
    }
}

impl Frequency {
    /// Interpret a raw setting value, treating an absent or unrecognized
    /// value as `Daily` (safe default, same as the admin UI seed).
    pub fn from_setting(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or(Frequency::Daily)
    }
}

/// A prospect row as read from the shared CRM repository.
///
/// Date columns are carried as raw strings: the table is also written by
/// CSV imports, so `follow_up_date` may be absent or malformed and the
/// selector decides what to do with such rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    /// Owner address the digest is sent to; empty means the row is
    /// ineligible for reminders.
    pub assigned_to_email: String,
    /// ISO `YYYY-MM-DD`, possibly missing or unparseable.
    pub follow_up_date: Option<String>,
    /// ISO `YYYY-MM-DD` of the last successful reminder, if any.
    pub last_reminded_on: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
