pub mod app_setting;
pub mod prospect;
pub mod reminder_log;
