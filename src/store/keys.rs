//! Storage-key derivation for per-day records.
//!
//! Each calendar date owns one score, one completed flag, and one rank slot.
//! The key helpers do not validate the date-key format: canonical keys are
//! zero-padded `YYYY-MM-DD` from [`date_key`], but legacy non-zero-padded
//! keys from old installs address their own (distinct) records.

use chrono::{Local, NaiveDate};

/// Canonical date key: zero-padded `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date key for the current daily puzzle, in the device's local timezone.
pub fn today_key() -> String {
    date_key(Local::now().date_naive())
}

pub fn daily_score_key(date_key: &str) -> String {
    format!("score-{date_key}")
}

pub fn daily_completed_key(date_key: &str) -> String {
    format!("completed-{date_key}")
}

pub fn daily_rank_key(date_key: &str) -> String {
    format!("rank-{date_key}")
}
