//! Derived study statistics
//!
//! All views are recomputed from the session list on demand; nothing here is
//! persisted. Calendar grouping uses the local timezone.

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::models::{StudyMode, StudySession};

pub const UNTAGGED: &str = "Untagged";

/// Seconds to whole minutes, rounding half up
pub fn round_minutes(seconds: u64) -> u64 {
    (seconds + 30) / 60
}

fn local_date(session: &StudySession) -> NaiveDate {
    session.date.with_timezone(&Local).date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMinutes {
    pub date: NaiveDate,
    pub minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMinutes {
    pub tag: String,
    pub minutes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub sessions: usize,
    pub total_minutes: u64,
    pub average_minutes: u64,
    pub pomodoro_count: usize,
    pub stopwatch_count: usize,
}

/// Minutes studied on each of the seven days ending at `today`, oldest first
pub fn daily_minutes(sessions: &[StudySession], today: NaiveDate) -> Vec<DailyMinutes> {
    (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let seconds: u64 = sessions
                .iter()
                .filter(|s| local_date(s) == date)
                .map(|s| s.duration_seconds)
                .sum();
            DailyMinutes {
                date,
                minutes: round_minutes(seconds),
            }
        })
        .collect()
}

/// Minutes per primary tag, largest first. Groups that round to zero are dropped.
pub fn minutes_by_tag(sessions: &[StudySession]) -> Vec<TagMinutes> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for session in sessions {
        let tag = session.primary_tag().unwrap_or(UNTAGGED);
        *totals.entry(tag).or_insert(0) += session.duration_seconds;
    }

    let mut groups: Vec<TagMinutes> = totals
        .into_iter()
        .map(|(tag, seconds)| TagMinutes {
            tag: tag.to_string(),
            minutes: round_minutes(seconds),
        })
        .filter(|g| g.minutes > 0)
        .collect();
    groups.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.tag.cmp(&b.tag)));
    groups
}

pub fn summary(sessions: &[StudySession]) -> StudySummary {
    let total_seconds: u64 = sessions.iter().map(|s| s.duration_seconds).sum();
    let pomodoro_count = sessions
        .iter()
        .filter(|s| s.mode == StudyMode::Pomodoro)
        .count();

    StudySummary {
        sessions: sessions.len(),
        total_minutes: round_minutes(total_seconds),
        average_minutes: if sessions.is_empty() {
            0
        } else {
            round_minutes(total_seconds / sessions.len() as u64)
        },
        pomodoro_count,
        stopwatch_count: sessions.len() - pomodoro_count,
    }
}
