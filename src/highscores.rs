//! Ranking records and the filter/ordering applied when listing them

use std::cmp::Ordering;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::{ANONYMOUS_PLAYER, RECORDS_PAGE};

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub player_name: String,
    pub score: u32,
    /// Run time spent in the playing scene
    pub time: Duration,
    pub level_name: String,
    /// Unix timestamp (ms) when the record was created
    pub created_at: u64,
}

impl Record {
    /// Build a record; a blank player name is stored as `undefined`
    pub fn new(
        player_name: &str,
        score: u32,
        time: Duration,
        level_name: &str,
        created_at: u64,
    ) -> Self {
        let player_name = match player_name.trim() {
            "" => ANONYMOUS_PLAYER.to_string(),
            _ => player_name.to_string(),
        };
        Self {
            player_name,
            score,
            time,
            level_name: level_name.to_string(),
            created_at,
        }
    }
}

/// Current Unix time in milliseconds (0 if the clock is before the epoch)
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Query for the ranking screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    /// Only players whose name starts with this (empty = everyone)
    pub player_name_prefix: String,
    /// Exact level name (empty = every level)
    pub level_name: String,
    pub score_ascending: bool,
    pub time_ascending: bool,
    pub limit: usize,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            player_name_prefix: String::new(),
            level_name: String::new(),
            score_ascending: false,
            time_ascending: true,
            limit: RECORDS_PAGE,
        }
    }
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        record.player_name.starts_with(&self.player_name_prefix)
            && (self.level_name.is_empty() || record.level_name == self.level_name)
    }

    /// Score first, then time, each in its requested direction
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let by_score = a.score.cmp(&b.score);
        let by_time = a.time.cmp(&b.time);
        let by_score = if self.score_ascending { by_score } else { by_score.reverse() };
        let by_time = if self.time_ascending { by_time } else { by_time.reverse() };
        by_score.then(by_time)
    }

    /// Filter, order and truncate `records`
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a Record>) -> Vec<Record> {
        let mut selected: Vec<Record> = records
            .into_iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected.truncate(self.limit);
        selected
    }
}
