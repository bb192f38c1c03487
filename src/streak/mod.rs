//! Consecutive-day study streaks
//!
//! A streak counts local calendar days with at least one qualifying progress
//! update. Day distances come from differencing calendar dates, never from
//! dividing a raw timestamp delta.

mod date_format;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::days_between;

/// Persisted streak state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    #[serde(default)]
    pub current_streak: u32,

    /// Last day with qualifying activity
    #[serde(default, with = "date_format")]
    pub last_active_date: Option<NaiveDate>,

    /// Never decreases, always >= current_streak
    #[serde(default)]
    pub longest_streak: u32,
}

impl StreakData {
    /// Restore the longest >= current invariant on untrusted data
    pub fn normalized(mut self) -> Self {
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self
    }
}

/// What a call to [`StreakTracker::touch`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// First recorded activity
    Started,
    /// Already active today
    SameDay,
    /// Activity on the day after the last one; carries the new length
    Extended(u32),
    /// A gap of two or more days (or a last date in the future)
    Restarted,
}

impl StreakTransition {
    /// Streak length worth celebrating, only on the extending path
    pub fn milestone(self) -> Option<u32> {
        match self {
            StreakTransition::Extended(days) if is_milestone(days) => Some(days),
            _ => None,
        }
    }
}

/// 7, 30, 100 and every positive multiple of 50
pub fn is_milestone(days: u32) -> bool {
    matches!(days, 7 | 30 | 100) || (days > 0 && days % 50 == 0)
}

/// Owns and mutates [`StreakData`]
#[derive(Debug, Clone, Default)]
pub struct StreakTracker {
    data: StreakData,
}

impl StreakTracker {
    pub fn new(data: StreakData) -> Self {
        Self { data: data.normalized() }
    }

    pub fn data(&self) -> &StreakData {
        &self.data
    }

    /// Record qualifying activity on `today`
    pub fn touch(&mut self, today: NaiveDate) -> StreakTransition {
        let transition = match self.data.last_active_date {
            None => {
                self.data.current_streak = 1;
                StreakTransition::Started
            }
            Some(last) => match days_between(last, today) {
                0 => StreakTransition::SameDay,
                1 => {
                    self.data.current_streak += 1;
                    StreakTransition::Extended(self.data.current_streak)
                }
                _ => {
                    self.data.current_streak = 1;
                    StreakTransition::Restarted
                }
            },
        };

        self.data.last_active_date = Some(today);
        self.data.longest_streak = self.data.longest_streak.max(self.data.current_streak);
        transition
    }

    /// Passive check on load: zero the streak when more than a day has gone by
    /// without activity. The last active date is left alone. Returns whether
    /// anything changed.
    pub fn expire_if_idle(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.data.last_active_date else {
            return false;
        };

        if days_between(last, today) > 1 && self.data.current_streak != 0 {
            tracing::debug!("Streak expired; last active {}", last);
            self.data.current_streak = 0;
            return true;
        }
        false
    }

    /// Replace the whole state (import)
    pub fn replace(&mut self, data: StreakData) {
        self.data = data.normalized();
    }

    pub fn reset(&mut self) {
        self.data = StreakData::default();
    }
}
