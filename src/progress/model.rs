//! Per-chapter progress records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Chapter;

/// Progress for one chapter
///
/// `completed` is stored so exports stay self-describing, but it is always
/// re-derived from the four measured dimensions whenever a record is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterProgress {
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub pages_read: u32,

    #[serde(default)]
    pub problems_solved: u32,

    #[serde(default, alias = "mcqDone")]
    pub mcq_completed: bool,

    #[serde(default, alias = "checkpointDone")]
    pub checkpoint_completed: bool,

    #[serde(default)]
    pub completed: bool,

    /// Set on the first nonzero progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Set on the transition to completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl ChapterProgress {
    /// An all-zero record for a chapter
    pub fn new(id: u32) -> Self {
        Self { id, ..Default::default() }
    }

    /// No dimension has any progress
    pub fn is_untouched(&self) -> bool {
        self.pages_read == 0
            && self.problems_solved == 0
            && !self.mcq_completed
            && !self.checkpoint_completed
    }

    /// Every dimension is at its maximum
    pub fn is_complete_for(&self, chapter: &Chapter) -> bool {
        self.pages_read >= chapter.pages
            && self.problems_solved >= chapter.problems
            && self.mcq_completed
            && self.checkpoint_completed
    }

    /// Clamp counts into the chapter's bounds and re-derive `completed`
    pub fn normalized_for(mut self, chapter: &Chapter) -> Self {
        self.id = chapter.id;
        self.pages_read = self.pages_read.min(chapter.pages);
        self.problems_solved = self.problems_solved.min(chapter.problems);
        self.completed = self.is_complete_for(chapter);
        if !self.completed {
            self.completed_date = None;
        }
        self
    }
}

/// A partial update; `None` fields are left as they are
///
/// Counts are signed so out-of-range input can be clamped rather than
/// rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub pages_read: Option<i64>,
    pub problems_solved: Option<i64>,
    pub mcq_completed: Option<bool>,
    pub checkpoint_completed: Option<bool>,
}

impl ProgressUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages_read(mut self, pages: i64) -> Self {
        self.pages_read = Some(pages);
        self
    }

    pub fn problems_solved(mut self, problems: i64) -> Self {
        self.problems_solved = Some(problems);
        self
    }

    pub fn mcq_completed(mut self, done: bool) -> Self {
        self.mcq_completed = Some(done);
        self
    }

    pub fn checkpoint_completed(mut self, done: bool) -> Self {
        self.checkpoint_completed = Some(done);
        self
    }

    /// Everything at its maximum for `chapter`
    pub fn complete(chapter: &Chapter) -> Self {
        Self::new()
            .pages_read(i64::from(chapter.pages))
            .problems_solved(i64::from(chapter.problems))
            .mcq_completed(true)
            .checkpoint_completed(true)
    }

    /// Apply to `progress`, clamping counts into `[0, max]`
    pub fn apply_to(&self, progress: &mut ChapterProgress, chapter: &Chapter) {
        if let Some(pages) = self.pages_read {
            progress.pages_read = clamp_count(pages, chapter.pages);
        }
        if let Some(problems) = self.problems_solved {
            progress.problems_solved = clamp_count(problems, chapter.problems);
        }
        if let Some(done) = self.mcq_completed {
            progress.mcq_completed = done;
        }
        if let Some(done) = self.checkpoint_completed {
            progress.checkpoint_completed = done;
        }
    }
}

fn clamp_count(value: i64, max: u32) -> u32 {
    // Bounded by `max`, so the cast cannot truncate
    value.clamp(0, i64::from(max)) as u32
}
