//! The progress store: the single mutation path for chapter progress
//!
//! Every update runs the same sequence: validate and clamp, mutate, derive
//! `completed`, touch the streak and collect celebrations, then write through
//! to storage.

use std::collections::BTreeMap;

use chrono::Duration;

use super::model::{ChapterProgress, ProgressUpdate};
use crate::catalog::Catalog;
use crate::celebrate::{self, Celebration, Transition};
use crate::clock::Clock;
use crate::error::TrackerError;
use crate::storage::{Gateway, PROGRESS_KEY, STREAK_KEY};
use crate::streak::{StreakData, StreakTracker};

/// Result of a successful [`ProgressStore::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The record as stored
    pub progress: ChapterProgress,
    /// Celebrations reached by this update, highest priority first
    pub events: Vec<Celebration>,
    /// The chapter flipped from incomplete to complete
    pub newly_completed: bool,
    /// Anything about the record changed
    pub changed: bool,
}

impl UpdateOutcome {
    /// The one event worth surfacing, if any
    pub fn headline(&self) -> Option<&Celebration> {
        celebrate::headline(&self.events)
    }
}

/// Owns all chapter progress and the streak, and their persistence
#[derive(Debug)]
pub struct ProgressStore {
    catalog: Catalog,
    records: BTreeMap<u32, ChapterProgress>,
    streak: StreakTracker,
    gateway: Gateway,
    clock: Clock,
}

impl ProgressStore {
    /// Load persisted state and run the idle-streak check
    pub fn open(catalog: Catalog, mut gateway: Gateway, clock: Clock) -> Self {
        let stored: BTreeMap<u32, ChapterProgress> =
            gateway.load(PROGRESS_KEY).unwrap_or_default();
        let records = normalize_records(&catalog, stored);

        let mut streak = StreakTracker::new(gateway.load(STREAK_KEY).unwrap_or_default());
        if streak.expire_if_idle(clock.today()) {
            gateway.save(STREAK_KEY, streak.data());
        }

        tracing::debug!("Loaded progress for {} chapters", records.len());
        Self { catalog, records, streak, gateway, clock }
    }

    /// A store with no durable storage, for tests and throwaway sessions
    pub fn in_memory(catalog: Catalog, clock: Clock) -> Self {
        Self::open(catalog, Gateway::in_memory(), clock)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Move a fixed clock forward (no effect on the system clock)
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Stored record or an all-zero default; never mutates
    pub fn get(&self, chapter_id: u32) -> ChapterProgress {
        self.records.get(&chapter_id).cloned().unwrap_or_else(|| ChapterProgress::new(chapter_id))
    }

    /// All stored records keyed by chapter id
    pub fn records(&self) -> &BTreeMap<u32, ChapterProgress> {
        &self.records
    }

    pub fn streak(&self) -> &StreakData {
        self.streak.data()
    }

    pub fn is_degraded(&self) -> bool {
        self.gateway.is_degraded()
    }

    pub fn completed_count(&self) -> usize {
        self.catalog
            .chapters()
            .iter()
            .filter(|chapter| self.get(chapter.id).is_complete_for(chapter))
            .count()
    }

    /// First chapter not yet complete, or the last chapter when all are
    pub fn first_incomplete(&self) -> Option<u32> {
        self.catalog
            .chapters()
            .iter()
            .find(|chapter| !self.get(chapter.id).is_complete_for(chapter))
            .map(|chapter| chapter.id)
            .or_else(|| self.catalog.last_id())
    }

    /// Apply a partial update to one chapter
    pub fn update(
        &mut self,
        chapter_id: u32,
        update: ProgressUpdate,
    ) -> Result<UpdateOutcome, TrackerError> {
        let chapter =
            *self.catalog.get(chapter_id).ok_or(TrackerError::UnknownChapter(chapter_id))?;
        let now = self.clock.now();

        let before = self.get(chapter_id);
        let mut after = before.clone();
        update.apply_to(&mut after, &chapter);

        if after.start_date.is_none() && !after.is_untouched() {
            after.start_date = Some(now);
        }

        after.completed = after.is_complete_for(&chapter);
        let newly_completed = !before.completed && after.completed;
        if newly_completed {
            after.completed_date = Some(now);
        } else if !after.completed {
            after.completed_date = None;
        }

        let changed = after != before;
        self.records.insert(chapter_id, after.clone());

        let mut events = Vec::new();
        if changed {
            let transition = self.streak.touch(self.clock.today());
            self.gateway.save(STREAK_KEY, self.streak.data());

            events = celebrate::evaluate(&Transition {
                chapter: &chapter,
                before: &before,
                after: &after,
                chapters_completed: self.completed_count(),
                chapter_count: self.catalog.chapter_count(),
            });
            if let Some(days) = transition.milestone() {
                events.push(Celebration::StreakMilestone { days });
                events.sort_by_key(Celebration::priority);
            }
        }

        if newly_completed {
            tracing::info!("Chapter {} completed: {}", chapter.id, chapter.title);
        }
        tracing::debug!(
            "Chapter {} now {} pages, {} problems, mcq {}, checkpoint {}",
            chapter_id,
            after.pages_read,
            after.problems_solved,
            after.mcq_completed,
            after.checkpoint_completed
        );

        self.gateway.save(PROGRESS_KEY, &self.records);

        Ok(UpdateOutcome { progress: after, events, newly_completed, changed })
    }

    /// Replace everything with imported state. Records are normalized against
    /// the catalog and missing dates are stamped with the import time; streak
    /// data is replaced only when provided.
    pub fn replace_all(
        &mut self,
        records: BTreeMap<u32, ChapterProgress>,
        streak: Option<StreakData>,
    ) {
        let now = self.clock.now();
        self.records = normalize_records(&self.catalog, records);
        for progress in self.records.values_mut() {
            if progress.start_date.is_none() && !progress.is_untouched() {
                progress.start_date = Some(now);
            }
            if progress.completed && progress.completed_date.is_none() {
                progress.completed_date = Some(now);
            }
        }
        self.gateway.save(PROGRESS_KEY, &self.records);

        if let Some(streak) = streak {
            self.streak.replace(streak);
            self.gateway.save(STREAK_KEY, self.streak.data());
        }
    }

    /// Forget all progress and streak data
    pub fn reset(&mut self) {
        self.records.clear();
        self.streak.reset();
        self.gateway.remove(PROGRESS_KEY);
        self.gateway.remove(STREAK_KEY);
        tracing::info!("Progress reset");
    }

    pub(crate) fn gateway_mut(&mut self) -> &mut Gateway {
        &mut self.gateway
    }
}

fn normalize_records(
    catalog: &Catalog,
    records: BTreeMap<u32, ChapterProgress>,
) -> BTreeMap<u32, ChapterProgress> {
    records
        .into_iter()
        .filter_map(|(id, progress)| match catalog.get(id) {
            Some(chapter) => Some((id, progress.normalized_for(chapter))),
            None => {
                tracing::warn!("Dropping progress for unknown chapter {}", id);
                None
            }
        })
        .collect()
}
