//! Derived progress figures
//!
//! Chapter percent is points based: reading is worth up to 35 points, problems
//! up to 50, the MCQ quiz a flat 10 and the checkpoint a flat 5. Terms are
//! summed unrounded and rounded once. A chapter that is not complete never
//! reports 100. The overall figure is the mean of per-chapter points.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Days, NaiveDate};

use crate::catalog::{Catalog, Chapter, DEFAULT_DAILY_HOURS, MCQ_QUIZ_TIME};
use crate::config::StudySettings;
use crate::progress::ChapterProgress;

pub const READING_POINTS: f64 = 35.0;
pub const PROBLEM_POINTS: f64 = 50.0;
pub const QUIZ_POINTS: f64 = 10.0;
pub const CHECKPOINT_POINTS: f64 = 5.0;

/// Share of `total` that `done` represents; an empty dimension counts as done
fn fraction(done: u32, total: u32) -> f64 {
    if total == 0 { 1.0 } else { f64::from(done.min(total)) / f64::from(total) }
}

/// Unrounded points (0..=100) for one chapter
pub fn chapter_points(chapter: &Chapter, progress: &ChapterProgress) -> f64 {
    let reading = fraction(progress.pages_read, chapter.pages) * READING_POINTS;
    let problems = fraction(progress.problems_solved, chapter.problems) * PROBLEM_POINTS;
    let quiz = if progress.mcq_completed { QUIZ_POINTS } else { 0.0 };
    let checkpoint = if progress.checkpoint_completed { CHECKPOINT_POINTS } else { 0.0 };
    reading + problems + quiz + checkpoint
}

/// Whole-number percent for one chapter
pub fn chapter_percent(chapter: &Chapter, progress: &ChapterProgress) -> u32 {
    if progress.is_complete_for(chapter) {
        return 100;
    }
    (chapter_points(chapter, progress).round() as u32).min(99)
}

/// Minutes of work left in a chapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemainingTime {
    pub reading_minutes: u32,
    pub problem_minutes: u32,
    pub quiz_minutes: u32,
}

impl RemainingTime {
    /// Saturates rather than overflowing on extreme settings
    pub fn total_minutes(&self) -> u32 {
        self.reading_minutes.saturating_add(self.problem_minutes).saturating_add(self.quiz_minutes)
    }
}

/// Reading and problem terms are rounded up separately
pub fn remaining_time(
    chapter: &Chapter,
    progress: &ChapterProgress,
    settings: &StudySettings,
) -> RemainingTime {
    let pages_left = chapter.pages.saturating_sub(progress.pages_read);
    let problems_left = chapter.problems.saturating_sub(progress.problems_solved);

    RemainingTime {
        reading_minutes: (f64::from(pages_left) * settings.reading_speed).ceil() as u32,
        problem_minutes: (f64::from(problems_left) * settings.problem_time).ceil() as u32,
        quiz_minutes: if progress.mcq_completed { 0 } else { MCQ_QUIZ_TIME },
    }
}

/// Total remaining minutes for one chapter
pub fn remaining_minutes(
    chapter: &Chapter,
    progress: &ChapterProgress,
    settings: &StudySettings,
) -> u32 {
    remaining_time(chapter, progress, settings).total_minutes()
}

fn progress_for(records: &BTreeMap<u32, ChapterProgress>, id: u32) -> ChapterProgress {
    records.get(&id).cloned().unwrap_or_else(|| ChapterProgress::new(id))
}

/// Mean of per-chapter points across the whole catalog
pub fn overall_percent(catalog: &Catalog, records: &BTreeMap<u32, ChapterProgress>) -> u32 {
    let count = catalog.chapter_count();
    if count == 0 {
        return 0;
    }

    let mut points = 0.0;
    let mut all_complete = true;
    for chapter in catalog.chapters() {
        let progress = progress_for(records, chapter.id);
        points += chapter_points(chapter, &progress);
        all_complete &= progress.is_complete_for(chapter);
    }

    if all_complete {
        return 100;
    }
    ((points / count as f64).round() as u32).min(99)
}

/// Book-wide totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overview {
    pub chapters_completed: usize,
    pub total_pages_read: u32,
    pub total_problems_solved: u32,
    pub overall_percent: u32,
}

pub fn overview(catalog: &Catalog, records: &BTreeMap<u32, ChapterProgress>) -> Overview {
    let mut overview = Overview::default();
    for chapter in catalog.chapters() {
        let progress = progress_for(records, chapter.id);
        overview.total_pages_read += progress.pages_read.min(chapter.pages);
        overview.total_problems_solved += progress.problems_solved.min(chapter.problems);
        if progress.is_complete_for(chapter) {
            overview.chapters_completed += 1;
        }
    }
    overview.overall_percent = overall_percent(catalog, records);
    overview
}

/// When the remaining work should be done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    AlreadyComplete,
    On(NaiveDate),
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::AlreadyComplete => f.write_str("Completed! 🎉"),
            Projection::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// `today + ceil(hours / daily_hours)` days, or already complete
pub fn projected_completion(
    total_remaining_hours: f64,
    daily_hours: f64,
    today: NaiveDate,
) -> Projection {
    if total_remaining_hours <= 0.0 || total_remaining_hours.is_nan() {
        return Projection::AlreadyComplete;
    }

    let daily_hours =
        if daily_hours.is_finite() && daily_hours > 0.0 { daily_hours } else { DEFAULT_DAILY_HOURS };
    let days = (total_remaining_hours / daily_hours).ceil() as u64;
    Projection::On(today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
}

/// Remaining hours across the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEstimates {
    pub reading_hours: u32,
    pub problem_hours: u32,
    pub quiz_hours: u32,
    pub total_hours: u32,
    pub completion: Projection,
}

/// Each component is rounded up to whole hours before summing
pub fn time_estimates(
    catalog: &Catalog,
    records: &BTreeMap<u32, ChapterProgress>,
    settings: &StudySettings,
    today: NaiveDate,
) -> TimeEstimates {
    let mut pages_left = 0u32;
    let mut problems_left = 0u32;
    let mut quizzes_left = 0u32;
    for chapter in catalog.chapters() {
        let progress = progress_for(records, chapter.id);
        pages_left += chapter.pages.saturating_sub(progress.pages_read);
        problems_left += chapter.problems.saturating_sub(progress.problems_solved);
        if !progress.mcq_completed {
            quizzes_left += 1;
        }
    }

    let hours = |minutes: f64| (minutes / 60.0).ceil() as u32;
    let reading_hours = hours(f64::from(pages_left) * settings.reading_speed);
    let problem_hours = hours(f64::from(problems_left) * settings.problem_time);
    let quiz_hours = hours(f64::from(quizzes_left * MCQ_QUIZ_TIME));
    let total_hours = reading_hours.saturating_add(problem_hours).saturating_add(quiz_hours);

    TimeEstimates {
        reading_hours,
        problem_hours,
        quiz_hours,
        total_hours,
        completion: projected_completion(f64::from(total_hours), settings.daily_hours, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CHAPTER: Chapter = Chapter::new(1, "Intro", 32, 13);

    fn progress(pages: u32, problems: u32, mcq: bool, checkpoint: bool) -> ChapterProgress {
        ChapterProgress {
            pages_read: pages,
            problems_solved: problems,
            mcq_completed: mcq,
            checkpoint_completed: checkpoint,
            ..ChapterProgress::new(1)
        }
    }

    #[test]
    fn empty_progress_is_zero_percent() {
        assert_eq!(chapter_percent(&CHAPTER, &ChapterProgress::new(1)), 0);
    }

    #[test]
    fn weights_add_up() {
        assert_eq!(chapter_percent(&CHAPTER, &progress(32, 0, false, false)), 35);
        assert_eq!(chapter_percent(&CHAPTER, &progress(0, 13, false, false)), 50);
        assert_eq!(chapter_percent(&CHAPTER, &progress(0, 0, true, false)), 10);
        assert_eq!(chapter_percent(&CHAPTER, &progress(0, 0, false, true)), 5);
        assert_eq!(chapter_percent(&CHAPTER, &progress(32, 13, true, true)), 100);
    }

    #[test]
    fn rounds_once_at_the_end() {
        // 16/32*35 = 17.5 and 1/13*50 = 3.846..., sum 21.346 -> 21
        assert_eq!(chapter_percent(&CHAPTER, &progress(16, 1, false, false)), 21);
    }

    #[test]
    fn incomplete_chapter_never_shows_100() {
        let big = Chapter::new(1, "Big", 1000, 13);
        assert_eq!(chapter_percent(&big, &progress(999, 13, true, true)), 99);
    }

    #[test]
    fn degenerate_chapter_does_not_divide_by_zero() {
        let empty = Chapter::new(9, "Empty", 0, 0);
        let none = ChapterProgress::new(9);
        assert_eq!(chapter_percent(&empty, &none), 85);
        let done = ChapterProgress {
            mcq_completed: true,
            checkpoint_completed: true,
            ..ChapterProgress::new(9)
        };
        assert_eq!(chapter_percent(&empty, &done), 100);
    }

    #[test]
    fn remaining_time_rounds_each_term_up() {
        let settings =
            StudySettings { reading_speed: 7.5, problem_time: 20.0, ..Default::default() };
        let left = remaining_time(&CHAPTER, &progress(31, 13, false, false), &settings);
        assert_eq!(left.reading_minutes, 8);
        assert_eq!(left.problem_minutes, 0);
        assert_eq!(left.quiz_minutes, MCQ_QUIZ_TIME);
        assert_eq!(left.total_minutes(), 38);
    }

    #[test]
    fn remaining_minutes_for_fresh_chapter() {
        let settings = StudySettings::default();
        // 32 * 7.5 + 13 * 20 + 30
        assert_eq!(remaining_minutes(&CHAPTER, &ChapterProgress::new(1), &settings), 530);
    }

    #[test]
    fn finished_chapter_has_no_time_left() {
        let settings = StudySettings::default();
        assert_eq!(remaining_minutes(&CHAPTER, &progress(32, 13, true, true), &settings), 0);
    }

    #[test]
    fn overall_is_mean_of_points() {
        let catalog =
            Catalog::new(vec![Chapter::new(1, "A", 10, 10), Chapter::new(2, "B", 10, 10)]);
        let mut records = BTreeMap::new();
        records.insert(
            1,
            ChapterProgress {
                pages_read: 10,
                problems_solved: 10,
                mcq_completed: true,
                checkpoint_completed: true,
                ..ChapterProgress::new(1)
            },
        );
        assert_eq!(overall_percent(&catalog, &records), 50);

        records.insert(2, ChapterProgress { pages_read: 10, ..ChapterProgress::new(2) });
        // (100 + 35) / 2 = 67.5
        assert_eq!(overall_percent(&catalog, &records), 68);
    }

    #[test]
    fn overall_of_empty_catalog_is_zero() {
        assert_eq!(overall_percent(&Catalog::new(Vec::new()), &BTreeMap::new()), 0);
    }

    #[test]
    fn overview_totals() {
        let catalog = Catalog::builtin();
        let mut records = BTreeMap::new();
        records.insert(1, progress(32, 13, true, true));
        records.insert(2, ChapterProgress { pages_read: 10, ..ChapterProgress::new(2) });

        let overview = overview(&catalog, &records);
        assert_eq!(overview.chapters_completed, 1);
        assert_eq!(overview.total_pages_read, 42);
        assert_eq!(overview.total_problems_solved, 13);
        assert!(overview.overall_percent > 0);
    }

    #[test]
    fn projection_already_complete() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(projected_completion(0.0, 4.0, today), Projection::AlreadyComplete);
        assert_eq!(projected_completion(-1.0, 4.0, today), Projection::AlreadyComplete);
        assert_eq!(Projection::AlreadyComplete.to_string(), "Completed! 🎉");
    }

    #[test]
    fn projection_rounds_days_up() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 10, 22).unwrap();
        assert_eq!(projected_completion(9.0, 4.0, today), Projection::On(expected));
        assert_eq!(Projection::On(expected).to_string(), "2026-10-22");
    }

    #[test]
    fn projection_guards_bad_daily_hours() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        assert_eq!(projected_completion(8.0, 0.0, today), Projection::On(expected));
    }

    #[test]
    fn time_estimates_for_untouched_book() {
        let catalog = Catalog::new(vec![Chapter::new(1, "A", 32, 13)]);
        let settings = StudySettings::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let estimates = time_estimates(&catalog, &BTreeMap::new(), &settings, today);
        // 240 min -> 4h, 260 min -> 5h, 30 min -> 1h
        assert_eq!(estimates.reading_hours, 4);
        assert_eq!(estimates.problem_hours, 5);
        assert_eq!(estimates.quiz_hours, 1);
        assert_eq!(estimates.total_hours, 10);
        assert_eq!(
            estimates.completion,
            Projection::On(NaiveDate::from_ymd_opt(2026, 10, 22).unwrap())
        );
    }

    #[test]
    fn extreme_settings_saturate() {
        let settings = StudySettings { reading_speed: 1e12, problem_time: 1e12, ..Default::default() };
        let left = remaining_time(&CHAPTER, &ChapterProgress::new(1), &settings);
        assert_eq!(left.reading_minutes, u32::MAX);
        assert_eq!(left.total_minutes(), u32::MAX);

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let estimates = time_estimates(&Catalog::builtin(), &BTreeMap::new(), &settings, today);
        assert_eq!(estimates.total_hours, u32::MAX);
        assert!(matches!(estimates.completion, Projection::On(date) if date > today));
    }

    #[test]
    fn time_estimates_for_finished_book() {
        let catalog = Catalog::new(vec![CHAPTER]);
        let mut records = BTreeMap::new();
        records.insert(1, progress(32, 13, true, true));
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let estimates = time_estimates(&catalog, &records, &StudySettings::default(), today);
        assert_eq!(estimates.total_hours, 0);
        assert_eq!(estimates.completion, Projection::AlreadyComplete);
    }

    fn arb_chapter_state() -> impl Strategy<Value = (Chapter, u32, u32, bool, bool)> {
        (0..crate::catalog::CHAPTERS.len()).prop_flat_map(|index| {
            let chapter = crate::catalog::CHAPTERS[index];
            (Just(chapter), 0..=chapter.pages, 0..=chapter.problems, any::<bool>(), any::<bool>())
        })
    }

    proptest! {
        #[test]
        fn percent_is_monotonic_in_every_dimension(
            (chapter, pages, problems, mcq, checkpoint) in arb_chapter_state()
        ) {
            let base = chapter_percent(&chapter, &progress(pages, problems, mcq, checkpoint));
            let more_pages = (pages + 1).min(chapter.pages);
            let more_problems = (problems + 1).min(chapter.problems);

            prop_assert!(
                chapter_percent(&chapter, &progress(more_pages, problems, mcq, checkpoint)) >= base
            );
            prop_assert!(
                chapter_percent(&chapter, &progress(pages, more_problems, mcq, checkpoint)) >= base
            );
            prop_assert!(chapter_percent(&chapter, &progress(pages, problems, true, checkpoint)) >= base);
            prop_assert!(chapter_percent(&chapter, &progress(pages, problems, mcq, true)) >= base);
        }

        #[test]
        fn percent_is_100_only_when_complete(
            pages_total in 0u32..2000,
            problems_total in 0u32..500,
            pages in 0u32..2000,
            problems in 0u32..500,
            mcq in any::<bool>(),
            checkpoint in any::<bool>(),
        ) {
            let chapter = Chapter::new(1, "Generated", pages_total, problems_total);
            let state = progress(pages.min(pages_total), problems.min(problems_total), mcq, checkpoint);
            let percent = chapter_percent(&chapter, &state);
            prop_assert!(percent <= 100);
            prop_assert_eq!(percent == 100, state.is_complete_for(&chapter));
        }
    }
}
