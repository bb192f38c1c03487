//! Celebration policy
//!
//! Pure decisions about which milestones a state transition reached. Nothing
//! here plays sounds or shows anything; callers receive [`Celebration`]
//! descriptors and decide how many to surface.

pub mod sound;

pub use sound::{SoundCategory, SoundService, SoundSink};

use std::time::Duration;

use crate::catalog::Chapter;
use crate::progress::ChapterProgress;

/// Pause before the book-completed notice so it follows the chapter notice
pub const BOOK_COMPLETED_DELAY: Duration = Duration::from_secs(1);

/// Lower-tier reading events fire each time this many pages are crossed
pub const PAGE_STEP: u32 = 10;

/// Lower-tier problem events fire each time this many problems are crossed
pub const PROBLEM_STEP: u32 = 5;

/// A milestone worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Celebration {
    ChapterStarted { chapter_id: u32, title: &'static str },
    PageProgress { chapter_id: u32, pages_read: u32, total: u32 },
    PageMilestone { chapter_id: u32, total: u32 },
    ProblemProgress { chapter_id: u32, solved: u32, total: u32 },
    ProblemMilestone { chapter_id: u32, total: u32 },
    QuizMilestone { chapter_id: u32 },
    CheckpointMilestone { chapter_id: u32 },
    ChapterCompleted { chapter_id: u32, title: &'static str },
    BookCompleted,
    StreakMilestone { days: u32 },
    DataExported,
    DataImported,
}

impl Celebration {
    /// Fixed sound lookup
    pub fn sound(&self) -> SoundCategory {
        match self {
            Celebration::ChapterStarted { .. }
            | Celebration::PageProgress { .. }
            | Celebration::ProblemProgress { .. } => SoundCategory::SmallWin,
            Celebration::PageMilestone { .. }
            | Celebration::ProblemMilestone { .. }
            | Celebration::QuizMilestone { .. }
            | Celebration::CheckpointMilestone { .. }
            | Celebration::DataExported
            | Celebration::DataImported => SoundCategory::MediumWin,
            Celebration::ChapterCompleted { .. } | Celebration::StreakMilestone { .. } => {
                SoundCategory::BigWin
            }
            Celebration::BookCompleted => SoundCategory::BiggestWin,
        }
    }

    /// Lower sorts first when choosing what to surface
    pub fn priority(&self) -> u8 {
        match self {
            Celebration::ChapterCompleted { .. } => 0,
            Celebration::BookCompleted => 1,
            Celebration::StreakMilestone { .. } => 2,
            Celebration::PageMilestone { .. }
            | Celebration::ProblemMilestone { .. }
            | Celebration::QuizMilestone { .. }
            | Celebration::CheckpointMilestone { .. }
            | Celebration::DataExported
            | Celebration::DataImported => 3,
            Celebration::PageProgress { .. } | Celebration::ProblemProgress { .. } => 4,
            Celebration::ChapterStarted { .. } => 5,
        }
    }

    /// How long to wait before presenting
    pub fn delay(&self) -> Duration {
        match self {
            Celebration::BookCompleted => BOOK_COMPLETED_DELAY,
            _ => Duration::ZERO,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Celebration::ChapterStarted { .. } => "🚀 Chapter Started".into(),
            Celebration::PageProgress { .. } => "📖 Reading Progress".into(),
            Celebration::PageMilestone { .. } => "📖 Reading Complete!".into(),
            Celebration::ProblemProgress { .. } => "🧩 Problem Progress".into(),
            Celebration::ProblemMilestone { .. } => "🧩 All Problems Solved!".into(),
            Celebration::QuizMilestone { .. } => "📝 MCQ Quiz Complete!".into(),
            Celebration::CheckpointMilestone { .. } => "🎯 Checkpoint Reached!".into(),
            Celebration::ChapterCompleted { .. } => "🎉 Chapter Completed!".into(),
            Celebration::BookCompleted => "🏆 Book Completed!".into(),
            Celebration::StreakMilestone { days: 7 } => "🔥 Week Streak!".into(),
            Celebration::StreakMilestone { days: 30 } => "🔥 Month Streak!".into(),
            Celebration::StreakMilestone { days: 100 } => "🔥 Century Streak!".into(),
            Celebration::StreakMilestone { .. } => "🔥 Streak Milestone!".into(),
            Celebration::DataExported => "📊 Data Exported!".into(),
            Celebration::DataImported => "📊 Data Imported!".into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Celebration::ChapterStarted { title, .. } => format!("Started: {title}"),
            Celebration::PageProgress { pages_read, total, .. } => {
                format!("{pages_read}/{total} pages read")
            }
            Celebration::PageMilestone { chapter_id, total } => {
                format!("Great job! All {total} pages of Chapter {chapter_id} read!")
            }
            Celebration::ProblemProgress { solved, total, .. } => {
                format!("{solved}/{total} problems solved")
            }
            Celebration::ProblemMilestone { chapter_id, total } => {
                format!("Excellent! All {total} problems in Chapter {chapter_id} solved!")
            }
            Celebration::QuizMilestone { chapter_id } => {
                format!("Well done! You've completed the MCQ quiz for Chapter {chapter_id}!")
            }
            Celebration::CheckpointMilestone { chapter_id } => {
                format!("Awesome! You've completed the checkpoint for Chapter {chapter_id}!")
            }
            Celebration::ChapterCompleted { chapter_id, title } => {
                format!("Congratulations! You've completed Chapter {chapter_id:02}: {title}")
            }
            Celebration::BookCompleted => {
                "Amazing! You've completed every chapter of the textbook!".into()
            }
            Celebration::StreakMilestone { days: 7 } => {
                "Amazing! You've studied for 7 days in a row!".into()
            }
            Celebration::StreakMilestone { days: 30 } => {
                "Incredible! 30 days of consistent studying!".into()
            }
            Celebration::StreakMilestone { days: 100 } => {
                "Legendary! 100 consecutive days of studying!".into()
            }
            Celebration::StreakMilestone { days } => {
                format!("Outstanding! {days} days of continuous learning!")
            }
            Celebration::DataExported => "Your progress has been exported successfully.".into(),
            Celebration::DataImported => "Your progress has been successfully imported!".into(),
        }
    }
}

/// A before/after view of one chapter plus the book-wide completion count
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    pub chapter: &'a Chapter,
    pub before: &'a ChapterProgress,
    pub after: &'a ChapterProgress,
    /// Completed chapters after the change
    pub chapters_completed: usize,
    pub chapter_count: usize,
}

impl Transition<'_> {
    fn completes_chapter(&self) -> bool {
        !self.before.completed && self.after.completed
    }
}

/// Every milestone the transition reached, highest priority first
pub fn evaluate(transition: &Transition<'_>) -> Vec<Celebration> {
    let Transition { chapter, before, after, .. } = *transition;
    let chapter_id = chapter.id;
    let completing = transition.completes_chapter();
    let mut events = Vec::new();

    if completing {
        events.push(Celebration::ChapterCompleted { chapter_id, title: chapter.title });
        if transition.chapter_count > 0
            && transition.chapters_completed >= transition.chapter_count
        {
            events.push(Celebration::BookCompleted);
        }
    }

    if after.pages_read > before.pages_read {
        if after.pages_read == chapter.pages {
            if !completing {
                events.push(Celebration::PageMilestone { chapter_id, total: chapter.pages });
            }
        } else if crossed_step(before.pages_read, after.pages_read, PAGE_STEP) {
            events.push(Celebration::PageProgress {
                chapter_id,
                pages_read: after.pages_read,
                total: chapter.pages,
            });
        }
    }

    if after.problems_solved > before.problems_solved {
        if after.problems_solved == chapter.problems {
            if !completing {
                events.push(Celebration::ProblemMilestone { chapter_id, total: chapter.problems });
            }
        } else if crossed_step(before.problems_solved, after.problems_solved, PROBLEM_STEP) {
            events.push(Celebration::ProblemProgress {
                chapter_id,
                solved: after.problems_solved,
                total: chapter.problems,
            });
        }
    }

    if !before.mcq_completed && after.mcq_completed && !completing {
        events.push(Celebration::QuizMilestone { chapter_id });
    }

    if !before.checkpoint_completed && after.checkpoint_completed && !completing {
        events.push(Celebration::CheckpointMilestone { chapter_id });
    }

    if before.is_untouched() && !after.is_untouched() {
        events.push(Celebration::ChapterStarted { chapter_id, title: chapter.title });
    }

    events.sort_by_key(Celebration::priority);
    events
}

/// The single event to surface, if any
pub fn headline(events: &[Celebration]) -> Option<&Celebration> {
    events.iter().min_by_key(|event| event.priority())
}

fn crossed_step(before: u32, after: u32, step: u32) -> bool {
    after / step > before / step
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHAPTER: Chapter = Chapter::new(4, "Loops", 46, 12);

    fn transition<'a>(before: &'a ChapterProgress, after: &'a ChapterProgress) -> Transition<'a> {
        Transition {
            chapter: &CHAPTER,
            before,
            after,
            chapters_completed: usize::from(after.completed),
            chapter_count: 30,
        }
    }

    fn progress(pages: u32, problems: u32, mcq: bool, checkpoint: bool) -> ChapterProgress {
        let mut progress = ChapterProgress {
            pages_read: pages,
            problems_solved: problems,
            mcq_completed: mcq,
            checkpoint_completed: checkpoint,
            ..ChapterProgress::new(CHAPTER.id)
        };
        progress.completed = progress.is_complete_for(&CHAPTER);
        progress
    }

    #[test]
    fn first_progress_starts_chapter() {
        let before = progress(0, 0, false, false);
        let after = progress(3, 0, false, false);
        let events = evaluate(&transition(&before, &after));
        assert_eq!(events, vec![Celebration::ChapterStarted { chapter_id: 4, title: "Loops" }]);
    }

    #[test]
    fn crossing_ten_pages_is_progress() {
        let before = progress(8, 0, false, false);
        let after = progress(12, 0, false, false);
        let events = evaluate(&transition(&before, &after));
        assert_eq!(
            events,
            vec![Celebration::PageProgress { chapter_id: 4, pages_read: 12, total: 46 }]
        );
    }

    #[test]
    fn staying_within_a_step_is_quiet() {
        let before = progress(11, 1, false, false);
        let after = progress(15, 3, false, false);
        assert!(evaluate(&transition(&before, &after)).is_empty());
    }

    #[test]
    fn decreasing_is_quiet() {
        let before = progress(30, 10, false, false);
        let after = progress(9, 4, false, false);
        assert!(evaluate(&transition(&before, &after)).is_empty());
    }

    #[test]
    fn reading_everything_is_a_page_milestone() {
        let before = progress(40, 0, false, false);
        let after = progress(46, 0, false, false);
        let events = evaluate(&transition(&before, &after));
        assert_eq!(events, vec![Celebration::PageMilestone { chapter_id: 4, total: 46 }]);
        assert_eq!(events[0].sound(), SoundCategory::MediumWin);
    }

    #[test]
    fn problem_steps_and_maximum() {
        let before = progress(1, 4, false, false);
        let after = progress(1, 6, false, false);
        assert_eq!(
            evaluate(&transition(&before, &after)),
            vec![Celebration::ProblemProgress { chapter_id: 4, solved: 6, total: 12 }]
        );

        let after = progress(1, 12, false, false);
        assert_eq!(
            evaluate(&transition(&before, &after)),
            vec![Celebration::ProblemMilestone { chapter_id: 4, total: 12 }]
        );
    }

    #[test]
    fn quiz_and_checkpoint_flips() {
        let before = progress(1, 0, false, false);
        let after = progress(1, 0, true, true);
        assert_eq!(
            evaluate(&transition(&before, &after)),
            vec![
                Celebration::QuizMilestone { chapter_id: 4 },
                Celebration::CheckpointMilestone { chapter_id: 4 },
            ]
        );
    }

    #[test]
    fn completing_suppresses_smaller_milestones() {
        let before = progress(46, 12, true, false);
        let after = progress(46, 12, true, true);
        let events = evaluate(&transition(&before, &after));
        assert_eq!(events, vec![Celebration::ChapterCompleted { chapter_id: 4, title: "Loops" }]);
        assert_eq!(events[0].sound(), SoundCategory::BigWin);
    }

    #[test]
    fn completing_in_one_step_from_zero() {
        let before = progress(0, 0, false, false);
        let after = progress(46, 12, true, true);
        let events = evaluate(&transition(&before, &after));
        assert_eq!(
            events,
            vec![
                Celebration::ChapterCompleted { chapter_id: 4, title: "Loops" },
                Celebration::ChapterStarted { chapter_id: 4, title: "Loops" },
            ]
        );
    }

    #[test]
    fn already_complete_does_not_refire() {
        let before = progress(46, 12, true, true);
        let after = before.clone();
        assert!(evaluate(&transition(&before, &after)).is_empty());
    }

    #[test]
    fn last_chapter_completes_book() {
        let before = progress(46, 12, true, false);
        let after = progress(46, 12, true, true);
        let events = evaluate(&Transition {
            chapter: &CHAPTER,
            before: &before,
            after: &after,
            chapters_completed: 30,
            chapter_count: 30,
        });
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], Celebration::BookCompleted);
        assert_eq!(events[1].delay(), BOOK_COMPLETED_DELAY);
        assert_eq!(events[1].sound(), SoundCategory::BiggestWin);
        assert_eq!(headline(&events), Some(&events[0]));
    }

    #[test]
    fn headline_prefers_priority() {
        let events = vec![
            Celebration::ChapterStarted { chapter_id: 1, title: "x" },
            Celebration::StreakMilestone { days: 7 },
        ];
        assert_eq!(headline(&events), Some(&Celebration::StreakMilestone { days: 7 }));
        assert_eq!(headline(&[]), None);
    }

    #[test]
    fn messages_name_the_chapter() {
        let event = Celebration::ChapterCompleted { chapter_id: 4, title: "Loops" };
        assert_eq!(event.message(), "Congratulations! You've completed Chapter 04: Loops");
        assert_eq!(Celebration::StreakMilestone { days: 30 }.title(), "🔥 Month Streak!");
        assert_eq!(
            Celebration::StreakMilestone { days: 250 }.message(),
            "Outstanding! 250 days of continuous learning!"
        );
    }

    #[test]
    fn sound_table_is_fixed() {
        assert_eq!(Celebration::DataExported.sound(), SoundCategory::MediumWin);
        assert_eq!(Celebration::DataImported.sound(), SoundCategory::MediumWin);
        assert_eq!(Celebration::StreakMilestone { days: 7 }.sound(), SoundCategory::BigWin);
        assert_eq!(
            Celebration::PageProgress { chapter_id: 1, pages_read: 10, total: 20 }.sound(),
            SoundCategory::SmallWin
        );
    }
}
