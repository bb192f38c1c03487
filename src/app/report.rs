//! Plain-text rendering of tracker state for the terminal

use std::fmt::Write;

use textwrap::{Options, wrap};

use super::StudyTracker;
use crate::calculator;
use crate::celebrate::Celebration;
use crate::error::TrackerError;

/// Width notices are wrapped to
const NOTICE_WIDTH: usize = 64;

/// `"{h}h {m}min"`, or `"{m}min"` under an hour
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 { format!("{hours}h {mins}min") } else { format!("{mins}min") }
}

/// Book-wide summary
pub fn render_status(tracker: &StudyTracker) -> String {
    let catalog = tracker.catalog();
    let overview = tracker.overview();
    let estimates = tracker.time_estimates();
    let streak = tracker.store().streak();
    let mut out = String::new();

    let _ = writeln!(out, "Overall progress:   {}%", overview.overall_percent);
    let _ = writeln!(
        out,
        "Chapters completed: {}/{}",
        overview.chapters_completed,
        catalog.chapter_count()
    );
    let _ = writeln!(out, "Pages read:         {}/{}", overview.total_pages_read, catalog.total_pages());
    let _ = writeln!(
        out,
        "Problems solved:    {}/{}",
        overview.total_problems_solved,
        catalog.total_problems()
    );
    let _ = writeln!(
        out,
        "Streak:             {} days (longest {})",
        streak.current_streak, streak.longest_streak
    );
    if let Some(id) = tracker.current_chapter() {
        let _ = writeln!(out, "Current chapter:    {id}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Reading left:       {}h", estimates.reading_hours);
    let _ = writeln!(out, "Problems left:      {}h", estimates.problem_hours);
    let _ = writeln!(out, "Quizzes left:       {}h", estimates.quiz_hours);
    let _ = writeln!(out, "Total left:         {}h", estimates.total_hours);
    let _ = writeln!(out, "Projected finish:   {}", estimates.completion);
    out
}

/// One line per chapter
pub fn render_chapters(tracker: &StudyTracker) -> String {
    let current = tracker.current_chapter();
    let mut out = String::new();

    for chapter in tracker.catalog().chapters() {
        let progress = tracker.progress(chapter.id);
        let marker = if Some(chapter.id) == current { '>' } else { ' ' };
        let check = if progress.is_complete_for(chapter) { '✓' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker}{check} {:02}  {:>3}%  {:>3}/{:<3} pages  {:>2}/{:<2} problems  {}",
            chapter.id,
            calculator::chapter_percent(chapter, &progress),
            progress.pages_read,
            chapter.pages,
            progress.problems_solved,
            chapter.problems,
            chapter.title
        );
    }
    out
}

/// Detail view for one chapter
pub fn render_chapter(tracker: &StudyTracker, chapter_id: u32) -> Result<String, TrackerError> {
    let chapter = tracker.catalog().get(chapter_id).ok_or(TrackerError::UnknownChapter(chapter_id))?;
    let progress = tracker.progress(chapter_id);
    let remaining = tracker.remaining(chapter_id)?;
    let yes_no = |done: bool| if done { "done" } else { "pending" };
    let mut out = String::new();

    let _ = writeln!(out, "Chapter {:02}: {}", chapter.id, chapter.title);
    let _ = writeln!(out, "  Progress:   {}%", calculator::chapter_percent(chapter, &progress));
    let _ = writeln!(out, "  Pages:      {}/{}", progress.pages_read, chapter.pages);
    let _ = writeln!(out, "  Problems:   {}/{}", progress.problems_solved, chapter.problems);
    let _ = writeln!(out, "  MCQ quiz:   {}", yes_no(progress.mcq_completed));
    let _ = writeln!(out, "  Checkpoint: {}", yes_no(progress.checkpoint_completed));
    if let Some(started) = progress.start_date {
        let _ = writeln!(out, "  Started:    {}", started.format("%Y-%m-%d"));
    }
    if let Some(completed) = progress.completed_date {
        let _ = writeln!(out, "  Completed:  {}", completed.format("%Y-%m-%d"));
    }
    let _ = writeln!(out, "  Remaining:  {}", format_minutes(remaining.total_minutes()));
    Ok(out)
}

/// Title plus wrapped message
pub fn render_notice(event: &Celebration) -> String {
    let mut out = event.title();
    for line in wrap(&event.message(), Options::new(NOTICE_WIDTH)) {
        out.push_str("\n  ");
        out.push_str(&line);
    }
    out
}
