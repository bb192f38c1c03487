//! Backup bundles: export snapshots and import parsing

pub mod import;

pub use import::{ImportPayload, parse_import, read_import_file};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator;
use crate::catalog::Catalog;
use crate::error::TrackerError;
use crate::progress::ChapterProgress;
use crate::streak::StreakData;

/// Schema tag written into every export
pub const EXPORT_VERSION: &str = "2.0";

/// A full snapshot of tracker state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub export_date: DateTime<Utc>,

    #[serde(default)]
    pub version: String,

    pub progress_data: BTreeMap<u32, ChapterProgress>,

    #[serde(default)]
    pub streak_data: StreakData,

    /// Derived figures for people reading the file; ignored on import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_stats: Option<DetailedStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStats {
    pub export_date: DateTime<Utc>,
    pub summary: Summary,
    pub chapter_details: Vec<ChapterDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub chapters_completed: usize,
    pub total_chapters: usize,
    pub total_pages_read: u32,
    pub total_pages: u32,
    pub total_problems_solved: u32,
    pub total_problems: u32,
    pub overall_progress_percentage: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_active_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDetail {
    pub chapter_number: u32,
    pub title: String,
    pub pages_read: u32,
    pub total_pages: u32,
    pub problems_solved: u32,
    pub total_problems: u32,
    pub mcq_completed: bool,
    pub checkpoint_completed: bool,
    pub progress_percentage: u32,
    pub completed: bool,
}

impl ExportBundle {
    /// Snapshot the given state, with detailed stats computed against `catalog`
    pub fn build(
        catalog: &Catalog,
        records: &BTreeMap<u32, ChapterProgress>,
        streak: &StreakData,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            export_date: now,
            version: EXPORT_VERSION.to_string(),
            progress_data: records.clone(),
            streak_data: streak.clone(),
            detailed_stats: Some(DetailedStats::build(catalog, records, streak, now)),
        }
    }

    pub fn to_json(&self) -> Result<String, TrackerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `study-progress-YYYY-MM-DD.json`
    pub fn file_name(date: NaiveDate) -> String {
        format!("study-progress-{}.json", date.format("%Y-%m-%d"))
    }

    /// Write the bundle into `dir` under its dated file name
    pub fn write_to_dir(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf, TrackerError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(today));
        std::fs::write(&path, self.to_json()?)?;
        tracing::info!("Exported progress to {:?}", path);
        Ok(path)
    }
}

impl DetailedStats {
    fn build(
        catalog: &Catalog,
        records: &BTreeMap<u32, ChapterProgress>,
        streak: &StreakData,
        now: DateTime<Utc>,
    ) -> Self {
        let overview = calculator::overview(catalog, records);

        let chapter_details = catalog
            .chapters()
            .iter()
            .map(|chapter| {
                let progress =
                    records.get(&chapter.id).cloned().unwrap_or_else(|| ChapterProgress::new(chapter.id));
                ChapterDetail {
                    chapter_number: chapter.id,
                    title: chapter.title.to_string(),
                    pages_read: progress.pages_read,
                    total_pages: chapter.pages,
                    problems_solved: progress.problems_solved,
                    total_problems: chapter.problems,
                    mcq_completed: progress.mcq_completed,
                    checkpoint_completed: progress.checkpoint_completed,
                    progress_percentage: calculator::chapter_percent(chapter, &progress),
                    completed: progress.is_complete_for(chapter),
                }
            })
            .collect();

        Self {
            export_date: now,
            summary: Summary {
                chapters_completed: overview.chapters_completed,
                total_chapters: catalog.chapter_count(),
                total_pages_read: overview.total_pages_read,
                total_pages: catalog.total_pages(),
                total_problems_solved: overview.total_problems_solved,
                total_problems: catalog.total_problems(),
                overall_progress_percentage: overview.overall_percent,
                current_streak: streak.current_streak,
                longest_streak: streak.longest_streak,
                last_active_date: streak.last_active_date,
            },
            chapter_details,
        }
    }
}
