//! Study Tracker - chapter-by-chapter progress tracking for a textbook
//!
//! Records pages read, problems solved and quiz/checkpoint completion per
//! chapter, derives completion percentages and time estimates, keeps a daily
//! study streak, and backs everything up to JSON.

pub mod app;
pub mod calculator;
pub mod catalog;
pub mod celebrate;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod progress;
pub mod storage;
pub mod streak;

pub use app::StudyTracker;
pub use catalog::{Catalog, Chapter};
pub use config::Config;
pub use error::TrackerError;
pub use progress::{ChapterProgress, ProgressStore, ProgressUpdate};
