//! Chapter progress records and the store that mutates them

pub mod model;
pub mod store;

pub use model::{ChapterProgress, ProgressUpdate};
pub use store::{ProgressStore, UpdateOutcome};
