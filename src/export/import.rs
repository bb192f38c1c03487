//! Import parsing
//!
//! Accepts either a full export bundle (`progressData` plus optional
//! `streakData`) or a bare chapter mapping at the top level. Parsing never
//! touches tracker state; the caller applies the payload after confirmation.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::TrackerError;
use crate::progress::ChapterProgress;
use crate::streak::StreakData;

/// Parsed, not yet applied, import contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPayload {
    pub progress: BTreeMap<u32, ChapterProgress>,
    /// Absent when the file was a bare mapping
    pub streak: Option<StreakData>,
}

/// Parse import text in either accepted shape
pub fn parse_import(text: &str) -> Result<ImportPayload, TrackerError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| TrackerError::InvalidImport(format!("not valid JSON: {e}")))?;

    let Value::Object(mut object) = value else {
        return Err(TrackerError::InvalidImport("expected a JSON object".into()));
    };

    if let Some(progress) = object.remove("progressData") {
        let streak = match object.remove("streakData") {
            None | Some(Value::Null) => None,
            Some(streak) => Some(
                serde_json::from_value::<StreakData>(streak)
                    .map_err(|e| TrackerError::InvalidImport(format!("bad streakData: {e}")))?,
            ),
        };
        return Ok(ImportPayload { progress: parse_mapping(progress)?, streak });
    }

    Ok(ImportPayload { progress: parse_mapping(Value::Object(object))?, streak: None })
}

fn parse_mapping(value: Value) -> Result<BTreeMap<u32, ChapterProgress>, TrackerError> {
    let Value::Object(entries) = value else {
        return Err(TrackerError::InvalidImport("progress data must be an object".into()));
    };

    let legacy = is_legacy_mapping(&entries);
    if legacy {
        tracing::info!("Import uses the older index-keyed layout; shifting to chapter ids");
    }

    entries
        .into_iter()
        .map(|(key, entry)| {
            let key_id: u32 = key.trim().parse().map_err(|_| {
                TrackerError::InvalidImport(format!("chapter key {key:?} is not a number"))
            })?;
            let id = if legacy { key_id.saturating_add(1) } else { key_id };
            let progress: ChapterProgress = serde_json::from_value(entry).map_err(|e| {
                TrackerError::InvalidImport(format!("bad progress for chapter {id}: {e}"))
            })?;
            Ok((id, progress))
        })
        .collect()
}

/// Older files key records by 0-based chapter index and name the flags
/// `mcqDone`/`checkpointDone`
fn is_legacy_mapping(entries: &Map<String, Value>) -> bool {
    entries.iter().any(|(key, entry)| {
        key.trim() == "0"
            || entry.get("mcqDone").is_some()
            || entry.get("checkpointDone").is_some()
    })
}

/// Read and parse an import file
pub async fn read_import_file(path: &Path) -> Result<ImportPayload, TrackerError> {
    let text = tokio::fs::read_to_string(path).await?;
    let payload = parse_import(&text)?;
    tracing::debug!("Parsed import with {} chapter records", payload.progress.len());
    Ok(payload)
}
