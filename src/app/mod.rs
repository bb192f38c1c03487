//! The study session: progress store plus settings, sound, current chapter
//! and the confirmation slot

pub mod confirm;
pub mod report;

pub use confirm::PendingAction;

use std::path::{Path, PathBuf};

use crate::calculator::{self, Overview, RemainingTime, TimeEstimates};
use crate::catalog::Catalog;
use crate::celebrate::{Celebration, SoundService, SoundSink};
use crate::clock::Clock;
use crate::config::{SettingField, StudySettings};
use crate::error::TrackerError;
use crate::export::{self, ExportBundle, ImportPayload};
use crate::progress::{ChapterProgress, ProgressStore, ProgressUpdate, UpdateOutcome};
use crate::storage::{Gateway, SOUND_KEY};

/// One user's study session
#[derive(Debug)]
pub struct StudyTracker {
    store: ProgressStore,
    settings: StudySettings,
    sound: SoundService,
    current_chapter: Option<u32>,
    pending: Option<PendingAction>,
}

impl StudyTracker {
    /// Open a session over persisted state
    pub fn open(
        catalog: Catalog,
        gateway: Gateway,
        clock: Clock,
        settings: StudySettings,
        sink: impl SoundSink + 'static,
    ) -> Self {
        let mut store = ProgressStore::open(catalog, gateway, clock);
        let sound_enabled = store.gateway_mut().load::<bool>(SOUND_KEY).unwrap_or(true);
        let current_chapter = store.first_incomplete();

        Self {
            store,
            settings: settings.sanitized(),
            sound: SoundService::new(sound_enabled, sink),
            current_chapter,
            pending: None,
        }
    }

    /// A session that keeps nothing beyond the process
    pub fn in_memory(clock: Clock, sink: impl SoundSink + 'static) -> Self {
        Self::open(Catalog::builtin(), Gateway::in_memory(), clock, StudySettings::default(), sink)
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn progress(&self, chapter_id: u32) -> ChapterProgress {
        self.store.get(chapter_id)
    }

    /// Apply an update, sound the headline event and advance past a
    /// freshly completed current chapter
    ///
    /// Finishing the book sounds twice: the chapter fanfare, then the book
    /// fanfare. Showing the book notice after [`Celebration::delay`] is left
    /// to the caller.
    pub fn update_chapter(
        &mut self,
        chapter_id: u32,
        update: ProgressUpdate,
    ) -> Result<UpdateOutcome, TrackerError> {
        let outcome = self.store.update(chapter_id, update)?;

        if let Some(event) = outcome.headline() {
            self.sound.announce(event);
        }
        if outcome.headline() != Some(&Celebration::BookCompleted)
            && outcome.events.contains(&Celebration::BookCompleted)
        {
            self.sound.announce(&Celebration::BookCompleted);
        }
        if outcome.newly_completed && self.current_chapter == Some(chapter_id) {
            self.current_chapter = self.store.first_incomplete();
        }
        Ok(outcome)
    }

    pub fn set_pages(&mut self, chapter_id: u32, pages: i64) -> Result<UpdateOutcome, TrackerError> {
        self.update_chapter(chapter_id, ProgressUpdate::new().pages_read(pages))
    }

    pub fn set_problems(
        &mut self,
        chapter_id: u32,
        problems: i64,
    ) -> Result<UpdateOutcome, TrackerError> {
        self.update_chapter(chapter_id, ProgressUpdate::new().problems_solved(problems))
    }

    pub fn toggle_quiz(&mut self, chapter_id: u32) -> Result<UpdateOutcome, TrackerError> {
        let done = self.store.get(chapter_id).mcq_completed;
        self.update_chapter(chapter_id, ProgressUpdate::new().mcq_completed(!done))
    }

    pub fn toggle_checkpoint(&mut self, chapter_id: u32) -> Result<UpdateOutcome, TrackerError> {
        let done = self.store.get(chapter_id).checkpoint_completed;
        self.update_chapter(chapter_id, ProgressUpdate::new().checkpoint_completed(!done))
    }

    pub fn current_chapter(&self) -> Option<u32> {
        self.current_chapter
    }

    /// Ids outside the catalog are ignored; returns whether it moved
    pub fn set_current_chapter(&mut self, chapter_id: u32) -> bool {
        if !self.store.catalog().contains(chapter_id) {
            tracing::debug!("Ignoring current chapter {}", chapter_id);
            return false;
        }
        self.current_chapter = Some(chapter_id);
        true
    }

    pub fn settings(&self) -> &StudySettings {
        &self.settings
    }

    /// Apply raw settings input; returns the value actually stored
    pub fn apply_setting(&mut self, field: SettingField, raw: &str) -> f64 {
        self.settings.apply_input(field, raw)
    }

    pub fn overview(&self) -> Overview {
        calculator::overview(self.store.catalog(), self.store.records())
    }

    pub fn time_estimates(&self) -> TimeEstimates {
        calculator::time_estimates(
            self.store.catalog(),
            self.store.records(),
            &self.settings,
            self.store.clock().today(),
        )
    }

    pub fn chapter_percent(&self, chapter_id: u32) -> Result<u32, TrackerError> {
        let chapter =
            self.store.catalog().get(chapter_id).ok_or(TrackerError::UnknownChapter(chapter_id))?;
        Ok(calculator::chapter_percent(chapter, &self.store.get(chapter_id)))
    }

    pub fn remaining(&self, chapter_id: u32) -> Result<RemainingTime, TrackerError> {
        let chapter =
            self.store.catalog().get(chapter_id).ok_or(TrackerError::UnknownChapter(chapter_id))?;
        Ok(calculator::remaining_time(chapter, &self.store.get(chapter_id), &self.settings))
    }

    /// Snapshot everything for backup
    pub fn export(&self) -> ExportBundle {
        ExportBundle::build(
            self.store.catalog(),
            self.store.records(),
            self.store.streak(),
            self.store.clock().now(),
        )
    }

    /// Write a dated export file into `dir`
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, TrackerError> {
        let path = self.export().write_to_dir(dir, self.store.clock().today())?;
        self.sound.announce(&Celebration::DataExported);
        Ok(path)
    }

    /// Read an import file and stage it for confirmation
    pub async fn import_file(&mut self, path: &Path) -> Result<&PendingAction, TrackerError> {
        let payload = export::read_import_file(path).await?;
        Ok(self.stage_import(payload))
    }

    /// Parse import text and stage it for confirmation
    pub fn import_text(&mut self, text: &str) -> Result<&PendingAction, TrackerError> {
        let payload = export::parse_import(text)?;
        Ok(self.stage_import(payload))
    }

    pub fn stage_import(&mut self, payload: ImportPayload) -> &PendingAction {
        self.pending.insert(PendingAction::Import(payload))
    }

    pub fn request_reset(&mut self) -> &PendingAction {
        self.pending.insert(PendingAction::Reset)
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Apply the pending action
    pub fn confirm(&mut self) -> Result<Option<Celebration>, TrackerError> {
        let action = self.pending.take().ok_or(TrackerError::NothingToConfirm)?;

        let event = match action {
            PendingAction::Import(payload) => {
                let chapters = payload.progress.len();
                self.store.replace_all(payload.progress, payload.streak);
                tracing::info!("Imported progress for {} chapters", chapters);
                self.sound.announce(&Celebration::DataImported);
                Some(Celebration::DataImported)
            }
            PendingAction::Reset => {
                self.store.reset();
                None
            }
        };

        self.current_chapter = self.store.first_incomplete();
        Ok(event)
    }

    /// Drop the pending action; returns whether there was one
    pub fn dismiss(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound.is_enabled()
    }

    /// Flip and persist the sound flag
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.sound.toggle();
        self.store.gateway_mut().save(SOUND_KEY, &enabled);
        enabled
    }
}
