//! Sound categories and dispatch to an external player

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Celebration;

/// Sound played for a celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundCategory {
    SmallWin,
    MediumWin,
    BigWin,
    BiggestWin,
    Click,
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundCategory::SmallWin => "smallWin",
            SoundCategory::MediumWin => "mediumWin",
            SoundCategory::BigWin => "bigWin",
            SoundCategory::BiggestWin => "biggestWin",
            SoundCategory::Click => "click",
        };
        f.write_str(name)
    }
}

/// Whatever actually makes noise
pub trait SoundSink {
    fn play(&self, sound: SoundCategory);
}

/// A sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&self, _sound: SoundCategory) {}
}

/// Routes sounds to a [`SoundSink`] when sound is enabled
pub struct SoundService {
    enabled: bool,
    sink: Box<dyn SoundSink>,
}

impl SoundService {
    pub fn new(enabled: bool, sink: impl SoundSink + 'static) -> Self {
        Self { enabled, sink: Box::new(sink) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the flag; a click confirms that sound is back on
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.play(SoundCategory::Click);
        self.enabled
    }

    pub fn play(&self, sound: SoundCategory) {
        if self.enabled {
            self.sink.play(sound);
        }
    }

    pub fn announce(&self, celebration: &Celebration) {
        self.play(celebration.sound());
    }
}

impl Default for SoundService {
    fn default() -> Self {
        Self::new(true, Silent)
    }
}

impl fmt::Debug for SoundService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundService").field("enabled", &self.enabled).finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn announce_plays_mapped_sound() {
        let sink = RecordingSink::default();
        let service = SoundService::new(true, sink.clone());
        service.announce(&Celebration::BookCompleted);
        assert_eq!(*sink.played.borrow(), vec![SoundCategory::BiggestWin]);
    }

    #[test]
    fn disabled_service_is_silent() {
        let sink = RecordingSink::default();
        let service = SoundService::new(false, sink.clone());
        service.announce(&Celebration::DataExported);
        assert!(sink.played.borrow().is_empty());
    }

    #[test]
    fn toggle_on_clicks_toggle_off_does_not() {
        let sink = RecordingSink::default();
        let mut service = SoundService::new(true, sink.clone());

        assert!(!service.toggle());
        assert!(sink.played.borrow().is_empty());

        assert!(service.toggle());
        assert_eq!(*sink.played.borrow(), vec![SoundCategory::Click]);
    }

    #[test]
    fn categories_display_camel_case() {
        assert_eq!(SoundCategory::BiggestWin.to_string(), "biggestWin");
        assert_eq!(serde_json::to_string(&SoundCategory::SmallWin).unwrap(), "\"smallWin\"");
    }
}
