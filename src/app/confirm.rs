//! Actions that overwrite data and must be confirmed first

use crate::export::ImportPayload;

/// An action waiting for the user to say yes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace all progress with parsed import contents
    Import(ImportPayload),
    /// Delete all progress and streak data
    Reset,
}

impl PendingAction {
    /// Question to put to the user
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Import(payload) => format!(
                "Importing will overwrite your current progress with {} chapter records. Continue?",
                payload.progress.len()
            ),
            PendingAction::Reset => {
                "Are you sure you want to reset all progress? This cannot be undone.".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn prompts_mention_consequences() {
        let import = PendingAction::Import(ImportPayload { progress: BTreeMap::new(), streak: None });
        assert!(import.prompt().contains("overwrite"));
        assert!(PendingAction::Reset.prompt().contains("cannot be undone"));
    }
}
