use super::action::Action;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Per-button visual feedback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Feedback {
    /// Multiplier on the pop distance.
    pub extension: f64,
    pub emphasized: bool,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            extension: 1.0,
            emphasized: false,
        }
    }
}

/// Outcome of one pointer sample. Always carries feedback for every action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    committed: Option<Action>,
    candidate: Option<Action>,
    feedback: BTreeMap<Action, Feedback>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            committed: None,
            candidate: None,
            feedback: Action::iter().map(|a| (a, Feedback::default())).collect(),
        }
    }
}

impl SelectionState {
    /// Pointer is short of the commit distance; the candidate is stretched by `extension`.
    pub fn approaching(candidate: Option<Action>, extension: f64) -> Self {
        let mut state = Self {
            candidate,
            ..Self::default()
        };
        if let Some(action) = candidate {
            state.set(
                action,
                Feedback {
                    extension,
                    emphasized: false,
                },
            );
        }
        state
    }

    /// Pointer is past the commit distance; the candidate, if any, becomes committed.
    pub fn committing(candidate: Option<Action>) -> Self {
        let mut state = Self {
            committed: candidate,
            candidate,
            ..Self::default()
        };
        if let Some(action) = candidate {
            state.set(
                action,
                Feedback {
                    extension: 1.0,
                    emphasized: true,
                },
            );
        }
        state
    }

    fn set(&mut self, action: Action, feedback: Feedback) {
        self.feedback.insert(action, feedback);
    }

    pub fn committed(&self) -> Option<Action> {
        self.committed
    }

    pub fn candidate(&self) -> Option<Action> {
        self.candidate
    }

    pub fn feedback(&self, action: Action) -> Feedback {
        self.feedback.get(&action).copied().unwrap_or_default()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
