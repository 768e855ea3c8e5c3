//! Editing the button label directly on the canvas

use crate::errors::EditorResult;
use crate::instance::ComponentInstance;
use crate::trait_store::TraitChange;
use pagekit_common::{TraitKey, DEFAULT_TEXT};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const EDIT_PROMPT: &str = "Enter button text:";
pub const EDIT_HINT_TITLE: &str = "Double-click to edit text";

/// User gesture delivered by the host's canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    DoubleClick,
    /// Keyboard activation, accepted in place of any pointer gesture
    Activate,
}

impl Gesture {
    pub fn triggers(&self, bound: Gesture) -> bool {
        *self == bound || *self == Gesture::Activate
    }
}

/// Text-entry dialog provided by the host
pub trait Prompt {
    /// `None` when the user cancels
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn prompt(&mut self, message: &str, initial: &str) -> Option<String> {
        self(message, initial)
    }
}

impl ComponentInstance {
    /// Run the inline edit flow for `gesture`.
    ///
    /// Returns the committed change, or `None` when the gesture is not bound,
    /// the prompt was cancelled or the text is unchanged.
    pub fn handle_gesture(
        &mut self,
        gesture: Gesture,
        prompt: &mut dyn Prompt,
    ) -> EditorResult<Option<TraitChange>> {
        if !gesture.triggers(self.view().edit_gesture) {
            return Ok(None);
        }

        let current = if self.snapshot().text.is_empty() {
            DEFAULT_TEXT.to_string()
        } else {
            self.snapshot().text.clone()
        };

        let message = self.view().prompt_message.clone();
        let Some(answer) = prompt.prompt(&message, &current) else {
            debug!(instance = %self.id(), "Inline edit cancelled");
            return Ok(None);
        };
        if answer == current {
            return Ok(None);
        }

        self.set_trait(TraitKey::Text, answer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_always_triggers() {
        assert!(Gesture::Activate.triggers(Gesture::DoubleClick));
        assert!(Gesture::DoubleClick.triggers(Gesture::DoubleClick));
        assert!(!Gesture::DoubleClick.triggers(Gesture::Activate));
    }

    #[test]
    fn test_closure_prompt() {
        let mut seen = Vec::new();
        let mut prompt = |message: &str, initial: &str| {
            seen.push((message.to_string(), initial.to_string()));
            Some("New".to_string())
        };
        assert_eq!(prompt.prompt("Q", "old"), Some("New".to_string()));
        assert_eq!(seen, vec![("Q".to_string(), "old".to_string())]);
    }
}
