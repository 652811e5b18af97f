//! Physical trigger to game intent mapping
//!
//! Events are applied synchronously as they arrive: no queue, no debounce.

use crate::sim::GameState;

/// A raw input event, as observed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger<'a> {
    /// Key-down with its physical `code` and logical `key`
    Key { code: &'a str, key: &'a str },
    /// Touch start anywhere on the page
    Touch,
}

/// What the player meant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Jump, or start/restart when not running
    Jump,
}

impl Trigger<'_> {
    /// Map to an intent. Unmapped keys yield `None` and must keep their
    /// default browser behavior.
    pub fn intent(&self) -> Option<Intent> {
        match *self {
            Trigger::Key { code, key } if code == "Space" || key == " " => Some(Intent::Jump),
            Trigger::Key { .. } => None,
            Trigger::Touch => Some(Intent::Jump),
        }
    }
}

/// Apply an intent to the game immediately
pub fn apply(state: &mut GameState, intent: Intent) {
    match intent {
        Intent::Jump => state.jump(),
    }
}

/// Map and apply in one step. Returns true if the trigger was consumed, in
/// which case the host should suppress its default action.
pub fn handle(state: &mut GameState, trigger: Trigger<'_>) -> bool {
    match trigger.intent() {
        Some(intent) => {
            apply(state, intent);
            true
        }
        None => false,
    }
}
