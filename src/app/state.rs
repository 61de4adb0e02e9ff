//! Application state management
//!
//! Handles the one-way choice/celebration transition and keyboard event
//! mapping for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Application views/states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// The question with the accept and decline buttons
    Choice,
    /// Terminal celebration view after accepting
    Celebration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::Choice
    }
}

/// Actions triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Accept the question (Enter, y)
    Accept,
    /// Dismiss the current overlay, or leave from the choice view (Esc)
    Dismiss,
    /// Toggle music play/pause (p)
    ToggleMusic,
    /// Toggle mute (m)
    ToggleMute,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
///
/// The choice-to-celebration transition is one-way; there is no path back
/// within a session.
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    should_quit: bool,
    /// Next idle-reposition firing; cleared for good on the transition
    idle_deadline: Option<Instant>,
}

impl StateManager {
    /// Create a new state manager starting at the choice view
    pub fn new() -> Self {
        Self {
            current_state: AppState::Choice,
            should_quit: false,
            idle_deadline: None,
        }
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Whether the terminal celebration view has been reached
    pub fn result_shown(&self) -> bool {
        self.current_state == AppState::Celebration
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to the celebration view.
    ///
    /// Returns `true` only on the first call; activation is idempotent in
    /// effect afterwards.
    pub fn show_result(&mut self) -> bool {
        if self.current_state == AppState::Celebration {
            return false;
        }
        self.current_state = AppState::Celebration;
        // The decline button no longer exists; the idle timer dies with it
        self.idle_deadline = None;
        true
    }

    /// Arm the idle-reposition timer. Ignored in the celebration view.
    pub fn arm_idle(&mut self, deadline: Instant) {
        if self.current_state == AppState::Choice {
            self.idle_deadline = Some(deadline);
        }
    }

    /// Whether the idle timer fires at `now`; a firing disarms it until the
    /// next `arm_idle`. Never fires once the result is shown.
    pub fn idle_due(&mut self, now: Instant) -> bool {
        if self.current_state != AppState::Choice {
            return false;
        }
        if self.idle_deadline.is_some_and(|deadline| now >= deadline) {
            self.idle_deadline = None;
            return true;
        }
        false
    }

    pub fn idle_armed(&self) -> bool {
        self.idle_deadline.is_some()
    }

    /// Convert a keyboard event to an input action
    pub fn key_to_action(key: KeyEvent) -> InputAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }

            // Accept via keyboard
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => InputAction::Accept,

            // Overlay dismissal / leave
            KeyCode::Esc => InputAction::Dismiss,

            // Music controls
            KeyCode::Char('p') | KeyCode::Char('P') => InputAction::ToggleMusic,
            KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMute,

            _ => InputAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    #[test]
    fn test_state_manager_creation() {
        let state_manager = StateManager::new();
        assert_eq!(state_manager.current_state(), AppState::Choice);
        assert!(!state_manager.should_quit());
        assert!(!state_manager.result_shown());
    }

    #[test]
    fn test_show_result_transitions_once() {
        let mut state_manager = StateManager::new();

        assert!(state_manager.show_result());
        assert_eq!(state_manager.current_state(), AppState::Celebration);
        assert!(state_manager.result_shown());

        // Second activation is a no-op
        assert!(!state_manager.show_result());
        assert_eq!(state_manager.current_state(), AppState::Celebration);
    }

    #[test]
    fn test_no_path_back_to_choice() {
        let mut state_manager = StateManager::new();
        state_manager.show_result();
        // There is no transition API that leaves Celebration
        assert!(state_manager.result_shown());
    }

    #[test]
    fn test_idle_timer_fires_and_disarms() {
        let mut state_manager = StateManager::new();
        let t0 = Instant::now();
        assert!(!state_manager.idle_due(t0));

        state_manager.arm_idle(t0 + Duration::from_secs(2));
        assert!(!state_manager.idle_due(t0 + Duration::from_secs(1)));
        assert!(state_manager.idle_due(t0 + Duration::from_secs(2)));

        // Disarmed after firing until re-armed
        assert!(!state_manager.idle_armed());
        assert!(!state_manager.idle_due(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn test_idle_timer_never_fires_after_result() {
        let mut state_manager = StateManager::new();
        let t0 = Instant::now();
        state_manager.arm_idle(t0 + Duration::from_secs(2));

        state_manager.show_result();
        assert!(!state_manager.idle_armed());
        assert!(!state_manager.idle_due(t0 + Duration::from_secs(60)));

        // Re-arming after the transition is ignored too
        state_manager.arm_idle(t0 + Duration::from_secs(61));
        assert!(!state_manager.idle_armed());
        assert!(!state_manager.idle_due(t0 + Duration::from_secs(120)));
    }

    #[test]
    fn test_quit_handling() {
        let mut state_manager = StateManager::new();
        state_manager.quit();
        assert!(state_manager.should_quit());
    }

    #[test]
    fn test_key_to_action() {
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::Accept
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE)),
            InputAction::Accept
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            InputAction::Dismiss
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE)),
            InputAction::ToggleMusic
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE)),
            InputAction::ToggleMute
        );
        assert_eq!(
            StateManager::key_to_action(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            InputAction::None
        );
    }
}
