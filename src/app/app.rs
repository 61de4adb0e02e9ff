//! Main application controller
//!
//! Manages the TUI, application state, the idle-reposition timer, audio
//! retry scheduling, and the screen rendering loop.

use crate::{
    app::{
        screens::{CelebrationScreen, ChoiceScreen},
        state::{AppState, InputAction, StateManager},
        tui::Tui,
    },
    audio::{MusicPlayer, RodioBackend},
    config::GreetingConfig,
    evade::EvasionController,
    Result,
};
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use std::time::Instant;
use tracing::{debug, info};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Application state manager
    state_manager: StateManager,
    /// Application config
    config: GreetingConfig,
    /// Screen components
    choice_screen: ChoiceScreen,
    celebration_screen: CelebrationScreen,
    /// Background music, absent when no track is configured
    player: Option<MusicPlayer<RodioBackend>>,
    last_frame: Instant,
}

impl App {
    /// Create a new application instance
    pub fn new(config: GreetingConfig) -> Result<Self> {
        config.validate()?;
        let controller = EvasionController::new(config.evade.clone());
        let celebration_screen = CelebrationScreen::new(&config);
        let player = config.audio.track.as_ref().map(|track| {
            let backend = RodioBackend::new(track.clone(), config.audio.looped);
            MusicPlayer::new(backend, config.audio.volume)
        });
        Ok(Self {
            tui: Tui::new()?,
            state_manager: StateManager::new(),
            choice_screen: ChoiceScreen::new(controller),
            celebration_screen,
            config,
            player,
            last_frame: Instant::now(),
        })
    }

    /// Initialize the terminal and arm the startup schedules
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        let now = Instant::now();
        let delay = self.choice_screen.next_idle_delay();
        self.state_manager.arm_idle(now + delay);
        if self.config.audio.autoplay {
            if let Some(player) = &mut self.player {
                player.schedule_startup_attempts(now);
            }
        }
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            let now = Instant::now();
            self.tick(now).await;
            self.draw()?;
            if let Some(event) = self.tui.poll_event()? {
                self.handle_event(event, Instant::now());
            }
        }
        Ok(())
    }

    /// Advance animations, the idle timer, and due audio attempts
    async fn tick(&mut self, now: Instant) {
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(0.25);
        self.last_frame = now;

        match self.state_manager.current_state() {
            AppState::Choice => {
                self.choice_screen.tick(dt);
                if self.state_manager.idle_due(now) {
                    debug!("idle reposition fired");
                    self.choice_screen.idle_reposition();
                    let delay = self.choice_screen.next_idle_delay();
                    self.state_manager.arm_idle(now + delay);
                }
            }
            AppState::Celebration => {
                self.celebration_screen.tick(now, dt);
            }
        }

        if let Some(player) = &mut self.player {
            if player.attempt_due(now) {
                player.attempt_autoplay().await;
            }
        }
    }

    /// Draw the current screen
    fn draw(&mut self) -> Result<()> {
        let state = self.state_manager.current_state();
        let config = &self.config;
        let choice_screen = &mut self.choice_screen;
        let celebration_screen = &mut self.celebration_screen;
        self.tui.draw(|f| match state {
            AppState::Choice => choice_screen.render(f, config),
            AppState::Celebration => celebration_screen.render(f, config),
        })?;
        Ok(())
    }

    /// Handle one input event
    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Key presses are qualifying interactions for audio
                if let Some(player) = &mut self.player {
                    player.on_interaction();
                }
                self.handle_action(StateManager::key_to_action(key), now);
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    if !self.state_manager.result_shown() {
                        self.choice_screen.on_pointer_move(mouse.column, mouse.row);
                    }
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(player) = &mut self.player {
                        player.on_interaction();
                    }
                    self.handle_click(mouse.column, mouse.row, now);
                }
                _ => {}
            },
            Event::FocusGained => {
                if let Some(player) = &mut self.player {
                    if self.config.audio.autoplay {
                        player.on_focus_gained(now);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_action(&mut self, action: InputAction, now: Instant) {
        match action {
            InputAction::Quit => self.state_manager.quit(),
            InputAction::Accept => {
                if self.state_manager.current_state() == AppState::Choice {
                    self.activate_accept(now);
                }
            }
            InputAction::Dismiss => match self.state_manager.current_state() {
                AppState::Choice => self.state_manager.quit(),
                AppState::Celebration => self.celebration_screen.close_message(),
            },
            InputAction::ToggleMusic => {
                if let Some(player) = &mut self.player {
                    player.toggle_play();
                }
            }
            InputAction::ToggleMute => {
                if let Some(player) = &mut self.player {
                    player.toggle_mute();
                }
            }
            InputAction::None => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16, now: Instant) {
        match self.state_manager.current_state() {
            AppState::Choice => {
                if self.choice_screen.accept_hit(column, row) {
                    self.activate_accept(now);
                } else if self.choice_screen.decline_hit(column, row) {
                    // Catching the decline button does nothing by design
                    debug!("decline button clicked, ignoring");
                }
            }
            AppState::Celebration => {
                self.celebration_screen.on_click(column, row);
            }
        }
    }

    /// Switch to the celebration view exactly once
    fn activate_accept(&mut self, now: Instant) {
        if !self.state_manager.show_result() {
            return;
        }
        info!("accepted, starting celebration");
        self.celebration_screen.activate(now);
        if let Some(player) = &mut self.player {
            player.ensure_playing();
        }
    }
}
