//! Celebration screen implementation
//!
//! The terminal view after accepting: headline, confetti raining over the
//! whole frame, and the message box overlay on top.

use crate::config::GreetingConfig;
use crate::fx::{CelebrationSequencer, ConfettiEngine, MessageBox};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const HEART_ART: &str = "  .:::.   .:::.
 :::::::.:::::::
 :::::::::::::::
 ':::::::::::::'
   ':::::::::'
     ':::::'
       ':'";

/// Celebration screen component
pub struct CelebrationScreen {
    confetti: ConfettiEngine,
    sequencer: CelebrationSequencer,
    message: MessageBox,
}

impl CelebrationScreen {
    pub fn new(config: &GreetingConfig) -> Self {
        let auto_close = config.auto_close_secs.map(Duration::from_secs_f32);
        Self {
            confetti: ConfettiEngine::new(),
            sequencer: CelebrationSequencer::new(),
            message: MessageBox::new(
                config.message_title.clone(),
                config.message_body.clone(),
                auto_close,
            ),
        }
    }

    /// Start the celebration at `t0`. Idempotent after the first call: a
    /// repeated activation neither re-triggers the bursts nor re-opens the
    /// message box.
    pub fn activate(&mut self, t0: Instant) -> bool {
        if !self.sequencer.activate(t0) {
            return false;
        }
        self.message.open(t0);
        true
    }

    pub fn is_activated(&self) -> bool {
        self.sequencer.is_activated()
    }

    /// Advance choreography and particles
    pub fn tick(&mut self, now: Instant, dt: f32) {
        if self.sequencer.is_running(now) {
            self.sequencer.tick(now, &mut self.confetti);
        }
        self.confetti.tick(dt);
        self.message.tick(now);
    }

    pub fn message_open(&self) -> bool {
        self.message.is_open()
    }

    pub fn close_message(&mut self) {
        self.message.close();
    }

    /// Route a click to the message box; backdrop and button clicks dismiss
    pub fn on_click(&mut self, column: u16, row: u16) -> bool {
        self.message.on_click(column, row)
    }

    #[cfg(test)]
    pub fn confetti_count(&self) -> usize {
        self.confetti.particle_count()
    }

    /// Render the celebration screen
    pub fn render(&mut self, f: &mut Frame, config: &GreetingConfig) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Headline
                Constraint::Min(8),     // Heart art
                Constraint::Length(3),  // Help
            ])
            .split(size);

        self.render_headline(f, chunks[0], config);
        self.render_art(f, chunks[1]);
        self.render_help(f, chunks[2]);

        // Confetti falls over everything, the modal sits on top of that
        f.render_widget(&self.confetti, size);
        self.message.render(f, size);
    }

    fn render_headline(&self, f: &mut Frame, area: Rect, config: &GreetingConfig) {
        let headline = Paragraph::new(config.accepted_title.as_str())
            .style(
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            );
        f.render_widget(headline, area);
    }

    fn render_art(&self, f: &mut Frame, area: Rect) {
        let art = Paragraph::new(HEART_ART)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(art, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Close message  "),
            Span::styled(
                "P",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Music  "),
            Span::styled(
                "M",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Mute  "),
            Span::styled(
                "Q",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(help, area);
    }
}
