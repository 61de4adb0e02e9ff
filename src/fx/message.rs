//! Message box overlay
//!
//! A modal with title and body shown over the celebration view. Dismissed
//! by the close button, the backdrop, a key, or an optional auto-close
//! timer (disabled by default, so the modal persists until dismissed).

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use std::time::{Duration, Instant};

/// Modal message overlay state
#[derive(Debug)]
pub struct MessageBox {
    title: String,
    body: String,
    auto_close: Option<Duration>,
    open: bool,
    opened_at: Option<Instant>,
    /// Cell rect of the modal from the last render, for hit-testing
    modal_area: Option<Rect>,
}

impl MessageBox {
    pub fn new(title: String, body: String, auto_close: Option<Duration>) -> Self {
        Self {
            title,
            body,
            auto_close,
            open: false,
            opened_at: None,
            modal_area: None,
        }
    }

    pub fn open(&mut self, now: Instant) {
        self.open = true;
        self.opened_at = Some(now);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.opened_at = None;
        self.modal_area = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Fire the auto-close timer if one is configured
    pub fn tick(&mut self, now: Instant) {
        if !self.open {
            return;
        }
        if let (Some(opened), Some(after)) = (self.opened_at, self.auto_close) {
            if now.duration_since(opened) >= after {
                self.close();
            }
        }
    }

    /// Handle a click at cell coordinates; backdrop clicks dismiss.
    ///
    /// Returns `true` if the click closed the modal. Before the first render
    /// the modal has no area, so clicks are a no-op.
    pub fn on_click(&mut self, column: u16, row: u16) -> bool {
        if !self.open {
            return false;
        }
        let Some(area) = self.modal_area else {
            return false;
        };
        let inside = column >= area.x
            && column < area.right()
            && row >= area.y
            && row < area.bottom();
        if !inside || row == area.bottom().saturating_sub(2) {
            // Backdrop or the close-button line
            self.close();
            return true;
        }
        false
    }

    /// Render the modal centered in `area`
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        if !self.open {
            return;
        }
        let width = (area.width * 3 / 5).clamp(20, 54).min(area.width);
        let height = 9.min(area.height);
        let modal = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        self.modal_area = Some(modal);

        f.render_widget(Clear, modal);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightMagenta))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(modal);
        f.render_widget(block, modal);
        if inner.height < 2 {
            return;
        }

        let body_area = Rect::new(
            inner.x,
            inner.y + 1.min(inner.height - 2),
            inner.width,
            inner.height - 2,
        );
        let body = Paragraph::new(Line::from(Span::styled(
            self.body.clone(),
            Style::default().fg(Color::White),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(body, body_area);

        // Close button on the last inner row, matching on_click's row check
        let button_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
        let button = Paragraph::new(Span::styled(
            "[ close ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        f.render_widget(button, button_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close() {
        let mut mb = MessageBox::new("hi".into(), "there".into(), None);
        assert!(!mb.is_open());
        mb.open(Instant::now());
        assert!(mb.is_open());
        mb.close();
        assert!(!mb.is_open());
    }

    #[test]
    fn test_auto_close_disabled_persists() {
        let mut mb = MessageBox::new("hi".into(), "there".into(), None);
        let t0 = Instant::now();
        mb.open(t0);
        mb.tick(t0 + Duration::from_secs(3600));
        assert!(mb.is_open());
    }

    #[test]
    fn test_auto_close_fires() {
        let mut mb =
            MessageBox::new("hi".into(), "there".into(), Some(Duration::from_secs(5)));
        let t0 = Instant::now();
        mb.open(t0);
        mb.tick(t0 + Duration::from_secs(4));
        assert!(mb.is_open());
        mb.tick(t0 + Duration::from_secs(5));
        assert!(!mb.is_open());
    }

    #[test]
    fn test_click_before_first_render_is_noop() {
        let mut mb = MessageBox::new("hi".into(), "there".into(), None);
        mb.open(Instant::now());
        assert!(!mb.on_click(10, 10));
        assert!(mb.is_open());
    }

    #[test]
    fn test_backdrop_click_dismisses() {
        let mut mb = MessageBox::new("hi".into(), "there".into(), None);
        mb.open(Instant::now());
        mb.modal_area = Some(Rect::new(20, 5, 30, 9));
        // Inside the content: stays open
        assert!(!mb.on_click(25, 7));
        assert!(mb.is_open());
        // Outside the modal: closes
        assert!(mb.on_click(2, 2));
        assert!(!mb.is_open());
    }

    #[test]
    fn test_close_button_row_dismisses() {
        let mut mb = MessageBox::new("hi".into(), "there".into(), None);
        mb.open(Instant::now());
        mb.modal_area = Some(Rect::new(20, 5, 30, 9));
        // bottom() is 14; the button line sits at row 12
        assert!(mb.on_click(30, 12));
        assert!(!mb.is_open());
    }
}
