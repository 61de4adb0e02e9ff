//! Choice screen implementation
//!
//! Renders the question, the growing accept button, and the evading decline
//! button inside its containment zone, with decorative hearts drifting in
//! the background. The screen owns the cell-to-layout-unit mapping: the
//! evasion controller works in abstract units (10 per column, 20 per row)
//! so its geometry is independent of terminal cell shape.

use crate::config::GreetingConfig;
use crate::evade::{EvasionController, Point, Rect as UnitRect};
use crate::fx::HeartField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Layout units per terminal column
pub const UNITS_PER_COL: f32 = 10.0;
/// Layout units per terminal row (cells are roughly twice as tall as wide)
pub const UNITS_PER_ROW: f32 = 20.0;

const ACCEPT_BASE_WIDTH: f32 = 12.0;
const ACCEPT_BASE_HEIGHT: f32 = 3.0;
const DECLINE_WIDTH: u16 = 8;
const DECLINE_HEIGHT: u16 = 3;

/// Choice screen component
pub struct ChoiceScreen {
    controller: EvasionController,
    hearts: HeartField,
    /// Inner cells of the containment zone from the last render
    zone_area: Option<Rect>,
    yes_area: Option<Rect>,
    no_area: Option<Rect>,
}

impl ChoiceScreen {
    pub fn new(controller: EvasionController) -> Self {
        Self {
            controller,
            hearts: HeartField::new(),
            zone_area: None,
            yes_area: None,
            no_area: None,
        }
    }

    pub fn controller(&self) -> &EvasionController {
        &self.controller
    }

    /// Advance background animations
    pub fn tick(&mut self, dt: f32) {
        self.hearts.tick(dt);
    }

    /// Feed a pointer-move event at cell coordinates.
    ///
    /// Bounds are taken from the last rendered layout; before the first
    /// render this is a no-op guard. Returns `true` if a dodge fired.
    pub fn on_pointer_move(&mut self, column: u16, row: u16) -> bool {
        let (Some(zone), Some(no)) = (self.zone_area, self.no_area) else {
            return false;
        };
        let pointer = cell_center(column, row);
        self.controller
            .on_pointer_move(pointer, rect_to_units(zone), rect_to_units(no))
    }

    /// Relocate the decline button to a random padded position
    pub fn idle_reposition(&mut self) {
        let (Some(zone), Some(no)) = (self.zone_area, self.no_area) else {
            return;
        };
        self.controller
            .idle_reposition(rect_to_units(zone), rect_to_units(no));
    }

    /// Draw the next idle delay from the controller's configured range
    pub fn next_idle_delay(&mut self) -> std::time::Duration {
        self.controller.next_idle_delay()
    }

    /// Whether a click at these cells hits the accept button
    pub fn accept_hit(&self, column: u16, row: u16) -> bool {
        self.yes_area.is_some_and(|a| contains(a, column, row))
    }

    /// Whether a click at these cells hits the decline button.
    ///
    /// Hitting it does nothing; the decline action is a no-op by design.
    pub fn decline_hit(&self, column: u16, row: u16) -> bool {
        self.no_area.is_some_and(|a| contains(a, column, row))
    }

    /// Render the choice screen
    pub fn render(&mut self, f: &mut Frame, config: &GreetingConfig) {
        let size = f.size();

        // Hearts drift behind everything else
        f.render_widget(&self.hearts, size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Question
                Constraint::Min(9),    // Containment zone
                Constraint::Length(1), // Plea
                Constraint::Length(3), // Help
            ])
            .split(size);

        self.render_question(f, chunks[0], config);
        self.render_zone(f, chunks[1], config);
        self.render_plea(f, chunks[2], config);
        self.render_help(f, chunks[3]);
    }

    fn render_question(&self, f: &mut Frame, area: Rect, config: &GreetingConfig) {
        let question = Paragraph::new(config.question.as_str())
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
        f.render_widget(question, area);
    }

    fn render_zone(&mut self, f: &mut Frame, area: Rect, config: &GreetingConfig) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.zone_area = Some(inner);
        if inner.width == 0 || inner.height == 0 {
            self.yes_area = None;
            self.no_area = None;
            return;
        }

        // Accept button, magnified by the controller's scale
        let scale = self.controller.accept_scale();
        let w = ((ACCEPT_BASE_WIDTH * scale).round() as u16).min(inner.width);
        let h = ((ACCEPT_BASE_HEIGHT * scale).round() as u16)
            .clamp(DECLINE_HEIGHT, inner.height.max(DECLINE_HEIGHT));
        let x = (inner.x + inner.width / 5).min(inner.right().saturating_sub(w));
        let y = inner.y + inner.height.saturating_sub(h) / 2;
        let yes = Rect::new(x, y, w, h.min(inner.height));
        let yes_widget = Paragraph::new(config.accept_label.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(yes_widget, yes);
        self.yes_area = Some(yes);

        // Decline button: centered sentinel placement until the first move
        let no = match self.controller.position() {
            None => {
                let w = DECLINE_WIDTH.min(inner.width);
                let h = DECLINE_HEIGHT.min(inner.height);
                let x = (inner.x + (inner.width as f32 * 0.62) as u16)
                    .min(inner.right().saturating_sub(w));
                Rect::new(x, inner.y + inner.height.saturating_sub(h) / 2, w, h)
            }
            Some(p) => {
                let col = inner.x + (p.x / UNITS_PER_COL).round() as u16;
                let row = inner.y + (p.y / UNITS_PER_ROW).round() as u16;
                let w = DECLINE_WIDTH.min(inner.width);
                let h = DECLINE_HEIGHT.min(inner.height);
                Rect::new(
                    col.min(inner.right().saturating_sub(w)),
                    row.min(inner.bottom().saturating_sub(h)),
                    w,
                    h,
                )
            }
        };
        let no_widget = Paragraph::new(config.decline_label.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(no_widget, no);
        self.no_area = Some(no);
    }

    fn render_plea(&self, f: &mut Frame, area: Rect, config: &GreetingConfig) {
        let plea = Paragraph::new(config.plea.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(plea, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "Click",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" or "),
            Span::styled(
                "Y",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Accept  "),
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

/// Center of a terminal cell in layout units
fn cell_center(column: u16, row: u16) -> Point {
    Point::new(
        column as f32 * UNITS_PER_COL + UNITS_PER_COL / 2.0,
        row as f32 * UNITS_PER_ROW + UNITS_PER_ROW / 2.0,
    )
}

/// A cell rect expressed in layout units
fn rect_to_units(r: Rect) -> UnitRect {
    UnitRect::new(
        r.x as f32 * UNITS_PER_COL,
        r.y as f32 * UNITS_PER_ROW,
        r.width as f32 * UNITS_PER_COL,
        r.height as f32 * UNITS_PER_ROW,
    )
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evade::EvadeSettings;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered_screen() -> ChoiceScreen {
        let controller = EvasionController::with_seed(EvadeSettings::default(), 9);
        let mut screen = ChoiceScreen::new(controller);
        let config = GreetingConfig::default();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| screen.render(f, &config)).unwrap();
        screen
    }

    #[test]
    fn test_pointer_move_before_first_render_is_noop() {
        let controller = EvasionController::with_seed(EvadeSettings::default(), 9);
        let mut screen = ChoiceScreen::new(controller);
        assert!(!screen.on_pointer_move(10, 10));
        screen.idle_reposition();
        assert!(screen.controller().position().is_none());
    }

    #[test]
    fn test_render_measures_button_areas() {
        let screen = rendered_screen();
        assert!(screen.zone_area.is_some());
        assert!(screen.yes_area.is_some());
        assert!(screen.no_area.is_some());
    }

    #[test]
    fn test_pointer_near_decline_triggers_dodge() {
        let mut screen = rendered_screen();
        let no = screen.no_area.unwrap();
        let (col, row) = (no.x + no.width / 2, no.y + no.height / 2);
        assert!(screen.on_pointer_move(col, row));
        assert!(screen.controller().position().is_some());
        assert!(screen.controller().accept_scale() > 1.0);
    }

    #[test]
    fn test_pointer_far_from_decline_is_ignored() {
        let mut screen = rendered_screen();
        // Top-left corner is well outside the detection radius
        assert!(!screen.on_pointer_move(0, 0));
        assert!(screen.controller().position().is_none());
    }

    #[test]
    fn test_accept_hit_testing() {
        let screen = rendered_screen();
        let yes = screen.yes_area.unwrap();
        assert!(screen.accept_hit(yes.x, yes.y));
        assert!(!screen.accept_hit(yes.right(), yes.y));
    }

    #[test]
    fn test_idle_reposition_after_render() {
        let mut screen = rendered_screen();
        screen.idle_reposition();
        assert!(screen.controller().position().is_some());
        // Idle movement alone never grows the accept button
        assert_eq!(screen.controller().accept_scale(), 1.0);
    }
}
