use super::board::Bounds;
use super::paused::Paused;
use super::{Cause, GameState};
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::collections::VecDeque;

/// Everything needed to draw one frame of a game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Scene<'a> {
    /// The snake's segments, head first
    pub(crate) segments: &'a VecDeque<Position>,
    pub(crate) head_symbol: char,
    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    /// Did the game that just ended set a new high score?
    pub(crate) record: bool,
    pub(crate) state: GameState,
    pub(crate) bounds: Bounds,
    /// Extra instructions to show below the grid while the game is running
    pub(crate) hint: Option<&'static str>,
}

impl<'a> Scene<'a> {
    pub(crate) fn with_hint(self, hint: Option<&'static str>) -> Scene<'a> {
        Scene { hint, ..self }
    }
}

impl Widget for Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}  High Score: {}", self.score, self.high_score),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let mut block_size = self.bounds.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let grid_area = block_area.inner(Margin::new(1, 1));
        let mut grid = Canvas {
            area: grid_area,
            buf,
        };
        for &p in self.segments.iter().skip(1) {
            grid.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(pos) = self.food {
            grid.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(&head) = self.segments.front() {
            if matches!(
                self.state,
                GameState::GameOver(Cause::Wall | Cause::SelfCollision)
            ) {
                grid.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                grid.draw_cell(head, self.head_symbol, consts::SNAKE_STYLE);
            }
        }

        match self.state {
            GameState::Running => {
                if let Some(hint) = self.hint {
                    Span::from(format!(" {hint}")).render(msg1_area, buf);
                }
                Line::from_iter([
                    Span::raw(" Pause ("),
                    Span::styled("p", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            GameState::Paused => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                Paused.render(pause_area, buf);
            }
            GameState::GameOver(cause) => {
                let mut line = Line::raw(format!(" — GAME OVER: {} —", cause.describe()));
                if self.record {
                    line.push_span(" ");
                    line.push_span(Span::styled("New high score!", consts::RECORD_STYLE));
                }
                line.render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` at grid position `pos`.  Positions outside the canvas
    /// (as happens when the grid is larger than the screen) are skipped.
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let (x, y) = (self.area.x + pos.x, self.area.y + pos.y);
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
