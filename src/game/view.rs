use super::food::{Food, Hazard};
use super::grid::Bounds;
use super::snake::Snake;
use super::GameState;
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// A read-only snapshot of everything needed to draw one frame of a game
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GameView<'a> {
    pub(super) bounds: Bounds,
    pub(super) snake: &'a Snake,
    pub(super) food: Food,
    pub(super) score: i32,
    pub(super) walls: bool,
    pub(super) state: GameState,
}

impl GameView<'_> {
    fn status_line(&self) -> Line<'static> {
        Line::styled(
            format!(
                " Score: {}  Size: {}  Speed: {:.2}  Walls: {}",
                self.score,
                self.snake.len(),
                self.snake.speed(),
                if self.walls { "on" } else { "off" },
            ),
            consts::STATUS_BAR_STYLE,
        )
    }

    fn message_line(&self) -> Line<'static> {
        match self.state {
            GameState::Running => Line::from_iter([
                Span::raw(" Move: "),
                Span::styled("←↓↑→", consts::KEY_STYLE),
                Span::raw("  Pause: "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw("  Walls: "),
                Span::styled("w", consts::KEY_STYLE),
                Span::raw("  Quit: "),
                Span::styled("q", consts::KEY_STYLE),
            ]),
            GameState::Paused => Line::from_iter([
                Span::raw(" — PAUSED — Resume: "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw("  Quit: "),
                Span::styled("q", consts::KEY_STYLE),
            ]),
            GameState::Dead => Line::raw(" — GAME OVER —"),
            GameState::Exhausted => Line::raw(" — BOARD FULL —"),
            GameState::Quit => Line::default(),
        }
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [status_area, board_area, message_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.status_line().render(status_area, buf);

        let mut block_size = self.bounds.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        if self.walls {
            Block::bordered().render(block_area, buf);
        } else {
            DottedBorder.render(block_area, buf);
        }

        let mut grid = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &p in self.snake.body() {
            grid.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        match self.food.hazard {
            Hazard::Safe => grid.draw_cell(self.food.pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE),
            Hazard::Hazardous => {
                grid.draw_cell(self.food.pos, consts::HAZARD_SYMBOL, consts::HAZARD_STYLE);
            }
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.snake.alive() {
            grid.draw_cell(
                self.snake.head(),
                self.snake.head_symbol(),
                consts::SNAKE_STYLE,
            );
        } else {
            grid.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        }

        self.message_line().render(message_area, buf);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return None;
        }
        let x = self.area.x.checked_add(pos.x)?;
        let y = self.area.y.checked_add(pos.y)?;
        self.buf.cell_mut((x, y))
    }

    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn around the grid when the snake can wrap around its edges
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use std::collections::VecDeque;

    fn bounds() -> Bounds {
        Bounds::new(10, 5)
    }

    fn render(view: GameView<'_>) -> Buffer {
        let area = Rect::new(0, 0, 44, 9);
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn running() {
        let snake = Snake::new(bounds().center(), Direction::North, bounds());
        let view = GameView {
            bounds: bounds(),
            snake: &snake,
            food: Food {
                pos: Position::new(1, 1),
                hazard: Hazard::Safe,
                generation: 1,
            },
            score: 0,
            walls: true,
            state: GameState::Running,
        };
        let mut expected = Buffer::with_lines([
            " Score: 0  Size: 3  Speed: 0.10  Walls: on  ",
            "                ┌──────────┐                ",
            "                │          │                ",
            "                │ ●        │                ",
            "                │     v    │                ",
            "                │     ⚬    │                ",
            "                │     ⚬    │                ",
            "                └──────────┘                ",
            " Move: ←↓↑→  Pause: Esc  Walls: w  Quit: q  ",
        ]);
        expected.set_style(Rect::new(0, 0, 44, 1), consts::STATUS_BAR_STYLE);
        expected.set_style(Rect::new(22, 4, 1, 3), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(18, 3, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(7, 8, 4, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(20, 8, 3, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(32, 8, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(41, 8, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(render(view), expected);
    }

    #[test]
    fn dead_without_walls() {
        let mut snake = Snake::new(Position::new(2, 1), Direction::West, bounds());
        snake.body = VecDeque::from([
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 1),
        ]);
        snake.size = 6;
        snake.alive = false;
        let view = GameView {
            bounds: bounds(),
            snake: &snake,
            food: Food {
                pos: Position::new(7, 3),
                hazard: Hazard::Hazardous,
                generation: 9,
            },
            score: -1,
            walls: false,
            state: GameState::Dead,
        };
        let mut expected = Buffer::with_lines([
            " Score: -1  Size: 6  Speed: 0.10  Walls: off",
            "                ·⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯·                ",
            "                ⋮          ⋮                ",
            "                ⋮ ⚬×⚬      ⋮                ",
            "                ⋮  ⚬⚬      ⋮                ",
            "                ⋮       ◆  ⋮                ",
            "                ⋮          ⋮                ",
            "                ·⋯⋯⋯⋯⋯⋯⋯⋯⋯⋯·                ",
            " — GAME OVER —                              ",
        ]);
        expected.set_style(Rect::new(0, 0, 44, 1), consts::STATUS_BAR_STYLE);
        expected.set_style(Rect::new(18, 3, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(20, 3, 1, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(19, 4, 2, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(19, 3, 1, 1), consts::COLLISION_STYLE);
        expected.set_style(Rect::new(24, 5, 1, 1), consts::HAZARD_STYLE);
        pretty_assertions::assert_eq!(render(view), expected);
    }

    #[test]
    fn paused() {
        let mut snake = Snake::new(Position::new(5, 2), Direction::East, bounds());
        snake.body = VecDeque::from([
            Position::new(1, 2),
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(4, 2),
        ]);
        snake.size = 5;
        snake.speed = 0.14;
        let view = GameView {
            bounds: bounds(),
            snake: &snake,
            food: Food {
                pos: Position::new(8, 0),
                hazard: Hazard::Hazardous,
                generation: 4,
            },
            score: 2,
            walls: true,
            state: GameState::Paused,
        };
        let mut expected = Buffer::with_lines([
            " Score: 2  Size: 5  Speed: 0.14  Walls: on  ",
            "                ┌──────────┐                ",
            "                │        ◆ │                ",
            "                │          │                ",
            "                │ ⚬⚬⚬⚬<    │                ",
            "                │          │                ",
            "                │          │                ",
            "                └──────────┘                ",
            " — PAUSED — Resume: Esc  Quit: q            ",
        ]);
        expected.set_style(Rect::new(0, 0, 44, 1), consts::STATUS_BAR_STYLE);
        expected.set_style(Rect::new(18, 4, 5, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(25, 2, 1, 1), consts::HAZARD_STYLE);
        expected.set_style(Rect::new(20, 8, 3, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(31, 8, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(render(view), expected);
    }
}
