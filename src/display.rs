use crate::game::GameView;
use crossterm::{execute, terminal::SetTitle};
use ratatui::{backend::Backend, Terminal};
use std::io::{self, Write};

/// Something that can show the game to the player
pub(crate) trait Renderer {
    /// Draw one frame
    fn draw(&mut self, view: GameView<'_>) -> io::Result<()>;

    /// Report the score and the number of frames drawn in the last second
    fn update_title(&mut self, score: i32, frames: u32) -> io::Result<()>;

    /// Indicate that the game is paused
    fn pause_title(&mut self) -> io::Result<()>;
}

/// Draws the game in a terminal with ratatui and shows status in the
/// terminal window's title
#[derive(Debug)]
pub(crate) struct TerminalDisplay<B: Backend, W> {
    terminal: Terminal<B>,

    /// Where to send the escape sequences that set the window title
    title_out: W,
}

impl<B: Backend, W: Write> TerminalDisplay<B, W> {
    pub(crate) fn new(terminal: Terminal<B>, title_out: W) -> Self {
        TerminalDisplay {
            terminal,
            title_out,
        }
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.title_out, SetTitle(title))
    }
}

impl<B: Backend, W: Write> Renderer for TerminalDisplay<B, W> {
    fn draw(&mut self, view: GameView<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }

    fn update_title(&mut self, score: i32, frames: u32) -> io::Result<()> {
        self.set_title(&format!("Snake Score: {score} FPS: {frames}"))
    }

    fn pause_title(&mut self) -> io::Result<()> {
        self.set_title("Snake - PAUSED")
    }
}
