use calico_8::emulator::framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};

/// Draws the emulator screen in the terminal, two columns per pixel, inside a border.
pub struct CrosstermOutput {
    stdout: Stdout,
}

impl CrosstermOutput {
    pub fn new() -> crossterm::Result<CrosstermOutput> {
        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        let mut output = CrosstermOutput { stdout };
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let bottom = SCREEN_HEIGHT as u16 + 1;
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        let horizontal = "━".repeat(2 * SCREEN_WIDTH);
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            Print(format!("┏{}┓", horizontal)),
            cursor::MoveTo(0, bottom),
            Print(format!("┗{}┛", horizontal))
        )?;
        for y in 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                Print('┃'),
                cursor::MoveTo(right, y),
                Print('┃')
            )?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Redraw every pixel of `framebuffer`.
    pub fn draw(&mut self, framebuffer: &Framebuffer) -> crossterm::Result<()> {
        for (y, row) in framebuffer.rows().enumerate() {
            let line: String = row.iter().map(|lit| if *lit { "██" } else { "  " }).collect();
            queue!(self.stdout, cursor::MoveTo(1, y as u16 + 1), Print(line))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Ring the terminal bell.
    pub fn beep(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, Print('\x07'))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        // Nothing sensible can be done if the terminal refuses to be restored
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
