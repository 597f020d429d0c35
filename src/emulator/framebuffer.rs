use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Cells = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// A 64x32 monochrome screen.
///
/// Pixels are only ever changed by toggling them, which is what gives
/// CHIP-8 sprites their XOR semantics. Coordinates wrap around both axes,
/// so `(64, 32)` addresses the same pixel as `(0, 0)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: Cells,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer { cells: EMPTY_SCREEN }
    }

    /// The current state of a pixel.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    /// Flip a pixel and return its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.cells[y % SCREEN_HEIGHT][x % SCREEN_WIDTH];
        *cell = !*cell;
        *cell
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.cells = EMPTY_SCREEN;
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.cells.iter()
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.cells.iter().flatten().filter(|c| **c).count();
        write!(f, "Framebuffer {{ lit: {} }}", lit)
    }
}
