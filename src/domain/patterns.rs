use super::{EngineError, LifeEngine};

/// A named shape that can be stamped onto a field
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    /// Offsets of the live cells from the top-left corner
    pub cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Build a pattern from ASCII rows where `#` is alive and anything else is dead.
    /// The bounding box is the full extent of the rows.
    pub fn from_rows(name: &'static str, description: &'static str, rows: &[&str]) -> Self {
        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'#')
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        Self {
            name,
            description,
            width: rows.iter().map(|row| row.len()).max().unwrap_or(0),
            height: rows.len(),
            cells,
        }
    }

    /// Revive the pattern's cells with its top-left corner at `(x, y)`.
    /// The whole pattern must fit; on error nothing is changed.
    pub fn place_on(&self, engine: &mut LifeEngine, x: usize, y: usize) -> Result<(), EngineError> {
        let (width, height) = (engine.width(), engine.height());
        if self.width > width || self.height > height {
            return Err(EngineError::PatternTooLarge {
                name: self.name,
                pattern_width: self.width,
                pattern_height: self.height,
                width,
                height,
            });
        }
        if x.saturating_add(self.width) > width || y.saturating_add(self.height) > height {
            return Err(EngineError::OutOfRange { x, y, width, height });
        }
        self.cells
            .iter()
            .try_for_each(|&(dx, dy)| engine.revive(x + dx, y + dy))
    }

    /// Top-left origin that centers the pattern on `(x, y)`, pulled back inside the field.
    pub fn centered_origin(&self, x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
        let ox = x.saturating_sub(self.width / 2).min(width.saturating_sub(self.width));
        let oy = y.saturating_sub(self.height / 2).min(height.saturating_sub(self.height));
        (ox, oy)
    }
}

/// Well-known shapes
pub mod presets {
    use super::Pattern;

    /// Smallest spaceship, travels diagonally
    pub fn glider() -> Pattern {
        Pattern::from_rows("Glider", "Spaceship, period 4", &[
            ".#.",
            "..#",
            "###",
        ])
    }

    /// Three in a row, flips every generation
    pub fn blinker() -> Pattern {
        Pattern::from_rows("Blinker", "Oscillator, period 2", &["###"])
    }

    /// Two offset rows that breathe in and out
    pub fn toad() -> Pattern {
        Pattern::from_rows("Toad", "Oscillator, period 2", &[
            ".###",
            "###.",
        ])
    }

    /// Two blocks blinking at their touching corners
    pub fn beacon() -> Pattern {
        Pattern::from_rows("Beacon", "Oscillator, period 2", &[
            "##..",
            "#...",
            "...#",
            "..##",
        ])
    }

    /// 2x2 still life
    pub fn block() -> Pattern {
        Pattern::from_rows("Block", "Still life", &[
            "##",
            "##",
        ])
    }

    /// Period 3 oscillator with four-fold symmetry
    pub fn pulsar() -> Pattern {
        Pattern::from_rows("Pulsar", "Oscillator, period 3", &[
            "..###...###..",
            ".............",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            "..###...###..",
            ".............",
            "..###...###..",
            "#....#.#....#",
            "#....#.#....#",
            "#....#.#....#",
            ".............",
            "..###...###..",
        ])
    }

    /// Lightweight spaceship, travels horizontally
    pub fn lwss() -> Pattern {
        Pattern::from_rows("LWSS", "Lightweight spaceship, period 4", &[
            ".#..#",
            "#....",
            "#...#",
            "####.",
        ])
    }

    /// Five cells that stay chaotic for over a thousand generations
    pub fn r_pentomino() -> Pattern {
        Pattern::from_rows("R-pentomino", "Methuselah, settles after 1103 generations", &[
            ".##",
            "##.",
            ".#.",
        ])
    }

    /// Gosper glider gun, the first known infinite-growth pattern
    pub fn glider_gun() -> Pattern {
        Pattern::from_rows("Gosper gun", "Emits a glider every 30 generations", &[
            "........................#...........",
            "......................#.#...........",
            "............##......##............##",
            "...........#...#....##............##",
            "##........#.....#...##..............",
            "##........#...#.##....#.#...........",
            "..........#.....#.......#...........",
            "...........#...#....................",
            "............##......................",
        ])
    }

    /// Every preset, in menu order
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            block(),
            pulsar(),
            lwss(),
            r_pentomino(),
            glider_gun(),
        ]
    }
}
