use super::{CellStatus, Topology};

/// Dense row-major buffer of cell states.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellStatus>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`
    pub fn filled(width: usize, height: usize, fill: CellStatus) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Callers guarantee `(x, y)` is in range.
    #[inline]
    pub fn get(&self, (x, y): (usize, usize)) -> CellStatus {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, (x, y): (usize, usize), status: CellStatus) {
        let idx = self.index(x, y);
        self.cells[idx] = status;
    }

    pub fn fill(&mut self, status: CellStatus) {
        self.cells.iter_mut().for_each(|cell| *cell = status);
    }

    /// Count `Live` cells around `pos` under the given addressing policy.
    pub fn count_live_neighbors(&self, pos: (usize, usize), topology: Topology) -> u8 {
        topology
            .neighbors(pos, self.width, self.height)
            .filter(|&n| self.get(n).is_alive())
            .count() as u8
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), CellStatus)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &status)| ((i % self.width, i / self.width), status))
    }
}
