//! Neighbor addressing policies.

/// Relative offsets of the Moore neighborhood, row by row.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// How neighbor coordinates behave at the field border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Topology {
    /// Both axes wrap: `-1` maps to `dimension - 1` and `dimension` maps to `0`.
    #[default]
    Torus,
    /// Out-of-bounds neighbors do not exist; border cells have fewer than 8.
    Bounded,
}

impl Topology {
    pub fn name(&self) -> &'static str {
        match self {
            Topology::Torus => "Torus",
            Topology::Bounded => "Bounded",
        }
    }

    /// Resolve a single offset from `(x, y)`, or `None` if it falls off a bounded edge.
    pub fn neighbor(
        self,
        (x, y): (usize, usize),
        (dx, dy): (isize, isize),
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        match self {
            Topology::Torus => {
                let nx = (x as isize + dx).rem_euclid(width as isize) as usize;
                let ny = (y as isize + dy).rem_euclid(height as isize) as usize;
                Some((nx, ny))
            }
            Topology::Bounded => {
                let nx = x.checked_add_signed(dx).filter(|&nx| nx < width)?;
                let ny = y.checked_add_signed(dy).filter(|&ny| ny < height)?;
                Some((nx, ny))
            }
        }
    }

    /// All existing neighbors of `pos` under this policy.
    pub fn neighbors(
        self,
        pos: (usize, usize),
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        OFFSETS
            .into_iter()
            .filter_map(move |offset| self.neighbor(pos, offset, width, height))
    }
}
