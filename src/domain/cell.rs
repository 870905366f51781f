/// State of a single grid position.
///
/// `Processed` only ever appears in the scratch buffer while
/// [`LifeEngine::update`](super::LifeEngine::update) is resolving a generation:
/// it marks a cell that has already been decided dead for that tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CellStatus {
    #[default]
    Dead,
    Live,
    Processed,
}

impl CellStatus {
    /// Only `Live` counts as alive; `Processed` reads as dead.
    pub const fn is_alive(self) -> bool {
        matches!(self, CellStatus::Live)
    }

    /// Whether the cell has not been visited by the current update pass.
    pub(crate) const fn is_unresolved(self) -> bool {
        matches!(self, CellStatus::Dead)
    }
}
