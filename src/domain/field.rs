/// Field: a square grid of cells and who occupies them.
///
/// Cells live in one flat `Vec`, row-major: `index = row * size + column`.
/// A cell stores the id of its occupant; the entity stores the index of its
/// cell. The two sides are kept in sync by `World` (see `sim::world`).

use super::entity::EntityId;
use super::error::GameError;

/// Index into `Field::cells`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellIndex(pub usize);

#[derive(Clone, Debug)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    occupant: Option<EntityId>,
}

impl Cell {
    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct Field {
    size: usize,
    cells: Vec<Cell>,
}

impl Field {
    /// Build a `size x size` field of empty cells.
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size < 1 {
            return Err(GameError::InvalidConfig("field size must be at least 1".into()));
        }
        let count = size
            .checked_mul(size)
            .filter(|_| i32::try_from(size).is_ok())
            .ok_or_else(|| GameError::InvalidConfig(format!("field size {size} is too large")))?;
        let cells = (0..count)
            .map(|i| Cell { row: i / size, column: i % size, occupant: None })
            .collect();
        Ok(Field { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_in_bounds(&self, row: i32, column: i32) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.size && (column as usize) < self.size
    }

    /// Index of the cell at (row, column).
    pub fn index_of(&self, row: i32, column: i32) -> Result<CellIndex, GameError> {
        if !self.is_in_bounds(row, column) {
            return Err(GameError::OutOfBounds { row, column, size: self.size });
        }
        Ok(CellIndex(row as usize * self.size + column as usize))
    }

    pub fn cell_at(&self, row: i32, column: i32) -> Result<&Cell, GameError> {
        let idx = self.index_of(row, column)?;
        Ok(&self.cells[idx.0])
    }

    /// Cell by index. Indices only come from `index_of`, so they are in range.
    pub fn cell(&self, idx: CellIndex) -> &Cell {
        &self.cells[idx.0]
    }

    pub fn occupant(&self, idx: CellIndex) -> Option<EntityId> {
        self.cells[idx.0].occupant
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, &Cell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellIndex(i), c))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Raw occupancy write. Only `World` calls this, always paired with the
    /// matching update on the entity side.
    pub(crate) fn set_occupant(&mut self, idx: CellIndex, occupant: Option<EntityId>) {
        self.cells[idx.0].occupant = occupant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_field_is_empty() {
        let f = Field::new(4).unwrap();
        assert_eq!(f.size(), 4);
        assert_eq!(f.empty_count(), 16);
        assert!(f.cells().all(|(_, c)| c.is_empty()));
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(matches!(Field::new(0), Err(GameError::InvalidConfig(_))));
        assert!(matches!(Field::new(usize::MAX), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn single_cell_field() {
        let f = Field::new(1).unwrap();
        assert!(f.is_in_bounds(0, 0));
        assert!(!f.is_in_bounds(0, 1));
        assert!(!f.is_in_bounds(-1, 0));
    }

    #[test]
    fn cell_at_reports_coordinates() {
        let f = Field::new(3).unwrap();
        let c = f.cell_at(2, 1).unwrap();
        assert_eq!((c.row, c.column), (2, 1));
        assert_eq!(f.index_of(2, 1).unwrap(), CellIndex(7));
    }

    #[test]
    fn cell_at_out_of_bounds() {
        let f = Field::new(3).unwrap();
        assert_eq!(
            f.cell_at(3, 0).unwrap_err(),
            GameError::OutOfBounds { row: 3, column: 0, size: 3 }
        );
        assert!(f.cell_at(0, -1).is_err());
    }

    #[test]
    fn occupancy_is_tracked() {
        let mut f = Field::new(2).unwrap();
        let idx = f.index_of(1, 1).unwrap();
        f.set_occupant(idx, Some(EntityId(0)));
        assert_eq!(f.occupant(idx), Some(EntityId(0)));
        assert_eq!(f.empty_count(), 3);
    }
}
