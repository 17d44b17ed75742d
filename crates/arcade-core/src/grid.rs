/// Column count used when nothing else is configured.
pub const DEFAULT_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Row-major placement of `len` tiles into a fixed number of columns.
///
/// The last row may be partial; cells past the end hold no tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
    len: usize,
}

impl GridLayout {
    pub fn new(columns: usize, len: usize) -> Self {
        Self {
            columns: columns.max(1),
            len,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn rows(&self) -> usize {
        self.len.div_ceil(self.columns)
    }

    pub fn position_of(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        if col >= self.columns {
            return None;
        }
        let index = row.checked_mul(self.columns)?.checked_add(col)?;
        (index < self.len).then_some(index)
    }

    /// Where focus goes from `index` when `dir` is pressed.
    ///
    /// Left/Right wrap across row ends, Up/Down do not. The target cell is
    /// clamped into the grid; `None` means the clamped cell is empty (or
    /// `index` itself is out of range) and focus should stay put.
    pub fn step(&self, index: usize, dir: Direction) -> Option<usize> {
        if index >= self.len {
            return None;
        }

        let (row, col) = self.position_of(index);
        let (mut row, mut col) = (row as isize, col as isize);
        let columns = self.columns as isize;

        match dir {
            Direction::Right => {
                col += 1;
                if col >= columns {
                    col = 0;
                    row += 1;
                }
            }
            Direction::Left => {
                col -= 1;
                if col < 0 {
                    col = columns - 1;
                    row -= 1;
                }
            }
            Direction::Down => row += 1,
            Direction::Up => row -= 1,
        }

        let last_row = self.rows() as isize - 1;
        let row = row.clamp(0, last_row) as usize;
        let col = col.clamp(0, columns - 1) as usize;
        self.index_at(row, col)
    }
}
