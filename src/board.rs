use arrayvec::ArrayVec;
use std::fmt;

/// Largest number of cells a board may hold (every value must fit in a `u16`).
pub const MAX_CELLS: usize = u16::MAX as usize + 1;

/// A single move, named after the direction the *tile* slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Moves in the order successors are generated: the tile left of the blank,
/// right of it, above it, below it.
pub const ALL_MOVES: [Move; 4] = [Move::Right, Move::Left, Move::Down, Move::Up];

impl Move {
    /// Offset (row, col) from the blank to the tile that slides.
    fn delta(&self) -> (isize, isize) {
        match self {
            Move::Right => (0, -1),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Up => (1, 0),
        }
    }

    pub fn label(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    pub fn from_label(label: char) -> Option<Move> {
        match label {
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Reasons a grid cannot be turned into a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No rows, or rows with no cells
    Empty,
    /// A row whose length differs from the first row
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// More cells than a `u16` can number
    TooLarge { height: usize, width: usize },
    /// A flat cell vector whose length is not `height * width`
    WrongLength { expected: usize, found: usize },
    /// A value outside `0..cells`
    OutOfRange { value: u16, cells: usize },
    /// A value that appears more than once
    Duplicate { value: u16 },
    /// A token in text input that is not a cell value
    Parse { line: usize, token: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "Empty board"),
            BoardError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row + 1,
                found,
                expected
            ),
            BoardError::TooLarge { height, width } => write!(
                f,
                "Board of {}x{} has more than {} cells",
                height, width, MAX_CELLS
            ),
            BoardError::WrongLength { expected, found } => {
                write!(f, "Expected {} cells, found {}", expected, found)
            }
            BoardError::OutOfRange { value, cells } => write!(
                f,
                "Value {} out of range for a board of {} cells",
                value, cells
            ),
            BoardError::Duplicate { value } => write!(f, "Value {} appears more than once", value),
            BoardError::Parse { line, token } => {
                write!(f, "Invalid cell '{}' on line {}", token, line)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Number of cells on a `height` by `width` board, if it is non-empty and
/// small enough to number with `u16` values.
pub(crate) fn cell_count(height: usize, width: usize) -> Result<usize, BoardError> {
    if height == 0 || width == 0 {
        return Err(BoardError::Empty);
    }
    height
        .checked_mul(width)
        .filter(|&count| count <= MAX_CELLS)
        .ok_or(BoardError::TooLarge { height, width })
}

/// An immutable sliding-tile board. Value 0 is the blank; tiles are `1..cells`.
///
/// Boards compare and hash by their full contents, so two boards with the same
/// layout are the same search state no matter how they were reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Box<[u16]>,
    // Row-major index of the blank, always consistent with `cells`
    blank: usize,
}

impl Board {
    /// Build a board from row-major cells, checking that they are a permutation
    /// of `0..height * width`.
    pub fn new(height: usize, width: usize, cells: Vec<u16>) -> Result<Self, BoardError> {
        let count = cell_count(height, width)?;
        if cells.len() != count {
            return Err(BoardError::WrongLength {
                expected: count,
                found: cells.len(),
            });
        }

        let mut seen = vec![false; count];
        let mut blank = 0;
        for (index, &value) in cells.iter().enumerate() {
            let slot = value as usize;
            if slot >= count {
                return Err(BoardError::OutOfRange {
                    value,
                    cells: count,
                });
            }
            if seen[slot] {
                return Err(BoardError::Duplicate { value });
            }
            seen[slot] = true;
            if value == 0 {
                blank = index;
            }
        }

        Ok(Board {
            height,
            width,
            cells: cells.into_boxed_slice(),
            blank,
        })
    }

    /// Build a board from rows of cell values.
    pub fn from_rows<R: AsRef<[u16]>>(rows: &[R]) -> Result<Self, BoardError> {
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BoardError::Ragged {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Self::new(rows.len(), width, cells)
    }

    /// Parse a board from text: one row per line, cells separated by whitespace.
    /// Blank lines are ignored.
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        let mut rows = Vec::new();
        for (line_idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u16>().map_err(|_| BoardError::Parse {
                        line: line_idx + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<u16>, BoardError>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    /// The canonical goal: tiles `1..cells` in row-major order, blank last.
    ///
    /// Panics if the board would be empty or hold more than [`MAX_CELLS`] cells.
    pub fn solved(height: usize, width: usize) -> Self {
        let count = match cell_count(height, width) {
            Ok(count) => count,
            Err(err) => panic!("{}", err),
        };

        let cells: Vec<u16> = (1..count).chain(std::iter::once(0)).map(|v| v as u16).collect();
        Board {
            height,
            width,
            cells: cells.into_boxed_slice(),
            blank: count - 1,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.cells[row * self.width + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.cells.chunks(self.width)
    }

    pub fn to_rows(&self) -> Vec<Vec<u16>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// (row, col) of the blank.
    pub fn blank_pos(&self) -> (usize, usize) {
        (self.blank / self.width, self.blank % self.width)
    }

    /// (row, col) where tile `value` belongs in the solved board.
    pub fn goal_pos(&self, value: u16) -> (usize, usize) {
        debug_assert!(value != 0, "the blank has no goal position");
        let index = value as usize - 1;
        (index / self.width, index % self.width)
    }

    pub fn is_solved(&self) -> bool {
        let last = self.cells.len() - 1;
        self.blank == last
            && self.cells[..last]
                .iter()
                .enumerate()
                .all(|(index, &value)| value as usize == index + 1)
    }

    /// The board after sliding a tile into the blank, or `None` if no tile
    /// sits on that side of the blank.
    pub fn apply(&self, move_: Move) -> Option<Board> {
        let (row, col) = self.blank_pos();
        let (dr, dc) = move_.delta();
        let new_row = row.checked_add_signed(dr)?;
        let new_col = col.checked_add_signed(dc)?;
        if new_row >= self.height || new_col >= self.width {
            return None;
        }

        let tile = new_row * self.width + new_col;
        let mut cells = self.cells.clone();
        cells.swap(self.blank, tile);
        Some(Board {
            height: self.height,
            width: self.width,
            cells,
            blank: tile,
        })
    }

    /// Every board one move away, in [`ALL_MOVES`] order.
    pub fn successors(&self) -> ArrayVec<(Move, Board), 4> {
        ALL_MOVES
            .iter()
            .filter_map(|&move_| self.apply(move_).map(|board| (move_, board)))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.cells.len() - 1).to_string().len();
        for row in self.rows() {
            let line = row
                .iter()
                .map(|value| format!("{:>width$}", value, width = digits))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
