use crate::board::Board;

/// Trait for computing lower bounds on the number of moves needed to solve a board.
pub trait Heuristic {
    /// Estimate the moves remaining from `board` to the solved board. Must never
    /// overestimate, and must be 0 on the solved board.
    fn estimate(&self, board: &Board) -> u32;
}

/// Uninformed search: every board is estimated at 0 moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHeuristic;

impl NullHeuristic {
    pub fn new() -> Self {
        NullHeuristic
    }
}

impl Heuristic for NullHeuristic {
    fn estimate(&self, _board: &Board) -> u32 {
        0
    }
}

/// Sum of each tile's Manhattan distance to its goal cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManhattanHeuristic;

impl ManhattanHeuristic {
    pub fn new() -> Self {
        ManhattanHeuristic
    }
}

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, board: &Board) -> u32 {
        manhattan_distance(board)
    }
}

/// Manhattan distance enhanced with linear conflicts and the last-move rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearConflictHeuristic;

impl LinearConflictHeuristic {
    pub fn new() -> Self {
        LinearConflictHeuristic
    }
}

impl Heuristic for LinearConflictHeuristic {
    fn estimate(&self, board: &Board) -> u32 {
        heuristic(board)
    }
}

/// Lower bound on the moves needed to solve `board`: Manhattan distance, plus 2
/// for each row and column holding a linear conflict, plus 2 when the final
/// move into the bottom-right corner needs moves Manhattan distance cannot see.
pub fn heuristic(board: &Board) -> u32 {
    let conflicts = linear_conflicts(board);
    let mut total = manhattan_distance(board) + conflicts.extra_moves;
    if !conflicts.near_corner {
        total += last_move_correction(board);
    }
    total
}

pub fn manhattan_distance(board: &Board) -> u32 {
    let width = board.width();
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(index, &value)| {
            let (row, col) = (index / width, index % width);
            let (goal_row, goal_col) = board.goal_pos(value);
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
        })
        .sum()
}

struct LinearConflicts {
    extra_moves: u32,
    /// A conflict was counted in the column left of the corner or the row above it.
    near_corner: bool,
}

/// Each row (or column) whose own tiles sit out of order costs at least two
/// moves beyond Manhattan distance: one tile must step off the line and back.
/// Only one conflict is counted per line.
fn linear_conflicts(board: &Board) -> LinearConflicts {
    let (height, width) = (board.height(), board.width());
    let mut extra_moves = 0;
    let mut near_corner = false;

    for col in 0..width {
        let line = (0..height).map(|row| board.get(row, col));
        if line_conflict(line, |value| board.goal_pos(value).1 == col) {
            extra_moves += 2;
            near_corner |= col + 2 == width;
        }
    }

    for (row, cells) in board.rows().enumerate() {
        let line = cells.iter().copied();
        if line_conflict(line, |value| board.goal_pos(value).0 == row) {
            extra_moves += 2;
            near_corner |= row + 2 == height;
        }
    }

    LinearConflicts {
        extra_moves,
        near_corner,
    }
}

/// Whether two tiles that belong on this line appear in inverted order. Tiles
/// sharing a goal row or column are ordered on it by value.
fn line_conflict(line: impl Iterator<Item = u16>, belongs: impl Fn(u16) -> bool) -> bool {
    let mut highest = 0;
    for value in line.filter(|&value| value != 0 && belongs(value)) {
        if value < highest {
            return true;
        }
        highest = value;
    }
    false
}

/// The last move of any solution slides either the tile that belongs above the
/// corner up, or the tile that belongs left of it leftwards, so one of them has
/// to pass through the corner. If the upper tile is outside the bottom row and
/// the left tile is outside the right column, neither Manhattan path can pass
/// through the corner, which costs at least two extra moves.
fn last_move_correction(board: &Board) -> u32 {
    let (height, width) = (board.height(), board.width());
    if height < 2 || width < 2 {
        return 0;
    }

    let upper_tile = ((height - 1) * width) as u16;
    let left_tile = (height * width - 1) as u16;
    let (upper_row, upper_col) = position_of(board, upper_tile);
    let (left_row, left_col) = position_of(board, left_tile);

    if upper_row == height - 1 || left_col == width - 1 {
        return 0;
    }
    // Both tiles already on the lines leading into the corner
    if upper_col == width - 1 && left_row == height - 1 {
        return 0;
    }
    2
}

fn position_of(board: &Board, value: u16) -> (usize, usize) {
    let index = board
        .cells()
        .iter()
        .position(|&cell| cell == value)
        .unwrap_or_default();
    (index / board.width(), index % board.width())
}
