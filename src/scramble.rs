use crate::board::{Board, BoardError, Move, cell_count};
use crate::solvability::is_solvable;
use arrayvec::ArrayVec;
use rand::Rng;
use rand::seq::SliceRandom;

/// Draw a solvable board uniformly at random.
///
/// Boards with two or more rows and columns are drawn by shuffling until the
/// permutation is solvable (half of all permutations are). On a single row or
/// column the tiles can never change order, so only the blank is placed.
pub fn random_board<R: Rng>(
    height: usize,
    width: usize,
    rng: &mut R,
) -> Result<Board, BoardError> {
    let count = cell_count(height, width)?;

    if height == 1 || width == 1 {
        let blank = rng.gen_range(0..count);
        let mut cells: Vec<u16> = (1..count).map(|v| v as u16).collect();
        cells.insert(blank, 0);
        return Board::new(height, width, cells);
    }

    let mut cells: Vec<u16> = (0..count).map(|v| v as u16).collect();
    loop {
        cells.shuffle(rng);
        let board = Board::new(height, width, cells.clone())?;
        if is_solvable(&board) {
            return Ok(board);
        }
    }
}

/// Random walk of `steps` moves from `board`, never undoing the previous move
/// unless there is no other choice.
pub fn scramble<R: Rng>(board: &Board, steps: usize, rng: &mut R) -> Board {
    let mut current = board.clone();
    let mut last: Option<Move> = None;

    for _ in 0..steps {
        let mut options = current.successors();
        if options.len() > 1 {
            options = options
                .into_iter()
                .filter(|(move_, _)| Some(move_.opposite()) != last)
                .collect::<ArrayVec<_, 4>>();
        }
        if options.is_empty() {
            break;
        }

        let (move_, next) = options.swap_remove(rng.gen_range(0..options.len()));
        last = Some(move_);
        current = next;
    }

    current
}
