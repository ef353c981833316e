use crate::board::Board;

/// Count pairs of tiles that appear in the opposite order to their values,
/// reading the board row by row and skipping the blank.
pub fn count_inversions(board: &Board) -> usize {
    let tiles: Vec<u16> = board.cells().iter().copied().filter(|&v| v != 0).collect();
    tiles
        .iter()
        .enumerate()
        .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&later| later < value).count())
        .sum()
}

/// Decide whether the solved board can be reached from `board`.
///
/// Sliding a tile sideways never changes the inversion count. Sliding it
/// vertically jumps it over `width - 1` other tiles, so on odd-width boards
/// inversion parity is invariant, and on even-width boards it flips together
/// with the blank's row. A board of one row or one column never reorders its
/// tiles, so there only the already-ordered layouts are reachable.
pub fn is_solvable(board: &Board) -> bool {
    let inversions = count_inversions(board);

    if board.height() == 1 || board.width() == 1 {
        return inversions == 0;
    }

    if board.width() % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (blank_row, _) = board.blank_pos();
        let gap = board.height() - 1 - blank_row;
        (inversions + gap) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;
    use crate::test_util::{board, distances};

    /// Visit every permutation of `values` (Heap's algorithm).
    fn for_each_permutation(values: &mut [u16], f: &mut impl FnMut(&[u16])) {
        let n = values.len();
        let mut c = vec![0usize; n];
        f(values);
        let mut i = 0;
        while i < n {
            if c[i] < i {
                if i % 2 == 0 {
                    values.swap(0, i);
                } else {
                    values.swap(c[i], i);
                }
                f(values);
                c[i] += 1;
                i = 0;
            } else {
                c[i] = 0;
                i += 1;
            }
        }
    }

    fn check_exhaustive(height: usize, width: usize) {
        let reachable = distances(height, width);
        let mut values: Vec<u16> = (0..(height * width) as u16).collect();
        let mut checked = 0;
        for_each_permutation(&mut values, &mut |cells| {
            let board = Board::new(height, width, cells.to_vec()).unwrap();
            assert_eq!(
                is_solvable(&board),
                reachable.contains_key(&board),
                "mismatch for\n{}",
                board
            );
            checked += 1;
        });
        let total: usize = (1..=height * width).product();
        assert_eq!(checked, total);
    }

    #[test]
    fn test_count_inversions() {
        assert_eq!(count_inversions(&Board::solved(3, 3)), 0);
        assert_eq!(count_inversions(&board(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]])), 1);
        // The blank does not take part
        assert_eq!(count_inversions(&board(&[&[0, 1], &[2, 3]])), 0);
        assert_eq!(count_inversions(&board(&[&[3, 2, 1, 0]])), 3);
    }

    #[test]
    fn test_solved_is_solvable() {
        for (height, width) in [(1, 1), (1, 4), (4, 1), (2, 2), (3, 3), (4, 4), (3, 5)] {
            assert!(is_solvable(&Board::solved(height, width)));
        }
    }

    #[test]
    fn test_odd_width_odd_inversions() {
        let board = board(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert!(!is_solvable(&board));
    }

    #[test]
    fn test_even_width_uses_blank_row() {
        // 15-puzzle with 14 and 15 swapped: one inversion, blank on the bottom row
        let swapped = board(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[9, 10, 11, 12],
            &[13, 15, 14, 0],
        ]);
        assert!(!is_solvable(&swapped));

        // Blank moved up one row from the goal: odd inversions, offset by the gap
        let raised = Board::solved(4, 4).apply(Move::Down).unwrap();
        assert_eq!(count_inversions(&raised), 3);
        assert!(is_solvable(&raised));
    }

    #[test]
    fn test_line_puzzles() {
        assert!(is_solvable(&board(&[&[1, 0, 2, 3, 4]])));
        assert!(is_solvable(&board(&[&[0, 1, 2]])));
        // Even inversion count, but tiles on a line cannot pass each other
        assert!(!is_solvable(&board(&[&[2, 1, 4, 3, 0]])));
        assert!(!is_solvable(&board(&[&[2], &[1], &[4], &[3], &[0]])));
        assert!(!is_solvable(&board(&[&[2, 1, 0]])));
    }

    #[test]
    fn test_exhaustive_small_boards() {
        for (height, width) in [(2, 2), (2, 3), (3, 2), (1, 5), (5, 1), (1, 1)] {
            check_exhaustive(height, width);
        }
    }

    #[test]
    fn test_exhaustive_eight_puzzle() {
        check_exhaustive(3, 3);
    }

    #[test]
    fn test_exhaustive_two_by_four() {
        check_exhaustive(2, 4);
        check_exhaustive(4, 2);
    }
}
