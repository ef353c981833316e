use crate::board::Board;
use std::collections::{HashMap, VecDeque};

pub fn board(rows: &[&[u16]]) -> Board {
    Board::from_rows(rows).unwrap()
}

/// Exact distance to the goal for every board reachable from it, by
/// breadth-first search.
pub fn distances(height: usize, width: usize) -> HashMap<Board, u32> {
    let goal = Board::solved(height, width);
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(goal.clone(), 0);
    queue.push_back(goal);
    while let Some(current) = queue.pop_front() {
        let distance = distances[&current];
        for (_, next) in current.successors() {
            if !distances.contains_key(&next) {
                distances.insert(next.clone(), distance + 1);
                queue.push_back(next);
            }
        }
    }
    distances
}
