use crate::board::{Board, Move};
use crate::heuristic::{Heuristic, LinearConflictHeuristic};
use crate::pqueue::PriorityQueue;
use crate::solvability::is_solvable;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    Solved(Vec<Move>),
    /// The solved board cannot be reached from the starting board
    Impossible,
    /// The node budget ran out before a solution was found
    Cutoff,
}

/// Observer for node expansions, called once per expanded node.
pub trait Tracer {
    fn trace(&self, board: &Board, nodes_explored: usize, f_cost: u32, g_cost: u32);
}

pub struct NullTracer;

impl Tracer for NullTracer {
    fn trace(&self, _board: &Board, _nodes_explored: usize, _f_cost: u32, _g_cost: u32) {}
}

/// Solve `board` optimally with the default heuristic. Returns `None` if the
/// board cannot be solved.
pub fn solve(board: &Board) -> Option<Vec<Move>> {
    let mut solver: Solver<_, NullTracer> = Solver::new(None, LinearConflictHeuristic::new(), None);
    match solver.solve(board) {
        SolveResult::Solved(moves) => Some(moves),
        SolveResult::Impossible | SolveResult::Cutoff => None,
    }
}

struct Step {
    parent: Option<usize>,
    move_: Move,
}

/// Shared storage for the paths of all generated nodes. A path is the index of
/// its last step; each step links to the step before it, so successors extend
/// their parent's path without copying or modifying it.
struct Trail {
    steps: Vec<Step>,
}

impl Trail {
    fn new() -> Self {
        Trail { steps: Vec::new() }
    }

    fn extend(&mut self, parent: Option<usize>, move_: Move) -> usize {
        self.steps.push(Step { parent, move_ });
        self.steps.len() - 1
    }

    fn path(&self, last: Option<usize>) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cursor = last;
        while let Some(index) = cursor {
            let step = &self.steps[index];
            moves.push(step.move_);
            cursor = step.parent;
        }
        moves.reverse();
        moves
    }
}

struct SearchNode {
    board: Board,
    moves_made: u32,
    f_cost: u32,
    path: Option<usize>,
}

/// A* search over board states.
pub struct Solver<H: Heuristic, T: Tracer> {
    max_nodes_explored: Option<usize>,
    heuristic: H,
    tracer: Option<T>,
    nodes_explored: usize,
    nodes_generated: usize,
}

impl<H: Heuristic, T: Tracer> Solver<H, T> {
    pub fn new(max_nodes_explored: Option<usize>, heuristic: H, tracer: Option<T>) -> Self {
        Solver {
            max_nodes_explored,
            heuristic,
            tracer,
            nodes_explored: 0,
            nodes_generated: 0,
        }
    }

    /// Find a shortest sequence of moves from `board` to the solved board.
    ///
    /// The frontier is ordered by `f = g + h`, breaking ties towards nodes with
    /// more moves made. Boards are not deduplicated on push: a board popped
    /// after it has already been expanded at the same or a lower cost is
    /// discarded instead. The heuristic is admissible but not consistent, so a
    /// board reached again by a shorter path is expanded again.
    pub fn solve(&mut self, board: &Board) -> SolveResult {
        self.nodes_explored = 0;
        self.nodes_generated = 0;

        if !is_solvable(board) {
            return SolveResult::Impossible;
        }

        let mut frontier = PriorityQueue::new();
        // Lowest moves_made each board has been expanded with
        let mut expanded: FxHashMap<Board, u32> = FxHashMap::default();
        let mut trail = Trail::new();

        let f_cost = self.heuristic.estimate(board);
        frontier.push(
            f_cost as usize,
            0,
            SearchNode {
                board: board.clone(),
                moves_made: 0,
                f_cost,
                path: None,
            },
        );
        self.nodes_generated += 1;

        while let Some(node) = frontier.pop_min() {
            if expanded
                .get(&node.board)
                .is_some_and(|&best| best <= node.moves_made)
            {
                continue;
            }

            // h == 0 on the solved board; weaker heuristics may also be 0 elsewhere
            if node.f_cost == node.moves_made && node.board.is_solved() {
                let moves = trail.path(node.path);
                debug_assert_eq!(moves.len(), node.moves_made as usize);
                return SolveResult::Solved(moves);
            }

            if self
                .max_nodes_explored
                .is_some_and(|max| self.nodes_explored >= max)
            {
                return SolveResult::Cutoff;
            }
            self.nodes_explored += 1;

            if let Some(tracer) = &self.tracer {
                tracer.trace(&node.board, self.nodes_explored, node.f_cost, node.moves_made);
            }

            let moves_made = node.moves_made + 1;
            for (move_, next) in node.board.successors() {
                if expanded.get(&next).is_some_and(|&best| best <= moves_made) {
                    continue;
                }
                let f_cost = moves_made + self.heuristic.estimate(&next);
                let path = Some(trail.extend(node.path, move_));
                frontier.push(
                    f_cost as usize,
                    moves_made as usize,
                    SearchNode {
                        board: next,
                        moves_made,
                        f_cost,
                        path,
                    },
                );
                self.nodes_generated += 1;
            }

            expanded.insert(node.board, node.moves_made);
        }

        // Unreachable while the solvability check is exact
        SolveResult::Impossible
    }

    /// Nodes expanded by the last call to [`Solver::solve`].
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Nodes pushed onto the frontier by the last call to [`Solver::solve`].
    pub fn nodes_generated(&self) -> usize {
        self.nodes_generated
    }
}
