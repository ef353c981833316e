use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slider::board::{Board, Move};
use slider::heuristic::{Heuristic, LinearConflictHeuristic, ManhattanHeuristic, NullHeuristic};
use slider::puzzles::Puzzles;
use slider::scramble::random_board;
use slider::solver::{SolveResult, Solver, Tracer};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    LinearConflict,
    Manhattan,
    Null,
}

fn print_solution(board: &Board, solution: &[Move]) {
    println!("\nStarting position:\n{}", board);
    let mut board = board.clone();
    let total = solution.len();
    for (count, move_) in solution.iter().enumerate() {
        let Some(next) = board.apply(*move_) else {
            eprintln!("Error: move {} does not apply", move_);
            return;
        };
        board = next;
        println!("Move {} ({}/{}):\n{}", move_, count + 1, total, board);
    }
    let labels: String = solution.iter().map(|move_| move_.label()).collect();
    println!("Moves: {}", labels);
}

struct VerboseTracer {
    trace_start: usize,
    trace_end: usize,
}

impl VerboseTracer {
    fn new(from_node: usize, to_node: usize) -> Self {
        Self {
            trace_start: from_node,
            trace_end: to_node,
        }
    }
}

impl Tracer for VerboseTracer {
    fn trace(&self, board: &Board, nodes_explored: usize, f_cost: u32, g_cost: u32) {
        if self.trace_start <= nodes_explored && nodes_explored <= self.trace_end {
            println!(
                "count={}, f_cost={}, g_cost={}, h_cost={}:\n{}",
                nodes_explored,
                f_cost,
                g_cost,
                f_cost - g_cost,
                board
            );
        }
    }
}

struct PuzzleStats {
    solved: bool,
    steps: usize,
    states_explored: usize,
    elapsed_ms: u128,
}

struct SolveOpts {
    puzzle_num: usize,
    max_nodes_explored: Option<usize>,
    print_solution: bool,
    trace_range: Option<(usize, usize)>,
}

fn solve_puzzle_helper<H: Heuristic>(board: &Board, opts: SolveOpts, heuristic: H) -> PuzzleStats {
    let tracer = opts
        .trace_range
        .map(|(trace_start, trace_end)| VerboseTracer::new(trace_start, trace_end));

    let mut solver = Solver::new(opts.max_nodes_explored, heuristic, tracer);
    let start = Instant::now();
    let result = solver.solve(board);
    let elapsed_ms = start.elapsed().as_millis();
    let states_explored = solver.nodes_explored();

    let (solved_char, solution_len, solved) = match &result {
        SolveResult::Solved(solution) => ('Y', solution.len(), true),
        SolveResult::Cutoff => ('N', 0, false),
        SolveResult::Impossible => ('X', 0, false),
    };

    println!(
        "puzzle: {:<3}  size: {}x{}  solved: {}  steps: {:<5}  states: {:<12}  generated: {:<12}  elapsed: {} ms",
        opts.puzzle_num,
        board.height(),
        board.width(),
        solved_char,
        solution_len,
        states_explored,
        solver.nodes_generated(),
        elapsed_ms
    );

    if opts.print_solution {
        if let SolveResult::Solved(solution) = result {
            print_solution(board, &solution);
        }
    }

    PuzzleStats {
        solved,
        steps: solution_len,
        states_explored,
        elapsed_ms,
    }
}

fn solve_puzzle(board: &Board, opts: SolveOpts, heuristic_type: HeuristicType) -> PuzzleStats {
    match heuristic_type {
        HeuristicType::LinearConflict => {
            solve_puzzle_helper(board, opts, LinearConflictHeuristic::new())
        }
        HeuristicType::Manhattan => solve_puzzle_helper(board, opts, ManhattanHeuristic::new()),
        HeuristicType::Null => solve_puzzle_helper(board, opts, NullHeuristic::new()),
    }
}

/// Parse a board size written as `ROWSxCOLS`, e.g. `4x4`.
fn parse_size(text: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got '{}'", text))?;
    let rows = rows
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid row count '{}'", rows))?;
    let cols = cols
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid column count '{}'", cols))?;
    if rows == 0 || cols == 0 {
        return Err("board size must be at least 1x1".to_string());
    }
    Ok((rows, cols))
}

#[derive(Parser)]
#[command(name = "slider")]
#[command(about = "An optimal sliding-tile puzzle solver", long_about = None)]
struct Args {
    /// Path to the puzzles file
    #[arg(value_name = "FILE", required_unless_present = "random")]
    puzzles_file: Option<String>,

    /// Puzzle number to solve (1-indexed), or start of range
    #[arg(value_name = "PUZZLE", default_value = "1")]
    puzzle_start: usize,

    /// Optional end of puzzle range (inclusive, 1-indexed)
    #[arg(value_name = "PUZZLE_END")]
    puzzle_end: Option<usize>,

    /// Solve randomly generated puzzles of this size instead of reading a file
    #[arg(short, long, value_name = "ROWSxCOLS", value_parser = parse_size, conflicts_with = "puzzles_file")]
    random: Option<(usize, usize)>,

    /// Number of random puzzles to generate
    #[arg(short, long, default_value = "1")]
    count: usize,

    /// Seed for random puzzle generation
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Maximum number of nodes to explore before giving up
    #[arg(short = 'n', long)]
    max_nodes_explored: Option<usize>,

    /// Heuristic to use for solving
    #[arg(short = 'H', long, value_enum, default_value = "linear-conflict")]
    heuristic: HeuristicType,

    /// Range of node numbers to trace (start, end)
    #[arg(long, num_args = 2)]
    trace_range: Option<Vec<usize>>,
}

/// Load the puzzles selected on the command line.
fn load_puzzles(args: &Args) -> Result<Vec<(usize, Board)>, String> {
    if let Some((rows, cols)) = args.random {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        return (1..=args.count)
            .map(|puzzle_num| {
                random_board(rows, cols, &mut rng)
                    .map(|board| (puzzle_num, board))
                    .map_err(|e| e.to_string())
            })
            .collect();
    }

    let path = args
        .puzzles_file
        .as_deref()
        .ok_or_else(|| "no puzzles file given".to_string())?;
    let puzzles = Puzzles::from_file(path).map_err(|e| format!("loading puzzles: {}", e))?;

    // Validate range
    let puzzle_end = args.puzzle_end.unwrap_or(args.puzzle_start);
    if args.puzzle_start == 0 {
        return Err("puzzle numbers must be at least 1".to_string());
    }
    if puzzle_end < args.puzzle_start {
        return Err("puzzle end must be >= puzzle start".to_string());
    }
    if puzzle_end > puzzles.len() {
        return Err(format!(
            "puzzle {} not found (file contains {} puzzles)",
            puzzle_end,
            puzzles.len()
        ));
    }

    Ok((args.puzzle_start..=puzzle_end)
        .filter_map(|puzzle_num| {
            puzzles
                .get(puzzle_num - 1)
                .map(|board| (puzzle_num, board.clone()))
        })
        .collect())
}

fn main() {
    let args = Args::parse();

    let selected = match load_puzzles(&args) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let num_puzzles = selected.len();

    if args.print_solution && num_puzzles > 1 {
        eprintln!("Error: solution printing only supported when solving a single puzzle");
        std::process::exit(1);
    }

    // Validate trace_range
    if let Some(ref range) = args.trace_range {
        if range[0] > range[1] {
            eprintln!("Error: trace range start must be <= end");
            std::process::exit(1);
        }
    }

    let mut total_solved = 0;
    let mut total_steps = 0;
    let mut total_states = 0;
    let mut total_time_ms = 0;

    // Parse trace_range from Vec to tuple
    let trace_range = args.trace_range.as_ref().map(|v| (v[0], v[1]));

    for (puzzle_num, board) in &selected {
        let opts = SolveOpts {
            puzzle_num: *puzzle_num,
            max_nodes_explored: args.max_nodes_explored,
            print_solution: args.print_solution,
            trace_range,
        };
        let stats = solve_puzzle(board, opts, args.heuristic);

        if stats.solved {
            total_solved += 1;
        }
        total_steps += stats.steps;
        total_states += stats.states_explored;
        total_time_ms += stats.elapsed_ms;
    }

    // Print summary statistics if multiple puzzles were solved
    if num_puzzles > 1 {
        println!("---");
        println!(
            "solved: {:>3}/{:<3}        steps: {:<5}  states: {:<12}  elapsed: {} ms",
            total_solved, num_puzzles, total_steps, total_states, total_time_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4x4"), Ok((4, 4)));
        assert_eq!(parse_size("2X5"), Ok((2, 5)));
        assert!(parse_size("4").is_err());
        assert!(parse_size("0x3").is_err());
        assert!(parse_size("ax3").is_err());
    }

    #[test]
    fn test_args_random() {
        let args = Args::try_parse_from(["slider", "--random", "3x3", "--count", "4", "--seed", "9"])
            .unwrap();
        assert_eq!(args.random, Some((3, 3)));
        let selected = load_puzzles(&args).unwrap();
        assert_eq!(selected.len(), 4);
        assert_eq!(selected[3].0, 4);
        assert_eq!(selected[0].1.width(), 3);
    }

    #[test]
    fn test_args_require_source() {
        assert!(Args::try_parse_from(["slider"]).is_err());
        assert!(Args::try_parse_from(["slider", "puzzles.txt", "--random", "3x3"]).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let args = Args::try_parse_from(["slider", "nonexistent_file.txt"]).unwrap();
        assert!(load_puzzles(&args).is_err());
    }

    #[test]
    fn test_load_sample_range() {
        let sample = concat!(env!("CARGO_MANIFEST_DIR"), "/puzzles/sample.txt");

        let args = Args::try_parse_from(["slider", sample, "2", "3"]).unwrap();
        let selected = load_puzzles(&args).unwrap();
        assert_eq!(selected.iter().map(|(n, _)| *n).collect::<Vec<_>>(), vec![2, 3]);

        let args = Args::try_parse_from(["slider", sample, "0"]).unwrap();
        assert!(load_puzzles(&args).is_err());

        let args = Args::try_parse_from(["slider", sample, "3", "2"]).unwrap();
        assert!(load_puzzles(&args).is_err());

        let args = Args::try_parse_from(["slider", sample, "1", "1000"]).unwrap();
        assert!(load_puzzles(&args).is_err());
    }

    #[test]
    fn test_sample_puzzles_solve() {
        let sample = concat!(env!("CARGO_MANIFEST_DIR"), "/puzzles/sample.txt");
        let puzzles = Puzzles::from_file(sample).unwrap();
        for index in 0..puzzles.len() {
            let board = puzzles.get(index).unwrap();
            let stats = solve_puzzle(
                board,
                SolveOpts {
                    puzzle_num: index + 1,
                    max_nodes_explored: None,
                    print_solution: false,
                    trace_range: None,
                },
                HeuristicType::LinearConflict,
            );
            assert_eq!(stats.solved, slider::is_solvable(board));
        }
    }
}
