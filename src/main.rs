use clap::Parser;
use flipsolve::{Board, Grid, MoveCatalog, Puzzle, Puzzles, SolveResult, Solution, Solver, Tracer};
use std::process;
use std::time::Instant;

fn print_solution(grid: &Grid, initial: Board, solution: &Solution) {
    println!("\nStarting position:\n{}", initial.display(grid));
    let mut before = initial;
    let total = solution.len();
    for (count, step) in solution.iter().enumerate() {
        println!(
            "Toggle {} ({}/{}):\n{}",
            step.cell,
            count + 1,
            total,
            before.display_move(grid, step.cell)
        );
        before = step.board;
    }
    println!("All done:\n{}", before.display(grid));
}

struct ProgressTracer;

impl Tracer for ProgressTracer {
    fn depth_reached(&self, depth: u8, frontier_len: usize) {
        println!(
            "Depth searched: {:>2}, states to check in Q: {}",
            depth, frontier_len
        );
    }
}

struct PuzzleStats {
    solved: bool,
    moves: usize,
    states_explored: usize,
    elapsed_ms: u128,
}

struct SolveOpts {
    puzzle_num: usize,
    max_nodes: usize,
    print_solution: bool,
    progress: bool,
}

fn solve_puzzle_helper<T: Tracer>(
    puzzle: &Puzzle,
    opts: &SolveOpts,
    mut solver: Solver<T>,
) -> PuzzleStats {
    let start = Instant::now();
    let result = solver.solve(puzzle.board);
    let elapsed_ms = start.elapsed().as_millis();
    let states_explored = solver.states_visited();

    let (solved_char, moves, solved) = match &result {
        SolveResult::Solved(solution) => ('Y', solution.len(), true),
        SolveResult::Cutoff => ('N', 0, false),
        SolveResult::Unsolvable => ('X', 0, false),
    };

    println!(
        "puzzle: {:<3}  solved: {}  moves: {:<3}  states: {:<10}  elapsed: {} ms",
        opts.puzzle_num, solved_char, moves, states_explored, elapsed_ms
    );

    if opts.print_solution {
        if let SolveResult::Solved(solution) = &result {
            print_solution(&puzzle.grid, puzzle.board, solution);
        }
    }

    PuzzleStats {
        solved,
        moves,
        states_explored,
        elapsed_ms,
    }
}

fn solve_puzzle(puzzle: &Puzzle, opts: &SolveOpts) -> PuzzleStats {
    let solver = Solver::new(puzzle.grid).with_max_nodes(opts.max_nodes);
    if opts.progress {
        solve_puzzle_helper(puzzle, opts, solver.with_tracer(ProgressTracer))
    } else {
        solve_puzzle_helper(puzzle, opts, solver)
    }
}

#[derive(Parser)]
#[command(name = "flipsolve")]
#[command(about = "A minimum-move Lights Out solver", long_about = None)]
struct Args {
    /// Path to the puzzles file
    #[arg(value_name = "FILE", required_unless_present = "random")]
    puzzles_file: Option<String>,

    /// Puzzle number to solve (1-indexed), or start of range; all puzzles if omitted
    #[arg(value_name = "PUZZLE")]
    puzzle_start: Option<usize>,

    /// Optional end of puzzle range (inclusive, 1-indexed)
    #[arg(value_name = "PUZZLE_END")]
    puzzle_end: Option<usize>,

    /// Solve a randomly scrambled board instead of reading a file
    #[arg(short, long, conflicts_with = "puzzles_file")]
    random: bool,

    /// Grid size for --random
    #[arg(short, long, default_value = "5")]
    size: usize,

    /// Number of random toggles used to scramble the board
    #[arg(short, long, default_value = "8")]
    moves: usize,

    /// Seed for --random
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Maximum number of boards to expand before giving up
    #[arg(short = 'n', long, default_value = "10000000")]
    max_nodes: usize,

    /// Report each new search depth
    #[arg(short = 'v', long)]
    progress: bool,
}

fn load_puzzles(args: &Args) -> Result<Vec<(usize, Puzzle)>, String> {
    if args.random {
        let grid = Grid::new(args.size).map_err(|e| e.to_string())?;
        let board = flipsolve::scramble(&MoveCatalog::new(grid), args.moves, args.seed);
        return Ok(vec![(1, Puzzle { grid, board })]);
    }

    let path = args.puzzles_file.as_deref().unwrap_or_default();
    let puzzles = Puzzles::from_file(path).map_err(|e| format!("loading puzzles: {}", e))?;
    if puzzles.is_empty() {
        return Err(format!("no puzzles found in {}", path));
    }

    // Determine the range of puzzles to solve
    let puzzle_start = args.puzzle_start.unwrap_or(1);
    let puzzle_end = match (args.puzzle_start, args.puzzle_end) {
        (_, Some(end)) => end,
        (Some(start), None) => start,
        (None, None) => puzzles.len(),
    };

    if puzzle_start == 0 {
        return Err("puzzle numbers must be at least 1".to_string());
    }
    if puzzle_end < puzzle_start {
        return Err("puzzle end must be >= puzzle start".to_string());
    }
    if puzzle_end > puzzles.len() {
        return Err(format!(
            "puzzle {} not found (file contains {} puzzles)",
            puzzle_end,
            puzzles.len()
        ));
    }

    Ok((puzzle_start..=puzzle_end)
        .filter_map(|num| puzzles.get(num - 1).map(|puzzle| (num, *puzzle)))
        .collect())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let selected = match load_puzzles(&args) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if args.print_solution && selected.len() > 1 {
        eprintln!("Error: solution printing only supported when solving a single puzzle");
        process::exit(1);
    }

    let mut total_solved = 0;
    let mut total_moves = 0;
    let mut total_states = 0;
    let mut total_time_ms = 0;

    for (puzzle_num, puzzle) in &selected {
        let opts = SolveOpts {
            puzzle_num: *puzzle_num,
            max_nodes: args.max_nodes,
            print_solution: args.print_solution,
            progress: args.progress,
        };
        let stats = solve_puzzle(puzzle, &opts);

        if stats.solved {
            total_solved += 1;
        }
        total_moves += stats.moves;
        total_states += stats.states_explored;
        total_time_ms += stats.elapsed_ms;
    }

    // Print summary statistics if multiple puzzles were solved
    if selected.len() > 1 {
        println!("---");
        println!(
            "solved: {:>3}/{:<3}        moves: {:<3}  states: {:<10}  elapsed: {} ms",
            total_solved,
            selected.len(),
            total_moves,
            total_states,
            total_time_ms
        );
    }

    if total_solved < selected.len() {
        process::exit(2);
    }
}
