//! Command-line front end for the gridsolve solver.
//!
//! Puzzles are read from text files with one line per row and one character
//! per cell, `.` marking an unknown cell. Pass `-` to read from standard
//! input.
//!
//! # Usage
//!
//! ```sh
//! gridsolve solve puzzle.txt
//! gridsolve count --parallel fnot --tasks 8 puzzle.txt
//! gridsolve --subgrid-height 2 --subgrid-width 3 solve-all puzzle6.txt
//! RUST_LOG=debug gridsolve count --limit 100 puzzle.txt
//! ```

use std::{
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use gridsolve_core::{Alphabet, CoreError, GridShape, text};
use gridsolve_solver::{
    DEFAULT_TASK_COUNT, DEFAULT_TASK_DEPTH_LIMIT, ExecutionMode, ParallelOptions, SolverError,
    SudokuSolver,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of rows in each block.
    #[arg(long, value_name = "ROWS", default_value_t = 3, global = true)]
    subgrid_height: usize,

    /// Number of columns in each block.
    #[arg(long, value_name = "COLS", default_value_t = 3, global = true)]
    subgrid_width: usize,

    /// Symbols used in the puzzle, in order. Defaults to digits, then letters.
    #[arg(long, value_name = "SYMBOLS", global = true)]
    alphabet: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the first solution found.
    Solve {
        /// Puzzle file, or `-` for standard input.
        file: PathBuf,
    },
    /// Print every symbol each cell takes in some solution.
    SolveAll {
        /// Puzzle file, or `-` for standard input.
        file: PathBuf,
        #[command(flatten)]
        parallel: ParallelArgs,
    },
    /// Print the number of solutions.
    Count {
        /// Puzzle file, or `-` for standard input.
        file: PathBuf,
        /// Stop counting after this many solutions.
        #[arg(long, value_name = "COUNT", conflicts_with = "parallel")]
        limit: Option<usize>,
        #[command(flatten)]
        parallel: ParallelArgs,
    },
    /// Print the number of given cells.
    Givens {
        /// Puzzle file, or `-` for standard input.
        file: PathBuf,
    },
}

#[derive(Debug, ClapArgs)]
struct ParallelArgs {
    /// Search on worker threads with the given scheduling.
    #[arg(long, value_name = "MODE")]
    parallel: Option<Schedule>,

    /// Branching levels expanded before work is split into slices.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TASK_DEPTH_LIMIT)]
    depth: usize,

    /// Number of worker tasks with `--parallel fnot`.
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_TASK_COUNT)]
    tasks: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Schedule {
    /// One task per slice.
    Ospt,
    /// A fixed number of tasks sharing the slices.
    Fnot,
}

impl ParallelArgs {
    fn options(&self) -> Option<ParallelOptions> {
        let mode = match self.parallel? {
            Schedule::Ospt => ExecutionMode::OneSlicePerTask,
            Schedule::Fnot => ExecutionMode::FixedNumberOfTasks {
                task_count: self.tasks,
            },
        };
        Some(
            ParallelOptions::default()
                .with_task_depth_limit(self.depth)
                .with_mode(mode),
        )
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("{_0}")]
    Core(#[from] CoreError),
    #[display("{_0}")]
    Solver(#[from] SolverError),
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let shape = GridShape::new(args.subgrid_height, args.subgrid_width)?;
    let alphabet = match &args.alphabet {
        Some(symbols) => Alphabet::new(symbols)?,
        None => Alphabet::standard(shape.edge())?,
    };
    let solver = SudokuSolver::new(shape, alphabet)?;
    log::debug!("solving {shape} grids over {}", solver.alphabet());

    match &args.command {
        Command::Solve { file } => {
            let cells = read_puzzle(file)?;
            match solver.solve_one(&cells)? {
                Some(solution) => print!("{}", text::format_grid_text(&solution)),
                None => println!("no solution"),
            }
        }
        Command::SolveAll { file, parallel } => {
            let cells = read_puzzle(file)?;
            let union = match parallel.options() {
                Some(options) => solver.solve_all_parallel(&cells, &options)?,
                None => solver.solve_all(&cells)?,
            };
            match union {
                Some(union) => print!("{}", format_candidates(&union)),
                None => println!("no solution"),
            }
        }
        Command::Count {
            file,
            limit,
            parallel,
        } => {
            let cells = read_puzzle(file)?;
            let count = match (limit, parallel.options()) {
                (Some(limit), _) => solver.count_solutions_bounded(&cells, *limit)?,
                (None, Some(options)) => solver.count_solutions_parallel(&cells, &options)?,
                (None, None) => solver.count_solutions(&cells)?,
            };
            println!("{count}");
        }
        Command::Givens { file } => {
            let cells = read_puzzle(file)?;
            println!("{}", solver.count_givens(&cells)?);
        }
    }
    Ok(())
}

fn read_puzzle(path: &Path) -> Result<Vec<Vec<String>>, CliError> {
    let read_err = |source| CliError::Read {
        path: path.to_owned(),
        source,
    };
    let data = if path == Path::new("-") {
        let mut data = String::new();
        io::stdin().read_to_string(&mut data).map_err(read_err)?;
        data
    } else {
        fs::read_to_string(path).map_err(read_err)?
    };
    Ok(text::parse_grid_text(&data))
}

/// Lays out multi-symbol cells in aligned, space-separated columns.
fn format_candidates(cells: &[Vec<String>]) -> String {
    let width = cells
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for row in cells {
        let line = row
            .iter()
            .map(|cell| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(line.trim_end());
        out.push_str(text::LINE_ENDING);
    }
    out
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parallel_options() {
        let args = Args::parse_from([
            "gridsolve", "count", "--parallel", "fnot", "--tasks", "4", "p.txt",
        ]);
        let Command::Count { parallel, limit, .. } = args.command else {
            panic!("expected count");
        };
        assert_eq!(limit, None);
        let options = parallel.options().unwrap();
        let expected = ExecutionMode::FixedNumberOfTasks { task_count: 4 };
        assert_eq!(options.mode, expected);
        assert_eq!(options.task_depth_limit, DEFAULT_TASK_DEPTH_LIMIT);
    }

    #[test]
    fn test_limit_conflicts_with_parallel() {
        let result = Args::try_parse_from([
            "gridsolve", "count", "--limit", "3", "--parallel", "ospt", "p.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_candidates_aligns_columns() {
        let cells = vec![
            vec!["1".to_owned(), "23".to_owned()],
            vec!["234".to_owned(), "4".to_owned()],
        ];
        assert_eq!(
            format_candidates(&cells),
            format!("1   23{0}234 4{0}", text::LINE_ENDING)
        );
    }
}
