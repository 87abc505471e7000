use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use amazed::logging::{LogLevel, init_logging};
use amazed::maze::generate::{GenerateOptions, generate_maze_with};
use amazed::maze::{GridMaze, Maze};
use amazed::search::parallel::EventSummary;
use amazed::search::{SchedulerKind, SearchConfig, Solver, event_channel};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "amazed")]
#[command(about = "amazed - fork/join parallel maze solver")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// CLI scheduler selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliScheduler {
    /// Work-stealing thread pool
    Pool,
    /// Single thread, forked tasks run in spawn order after the root
    Inline,
}

impl From<CliScheduler> for SchedulerKind {
    fn from(cli: CliScheduler) -> Self {
        match cli {
            CliScheduler::Pool => SchedulerKind::Pool,
            CliScheduler::Inline => SchedulerKind::Inline,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search a maze file for a path from its start to a goal
    Solve {
        /// Path to the maze file
        maze: PathBuf,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        workers: Option<usize>,
        /// Task scheduler
        #[arg(long, value_enum, default_value = "pool")]
        scheduler: CliScheduler,
        /// Claimed nodes between forks of a task (0 disables forking)
        #[arg(long, default_value = "1")]
        fork_after: usize,
        /// Print the maze with the path drawn on it
        #[arg(long)]
        render: bool,
        /// Count visit and fork events while searching
        #[arg(long)]
        trace: bool,
    },
    /// Generate a random maze
    Generate {
        /// Rooms per row
        #[arg(long, default_value = "20")]
        width: usize,
        /// Rooms per column
        #[arg(long, default_value = "10")]
        height: usize,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        /// Extra walls to knock down, creating alternative routes
        #[arg(long, default_value = "0")]
        loops: usize,
        /// Write the maze to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Options for the solve command
struct SolveOptions {
    config: SearchConfig,
    render: bool,
    trace: bool,
}

// --- Solve ---

fn solve_maze(path: &Path, options: &SolveOptions) -> Result<(), Box<dyn std::error::Error>> {
    println!("Solving maze: {}", path.display());

    let maze = GridMaze::load(path)?;
    println!(
        "Maze: {}x{}, start {}, {} goal(s)",
        maze.width(),
        maze.height(),
        maze.start(),
        maze.goal_count()
    );

    let solver = Solver::new(&maze, options.config.clone())?;

    let (outcome, events) = if options.trace {
        let (observer, receiver) = event_channel();
        let solver = solver.with_observer(observer);
        let outcome = solver.solve()?;
        (outcome, Some(EventSummary::drain(&receiver)))
    } else {
        (solver.solve()?, None)
    };

    print!("{}", outcome);

    if options.render {
        println!();
        print!("{}", maze.render(outcome.path.as_deref()));
    }

    println!("\nSearch Statistics:");
    for line in outcome.statistics.format_summary().lines() {
        println!("  {}", line);
    }

    if let Some(events) = events {
        println!("  Visit events: {}", events.visits);
        println!("  Fork events: {}", events.forks);
    }

    Ok(())
}

// --- Generate ---

fn generate(
    options: &GenerateOptions,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let maze = generate_maze_with(options)?;
    let text = maze.render(None);

    match output {
        Some(path) => {
            fs::write(path, text)?;
            println!(
                "Wrote {}x{} maze to {}",
                maze.width(),
                maze.height(),
                path.display()
            );
        }
        None => print!("{}", text),
    }

    Ok(())
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_logging(LogLevel::from(args.verbose));

    match args.command {
        Commands::Solve {
            maze,
            workers,
            scheduler,
            fork_after,
            render,
            trace,
        } => {
            let options = SolveOptions {
                config: SearchConfig::default()
                    .with_workers_option(workers)
                    .with_scheduler(scheduler.into())
                    .with_fork_after(fork_after),
                render,
                trace,
            };

            if let Err(e) = solve_maze(&maze, &options) {
                eprintln!("Error solving maze: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Generate {
            width,
            height,
            seed,
            loops,
            output,
        } => {
            let options = GenerateOptions::default()
                .with_size(width, height)
                .with_seed_option(seed)
                .with_loops(loops);

            if let Err(e) = generate(&options, output.as_deref()) {
                eprintln!("Error generating maze: {}", e);
                std::process::exit(1);
            }
        }
    }
}
