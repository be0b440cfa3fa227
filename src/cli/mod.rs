//! # CLI Module
//!
//! Offline tooling around the cube model and the solver contract.
//!
//! ## Usage
//! ```bash
//! # Print both notations of a cube
//! cube-scan notation solved
//!
//! # Apply moves and show every intermediate state
//! cube-scan apply solved "R U R' U'"
//!
//! # Solve through an external solver binary
//! cube-scan solve <FACELETS> --solver ./min2phase --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use rubiks_scan_solve::config::ScanConfig;
use rubiks_scan_solve::core::cube::{CubeState, Move};
use rubiks_scan_solve::core::solver::{ProcessSolver, Solution};
use rubiks_scan_solve::error::Result;
use std::path::PathBuf;
use std::time::Instant;

/// Rubik's cube scan & solve tooling
#[derive(Parser, Debug)]
#[command(name = "cube-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the solver and visualizer notation of a cube
    Notation {
        /// 54 face letters (U F R D L B) in internal layout, or `solved`
        facelets: String,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Apply moves to a cube and print each intermediate state
    Apply {
        /// 54 face letters (U F R D L B) in internal layout, or `solved`
        facelets: String,

        /// Moves such as `R`, `U2`, `F'`
        #[arg(required = true)]
        moves: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Solve a cube with an external solver program
    Solve {
        /// 54 face letters (U F R D L B) in internal layout
        facelets: String,

        /// Solver executable; receives the scramble and search parameters
        #[arg(short, long)]
        solver: PathBuf,

        /// Extra argument passed to the solver before the scramble
        #[arg(long = "arg")]
        solver_args: Vec<String>,

        /// JSON config file with solver parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the maximum solution length
        #[arg(long)]
        max_depth: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (notation strings only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Notation { facelets, output } => run_notation(&facelets, output),
        Commands::Apply {
            facelets,
            moves,
            output,
        } => run_apply(&facelets, &moves, output),
        Commands::Solve {
            facelets,
            solver,
            solver_args,
            config,
            max_depth,
            output,
        } => run_solve(&facelets, solver, solver_args, config, max_depth, output),
    }
}

fn parse_cube(facelets: &str) -> Result<CubeState> {
    if facelets.eq_ignore_ascii_case("solved") {
        return Ok(CubeState::solved());
    }
    Ok(facelets.parse()?)
}

fn run_notation(facelets: &str, output: OutputFormat) -> Result<()> {
    let cube = parse_cube(facelets)?;
    let scramble = cube.to_solver_scramble();
    let visualizer = cube.to_visualizer_state();

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} {}",
                style("Solver:    ").bold(),
                style(&scramble).cyan()
            ))
            .ok();
            term.write_line(&format!(
                "{} {}",
                style("Visualizer:").bold(),
                style(&visualizer).cyan()
            ))
            .ok();
            if cube.is_solved() {
                term.write_line(&format!("{} cube is solved", style("✓").green().bold()))
                    .ok();
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "facelets": cube.to_string(),
            "scramble": scramble,
            "visualizer": visualizer,
            "solved": cube.is_solved(),
        })),
        OutputFormat::Minimal => {
            println!("{}", scramble);
            println!("{}", visualizer);
        }
    }

    Ok(())
}

fn run_apply(facelets: &str, moves: &[String], output: OutputFormat) -> Result<()> {
    let cube = parse_cube(facelets)?;
    let steps = Move::parse_sequence(&moves.join(" "))?;
    let solution = Solution::new(cube, steps);

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "  {} {}",
                style("start").dim(),
                solution.initial_state()
            ))
            .ok();
            for (mv, state) in solution.solution_steps().iter().zip(solution.states()) {
                term.write_line(&format!("  {:<5} {}", style(mv).yellow().bold(), state))
                    .ok();
            }
            if solution.final_state().is_solved() {
                term.write_line(&format!("{} cube is solved", style("✓").green().bold()))
                    .ok();
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "initial": solution.initial_state().to_string(),
            "steps": solution
                .solution_steps()
                .iter()
                .zip(solution.states())
                .map(|(mv, state)| serde_json::json!({
                    "move": mv.to_string(),
                    "facelets": state.to_string(),
                    "scramble": state.to_solver_scramble(),
                }))
                .collect::<Vec<_>>(),
            "solved": solution.final_state().is_solved(),
        })),
        OutputFormat::Minimal => println!("{}", solution.final_state()),
    }

    Ok(())
}

fn run_solve(
    facelets: &str,
    solver: PathBuf,
    solver_args: Vec<String>,
    config_path: Option<PathBuf>,
    max_depth: Option<u32>,
    output: OutputFormat,
) -> Result<()> {
    let cube = parse_cube(facelets)?;

    let config = match config_path {
        Some(path) => ScanConfig::from_json_file(&path)?,
        None => ScanConfig::default(),
    };
    let mut solver_config = config.solver;
    if let Some(depth) = max_depth {
        solver_config.max_depth = depth;
    }

    let term = Term::stderr();
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Finding solution").bold().cyan(),
            style(solver.display()).dim()
        ))
        .ok();
    }

    let solver = ProcessSolver::new(solver).args(solver_args);
    let started = Instant::now();
    let solution = Solution::compute(cube, &solver, &solver_config)?;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match output {
        OutputFormat::Pretty => {
            term.write_line(&format!(
                "{} {} moves in {:.1}s",
                style("✓").green().bold(),
                style(solution.move_count()).cyan(),
                duration_ms as f64 / 1000.0
            ))
            .ok();
            println!("{}", solution.move_sequence());
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "scramble": solution.initial_state().to_solver_scramble(),
            "visualizer": solution.initial_visualizer_state(),
            "moves": solution.move_sequence(),
            "move_count": solution.move_count(),
            "duration_ms": duration_ms,
        })),
        OutputFormat::Minimal => println!("{}", solution.move_sequence()),
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "failed to render JSON"),
    }
}
