//! `maze-solve`: run the maze solvers over a built-in sample and print the
//! outcome.
//!
//! ```text
//! RUST_LOG=info maze-solve --maze weighted --algorithm astar
//! maze-solve --maze simple --algorithm genetic --goal-bias 0.6 --delay-ms 5
//! ```

mod config;
mod mazes;
mod render;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use maze_core::{GenerationReport, Observer, Pos, Role};
use maze_runner::{Algorithm, Controller, Handle, RunRequest};

use crate::config::FileConfig;
use crate::mazes::Sample;

#[derive(Debug, Parser)]
#[command(
    name = "maze-solve",
    version,
    about = "Solve a sample maze with BFS, Dijkstra, A* or a genetic solver"
)]
struct Args {
    /// Sample maze to solve.
    #[arg(short, long, value_enum, default_value_t = Sample::Simple)]
    maze: Sample,

    /// Algorithm to run (bfs, dijkstra, astar, genetic). Runs all of them
    /// when omitted.
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// TOML file with a `[genetic]` table.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    population: Option<usize>,

    #[arg(long)]
    mutation_rate: Option<f64>,

    #[arg(long)]
    goal_bias: Option<f64>,

    #[arg(long)]
    elitism: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Cancel the genetic solver after this many generations.
    #[arg(long, default_value_t = 5000)]
    max_generations: u64,

    /// Pause after every animated cell.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Print the final marks over the maze.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    draw: bool,
}

/// Sleeps between cells and stops runaway genetic runs.
struct Animator {
    delay: Duration,
    handle: Handle,
    max_generations: u64,
}

impl Observer for Animator {
    fn on_cell(&mut self, _pos: Pos, _role: Role) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        if report.generation % 100 == 0 {
            log::info!(
                "generation {}: best cost {}, walk of {} cells",
                report.generation,
                report.best_cost,
                report.path.len()
            );
        }
        if report.generation + 1 >= self.max_generations {
            log::warn!("stopping after {} generations", self.max_generations);
            self.handle.cancel();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => FileConfig::load(path)?.genetic,
        None => FileConfig::default().genetic,
    };
    if let Some(n) = args.population {
        params.population_size = n;
    }
    if let Some(r) = args.mutation_rate {
        params.mutation_rate = r;
    }
    if let Some(b) = args.goal_bias {
        params.goal_bias = b;
    }
    if let Some(e) = args.elitism {
        params.elitism_count = e;
    }
    if let Some(s) = args.seed {
        params.seed = s;
    }

    let grid = args
        .maze
        .grid()
        .with_context(|| format!("built-in maze {:?} is invalid", args.maze))?;
    let mut controller = Controller::new(grid);
    controller.set_params(params)?;

    let algorithms = match args.algorithm {
        Some(a) => vec![a],
        None => Algorithm::ALL.to_vec(),
    };
    let mut animator = Animator {
        delay: Duration::from_millis(args.delay_ms),
        handle: controller.handle(),
        max_generations: args.max_generations,
    };

    for algorithm in algorithms {
        let report = controller.run(&RunRequest::new(algorithm), &mut animator)?;
        let r = &report.result;
        println!("== {} ==", report.algorithm);
        if r.solved {
            println!(
                "solved: {} steps, cost {}, {} cells visited in {:.2?}",
                r.steps.unwrap_or_default(),
                r.total_cost.unwrap_or_default(),
                r.visited_count,
                r.elapsed
            );
        } else {
            println!(
                "no path: {} cells visited in {:.2?}",
                r.visited_count, r.elapsed
            );
        }
        if args.draw {
            print!("{}", render::overlay(controller.grid(), controller.marks()));
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_parse() {
        let args = Args::try_parse_from([
            "maze-solve",
            "--maze",
            "weighted",
            "-a",
            "A*",
            "--goal-bias",
            "0.5",
            "--draw",
            "false",
        ])
        .unwrap();
        assert_eq!(args.maze, Sample::Weighted);
        assert_eq!(args.algorithm, Some(Algorithm::AStar));
        assert_eq!(args.goal_bias, Some(0.5));
        assert!(!args.draw);
    }

    #[test]
    fn every_algorithm_runs_on_every_sample() {
        for sample in [Sample::Simple, Sample::Weighted, Sample::Corridor, Sample::Enclosed] {
            let mut controller = Controller::new(sample.grid().unwrap());
            let mut animator = Animator {
                delay: Duration::ZERO,
                handle: controller.handle(),
                max_generations: 500,
            };
            for algorithm in Algorithm::ALL {
                let report = controller.run(&RunRequest::new(algorithm), &mut animator).unwrap();
                if sample == Sample::Enclosed {
                    assert!(!report.result.solved, "{algorithm} on {sample:?}");
                } else if algorithm != Algorithm::Genetic {
                    assert!(report.result.solved, "{algorithm} on {sample:?}");
                }
            }
        }
    }
}
