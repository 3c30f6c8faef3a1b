use std::time::Instant;

use maze_core::{GenerationReport, Grid, Role, RunContext, RunResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::genome::{Genome, estimate_hops, genome_length};
use crate::operators::{
    crossover, directed_genome, directed_segment_mutation, greedy_repair, mutate, random_genome,
};
use crate::params::GeneticParams;
use crate::walk::{Walk, evaluate, path_cost};

/// Chance that a bred child gets a directed segment mutation.
const SEGMENT_MUTATION_RATE: f64 = 0.15;
/// Chance that a bred child gets a greedy tail repair.
const CHILD_REPAIR_RATE: f64 = 0.2;
/// Parents are drawn from at least this many top-ranked genomes.
const PARENT_POOL_MIN: usize = 4;
/// At least this many directed genomes seed the first generation.
const DIRECTED_SEEDS_MIN: usize = 2;

/// The best genome seen during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub genome: Genome,
    pub walk: Walk,
    /// Generation in which it was found.
    pub generation: u64,
}

/// Goal-biased genetic maze solver.
///
/// Each generation every genome is decoded by a simulated walk, ranked
/// (reaching genomes first, then by cost), and the best walk is animated
/// through the run context. The next generation keeps the elites and breeds
/// the rest from the top of the ranking. There is no generation cap: a run
/// ends when a generation's best reaches the exit or when it is cancelled,
/// so runs over an unreachable exit only end through cancellation.
#[derive(Debug, Clone)]
pub struct GeneticSolver<R = StdRng> {
    params: GeneticParams,
    rng: R,
    best: Option<Candidate>,
}

impl GeneticSolver<StdRng> {
    /// A solver whose generator is seeded from `params.seed`.
    pub fn new(params: GeneticParams) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        Self::with_rng(params, rng)
    }
}

impl<R: Rng> GeneticSolver<R> {
    /// A solver drawing from an explicit generator; `params.seed` is unused.
    pub fn with_rng(params: GeneticParams, rng: R) -> Self {
        Self {
            params,
            rng,
            best: None,
        }
    }

    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    /// Best candidate of the last run, if any generation was evaluated.
    pub fn best(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Evolve genomes for `grid` until one reaches the exit or `ctx` is
    /// cancelled.
    pub fn solve(&mut self, grid: &Grid, ctx: &mut RunContext<'_>) -> RunResult {
        let start = Instant::now();
        self.best = None;

        let len = genome_length(grid, estimate_hops(grid));
        let pop_size = self.params.population_size;
        let elites = self.params.effective_elites();
        if elites != self.params.elitism_count {
            log::warn!(
                "elitism count {} clamped to {elites} for a population of {pop_size}",
                self.params.elitism_count
            );
        }
        let pool = elites.max(PARENT_POOL_MIN).min(pop_size);
        log::debug!(
            "genetic: genome length {len}, population {pop_size}, {elites} elites"
        );

        let mut population = self.initial_population(grid, len);
        let mut generation = 0u64;
        let mut found = None;

        while !ctx.is_cancelled() {
            let mut ranked: Vec<(Genome, Walk)> = population
                .drain(..)
                .map(|g| {
                    let w = evaluate(grid, &g, self.params.goal_bias, &mut self.rng);
                    (g, w)
                })
                .collect();
            rank(&mut ranked);
            let Some((top_genome, top)) = ranked.first() else {
                break;
            };

            if self
                .best
                .as_ref()
                .is_none_or(|b| top.cost < b.walk.cost || top.reached)
            {
                self.best = Some(Candidate {
                    genome: top_genome.clone(),
                    walk: top.clone(),
                    generation,
                });
            }

            if !animate(top, ctx) {
                break;
            }
            if let Some(best) = &self.best {
                ctx.observer.on_generation(&GenerationReport {
                    generation,
                    best_cost: best.walk.cost,
                    reached: best.walk.reached,
                    path: &best.walk.path,
                });
            }
            log::trace!(
                "generation {generation}: top cost {}, walk of {} cells, reached {}",
                top.cost,
                top.path.len(),
                top.reached
            );

            if top.reached {
                found = Some(top.clone());
                break;
            }
            population = self.breed(grid, &ranked, elites, pool);
            generation += 1;
        }

        ctx.marks.clear_frontier();
        let visited = ctx.marks.visited_count();
        let elapsed = start.elapsed();
        match found {
            Some(walk) => {
                let cost = path_cost(grid, &walk.path);
                ctx.mark_path(&walk.path);
                log::debug!(
                    "genetic: solved in generation {generation}, {} steps, cost {cost}",
                    walk.path.len()
                );
                RunResult::solved(walk.path, cost, visited, elapsed)
            }
            None => {
                log::debug!("genetic: cancelled after {generation} generations");
                RunResult::unsolved(visited, elapsed)
            }
        }
    }

    fn initial_population(&mut self, grid: &Grid, len: usize) -> Vec<Genome> {
        let pop_size = self.params.population_size;
        let directed = (pop_size / 10).max(DIRECTED_SEEDS_MIN).min(pop_size);
        let mut population = Vec::with_capacity(pop_size);
        for _ in 0..directed {
            population.push(directed_genome(grid, len, &mut self.rng));
        }
        while population.len() < pop_size {
            population.push(random_genome(len, &mut self.rng));
        }
        population
    }

    fn breed(
        &mut self,
        grid: &Grid,
        ranked: &[(Genome, Walk)],
        elites: usize,
        pool: usize,
    ) -> Vec<Genome> {
        let pop_size = self.params.population_size;
        let pool = pool.min(ranked.len());
        let mut next = Vec::with_capacity(pop_size);

        for (genome, walk) in ranked.iter().take(elites) {
            let mut g = genome.clone();
            if !walk.reached {
                greedy_repair(grid, &mut g, &mut self.rng);
            }
            next.push(g);
        }

        while next.len() < pop_size {
            let a = &ranked[self.rng.random_range(0..pool)].0;
            let b = &ranked[self.rng.random_range(0..pool)].0;
            let mut child = crossover(a, b, &mut self.rng);
            mutate(&mut child, self.params.mutation_rate, &mut self.rng);
            if self.rng.random::<f64>() < SEGMENT_MUTATION_RATE {
                directed_segment_mutation(grid, &mut child, &mut self.rng);
            }
            if self.rng.random::<f64>() < CHILD_REPAIR_RATE {
                greedy_repair(grid, &mut child, &mut self.rng);
            }
            next.push(child);
        }
        next
    }
}

/// Order genomes best first: those reaching the exit, then by ascending
/// cost. The sort is stable, so equal genomes keep their order.
fn rank(population: &mut [(Genome, Walk)]) {
    population.sort_by_key(|(_, w)| (!w.reached, w.cost));
}

/// Show a generation's best walk. Returns `false` if the run was cancelled
/// part way through.
fn animate(walk: &Walk, ctx: &mut RunContext<'_>) -> bool {
    ctx.marks.clear_frontier();
    for &p in &walk.path {
        ctx.marks.visit(p);
        ctx.marks.set_frontier(p, true);
        ctx.observer.on_cell(p, Role::Exploring);
        if ctx.is_cancelled() {
            return false;
        }
    }
    true
}
