//! Genetic operators: genome creation, crossover, mutation and the two
//! goal-directed repairs.

use maze_core::{Dir, Grid};
use rand::Rng;

use crate::genome::Genome;
use crate::walk::{advance, directed_move};

/// Chance that a seeded genome takes the directed move for a gene.
const SEED_DIRECTED_RATE: f64 = 0.85;
/// Bounds of the directed segment window.
const SEGMENT_MIN: usize = 5;
const SEGMENT_MAX: usize = 20;
/// Upper bound of the repaired tail.
const REPAIR_TAIL_MAX: usize = 20;

#[inline]
fn random_dir<R: Rng>(rng: &mut R) -> Dir {
    Dir::from_index(rng.random_range(0..4))
}

/// A genome of `len` uniformly random moves.
pub fn random_genome<R: Rng>(len: usize, rng: &mut R) -> Genome {
    (0..len).map(|_| random_dir(rng)).collect()
}

/// A genome that mostly steers toward the exit.
///
/// Each gene is a directed move with probability 0.85, otherwise random,
/// and the walk is simulated as the genome is written. Once the exit is
/// reached the remaining genes are left as `North`.
pub fn directed_genome<R: Rng>(grid: &Grid, len: usize, rng: &mut R) -> Genome {
    let goal = grid.exit();
    let mut genes = vec![Dir::North; len];
    let mut pos = grid.entrance();
    if pos == goal {
        return genes;
    }
    for gene in genes.iter_mut() {
        let mv = if rng.random::<f64>() < SEED_DIRECTED_RATE {
            directed_move(grid, pos, rng)
        } else {
            random_dir(rng)
        };
        *gene = mv;
        if let Some(next) = advance(grid, pos, mv) {
            pos = next;
            if pos == goal {
                break;
            }
        }
    }
    genes
}

/// Single-point crossover: genes `[0, cut)` from `a`, the rest from `b`,
/// with `cut` uniform in `1..len`.
pub fn crossover<R: Rng>(a: &[Dir], b: &[Dir], rng: &mut R) -> Genome {
    let len = a.len().min(b.len());
    if len < 2 {
        return a.to_vec();
    }
    let cut = rng.random_range(1..len);
    let mut child = Vec::with_capacity(len);
    child.extend_from_slice(&a[..cut]);
    child.extend_from_slice(&b[cut..len]);
    child
}

/// Replace each gene by a random move with probability `rate`.
pub fn mutate<R: Rng>(genome: &mut [Dir], rate: f64, rng: &mut R) {
    for gene in genome.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = random_dir(rng);
        }
    }
}

/// Window length of [`directed_segment_mutation`] for a genome of `len`.
pub fn segment_len(len: usize) -> usize {
    (len / 6).clamp(SEGMENT_MIN, SEGMENT_MAX)
}

/// Overwrite a random window with moves steering toward the exit.
///
/// The genome is walked literally up to the window start, then each gene
/// of the window becomes the directed move from the current position.
/// Rewriting stops early at the first directed move that is blocked.
pub fn directed_segment_mutation<R: Rng>(grid: &Grid, genome: &mut [Dir], rng: &mut R) {
    let len = genome.len();
    if len == 0 {
        return;
    }
    let window = segment_len(len);
    let start = rng.random_range(0..len.saturating_sub(window).max(1));

    let mut pos = grid.entrance();
    for &mv in &genome[..start] {
        if let Some(next) = advance(grid, pos, mv) {
            pos = next;
        }
    }
    for gene in genome[start..(start + window).min(len)].iter_mut() {
        let mv = directed_move(grid, pos, rng);
        *gene = mv;
        match advance(grid, pos, mv) {
            Some(next) => pos = next,
            None => break,
        }
    }
}

/// Rewrite the tail of a genome that does not reach the exit.
///
/// The genome is walked literally; if it reaches the exit it is left
/// alone. Otherwise its last `min(20, len / 4)` genes become directed moves
/// starting from where the walk ended, stopping at a blocked move or the
/// exit.
pub fn greedy_repair<R: Rng>(grid: &Grid, genome: &mut [Dir], rng: &mut R) {
    let goal = grid.exit();
    let mut pos = grid.entrance();
    if pos == goal {
        return;
    }
    for &mv in genome.iter() {
        if let Some(next) = advance(grid, pos, mv) {
            pos = next;
            if pos == goal {
                return;
            }
        }
    }

    let len = genome.len();
    let tail = (len / 4).min(REPAIR_TAIL_MAX);
    for gene in genome[len - tail..].iter_mut() {
        let mv = directed_move(grid, pos, rng);
        *gene = mv;
        match advance(grid, pos, mv) {
            Some(next) if next == goal => break,
            Some(next) => pos = next,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::evaluate;
    use maze_core::Pos;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn random_genome_has_length() {
        assert_eq!(random_genome(17, &mut rng()).len(), 17);
        assert!(random_genome(0, &mut rng()).is_empty());
    }

    #[test]
    fn directed_genome_reaches_open_exit_often() {
        let g: Grid = "S....\n.....\n....G".parse().unwrap();
        let mut r = rng();
        let reached = (0..50)
            .filter(|_| {
                let genome = directed_genome(&g, 12, &mut r);
                evaluate(&g, &genome, 0.0, &mut r).reached
            })
            .count();
        assert!(reached > 10, "only {reached} of 50 reached");
    }

    #[test]
    fn crossover_splices_parents() {
        let a = vec![Dir::North; 10];
        let b = vec![Dir::South; 10];
        let mut r = rng();
        for _ in 0..20 {
            let child = crossover(&a, &b, &mut r);
            assert_eq!(child.len(), 10);
            let cut = child.iter().position(|d| *d == Dir::South).unwrap();
            assert!((1..10).contains(&cut));
            assert!(child[cut..].iter().all(|d| *d == Dir::South));
        }
    }

    #[test]
    fn mutation_rate_bounds() {
        let mut genome = vec![Dir::East; 30];
        mutate(&mut genome, 0.0, &mut rng());
        assert!(genome.iter().all(|d| *d == Dir::East));

        let mut r = rng();
        let mut changed = 0;
        for _ in 0..10 {
            let mut genome = vec![Dir::East; 30];
            mutate(&mut genome, 1.0, &mut r);
            changed += genome.iter().filter(|d| **d != Dir::East).count();
        }
        // Each replacement keeps East with probability 1/4.
        assert!(changed > 150, "{changed}");
    }

    #[test]
    fn segment_window_is_clamped() {
        assert_eq!(segment_len(12), 5);
        assert_eq!(segment_len(60), 10);
        assert_eq!(segment_len(600), 20);
    }

    #[test]
    fn segment_mutation_steers_in_open_corridor() {
        // In a straight corridor every directed move is East, so whatever
        // window is chosen, it is rewritten to East entirely.
        let g: Grid = "S..........................G".parse().unwrap();
        let mut genome = vec![Dir::North; 30];
        directed_segment_mutation(&g, &mut genome, &mut rng());
        let east = genome.iter().filter(|d| **d == Dir::East).count();
        assert_eq!(east, segment_len(30));
    }

    #[test]
    fn repair_leaves_finished_genomes_alone() {
        let g: Grid = "S.G".parse().unwrap();
        let mut genome = vec![Dir::East, Dir::East, Dir::West, Dir::West];
        let before = genome.clone();
        greedy_repair(&g, &mut genome, &mut rng());
        assert_eq!(genome, before);
    }

    #[test]
    fn repair_rewrites_tail_toward_exit() {
        let g = Grid::builder(1, 12)
            .entrance(Pos::new(0, 0))
            .exit(Pos::new(0, 11))
            .build()
            .unwrap();
        // Eight useless moves walk nowhere; the last four get rewritten.
        let mut genome = vec![Dir::North; 16];
        greedy_repair(&g, &mut genome, &mut rng());
        assert!(genome[..12].iter().all(|d| *d == Dir::North));
        assert!(genome[12..].iter().all(|d| *d == Dir::East));
        let w = evaluate(&g, &genome, 0.0, &mut rng());
        assert_eq!(w.end(), Pos::new(0, 4));
    }
}
