//! Genomes and their per-grid length.

use maze_core::{Dir, Grid};
use maze_paths::FrontierSearch;

/// A fixed-length sequence of moves. Genomes are plain data; all behavior
/// lives in the walk and operator functions.
pub type Genome = Vec<Dir>;

/// Grids at least this large get the longer genome scale.
const LARGE_AREA: usize = 2500;
const SMALL_SCALE: f64 = 1.5;
const LARGE_SCALE: f64 = 3.0;
/// Floor of the length cap; larger grids allow up to half their area.
const MIN_LENGTH_CAP: usize = 300;
/// Estimate padding when the exit is not reachable at all.
const UNREACHABLE_PADDING: usize = 20;

/// Unweighted hop count from entrance to exit, or `None` if the exit is
/// walled off.
pub fn estimate_hops(grid: &Grid) -> Option<u32> {
    let mut fs = FrontierSearch::for_grid(grid);
    fs.bfs_map(grid, grid.entrance());
    fs.hops_at(grid.exit())
}

/// Genome length for `grid` given an unweighted hop estimate.
///
/// The estimate `E` counts path cells including the start. The length is
/// `round(E * scale)` capped at `max(300, area / 2)`, but never shorter than
/// `rows + cols`.
pub fn genome_length(grid: &Grid, hops: Option<u32>) -> usize {
    let estimate = match hops {
        Some(h) => h as usize + 1,
        None => grid.entrance().manhattan(grid.exit()) as usize + UNREACHABLE_PADDING,
    };
    let area = grid.area();
    let scale = if area >= LARGE_AREA {
        LARGE_SCALE
    } else {
        SMALL_SCALE
    };
    let cap = (area / 2).max(MIN_LENGTH_CAP);
    let scaled = (estimate as f64 * scale).round() as usize;
    scaled.min(cap).max(grid.rows() + grid.cols())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Pos;

    #[test]
    fn short_corridor_uses_floor() {
        let g: Grid = "S....G".parse().unwrap();
        assert_eq!(estimate_hops(&g), Some(5));
        // round(6 * 1.5) = 9 beats rows + cols = 7.
        assert_eq!(genome_length(&g, Some(5)), 9);
        // round(2 * 1.5) = 3 loses to rows + cols.
        assert_eq!(genome_length(&g, Some(1)), 7);
    }

    #[test]
    fn unreachable_exit_pads_manhattan() {
        let g: Grid = "S..\n.##\n.#G".parse().unwrap();
        assert_eq!(estimate_hops(&g), None);
        // (4 + 20) * 1.5 = 36
        assert_eq!(genome_length(&g, None), 36);
    }

    #[test]
    fn large_grids_scale_up_and_cap() {
        let g = Grid::builder(50, 50)
            .entrance(Pos::new(0, 0))
            .exit(Pos::new(49, 49))
            .build()
            .unwrap();
        assert_eq!(estimate_hops(&g), Some(98));
        // 99 * 3.0 = 297, cap is max(300, 1250).
        assert_eq!(genome_length(&g, Some(98)), 297);
        assert_eq!(genome_length(&g, Some(999)), 1250);
    }
}
