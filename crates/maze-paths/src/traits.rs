use maze_core::{Grid, Pos};

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append the passable neighbors of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Pos, to: Pos) -> u32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Pos, to: Pos) -> u32;
}

impl Pather for Grid {
    /// In-bounds Road cells in North, East, South, West order.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_road(n)));
    }
}

impl WeightedPather for Grid {
    /// The weight of the entered cell, at least 1.
    fn cost(&self, _from: Pos, to: Pos) -> u32 {
        self.weight(to).unwrap_or(1).max(1)
    }
}

impl AstarPather for Grid {
    /// Manhattan distance. Admissible because every step costs at least 1.
    fn estimate(&self, from: Pos, to: Pos) -> u32 {
        from.manhattan(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_neighbors_skip_walls_and_edges() {
        let g: Grid = "S#.\n.3G".parse().unwrap();
        let mut buf = Vec::new();
        g.neighbors(Pos::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Pos::new(1, 0)]);

        buf.clear();
        g.neighbors(Pos::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Pos::new(1, 2), Pos::new(1, 0)]);
    }

    #[test]
    fn grid_cost_and_estimate() {
        let g: Grid = "S#.\n.3G".parse().unwrap();
        assert_eq!(g.cost(Pos::new(1, 0), Pos::new(1, 1)), 3);
        assert_eq!(g.cost(Pos::new(1, 1), Pos::new(1, 2)), 1);
        assert_eq!(g.estimate(Pos::new(0, 0), Pos::new(1, 2)), 3);
    }
}
